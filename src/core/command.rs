use async_trait::async_trait;
use serde::Serialize;
use crate::core::library::LibraryError;

// CommandReply is what the presentation layer renders: a success flag, a human-readable
// message and, for successful commands, the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandReply<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> CommandReply<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
        }
    }
}

impl<T> From<LibraryError> for CommandReply<T> {
    fn from(err: LibraryError) -> Self {
        CommandReply::failed(err.message())
    }
}

// Command never fails: every outcome, including store and gateway failures, is a reply.
#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> CommandReply<Response>;
}
