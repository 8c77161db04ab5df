use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandReply};

pub struct SearchBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchBooksCommandRequest {
    pub term: String,
    #[serde(default)]
    pub search_type: String,
}

impl SearchBooksCommandRequest {
    pub fn new(term: &str, search_type: &str) -> Self {
        Self {
            term: term.to_string(),
            search_type: search_type.to_string(),
        }
    }
}

#[async_trait]
impl Command<SearchBooksCommandRequest, Vec<BookDto>> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> CommandReply<Vec<BookDto>> {
        match self.catalog_service.search_books(req.term.as_str(), req.search_type.as_str()).await {
            Ok(books) => {
                let message = format!("Found {} book(s).", books.len());
                CommandReply::ok(message.as_str(), books)
            }
            Err(err) => CommandReply::from(err),
        }
    }
}
