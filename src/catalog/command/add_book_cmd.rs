use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandReply};

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i64,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, isbn: &str, total_copies: i64) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, BookDto> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> CommandReply<BookDto> {
        match self.catalog_service.add_book(req.title.as_str(), req.author.as_str(),
                                            req.isbn.as_str(), req.total_copies).await {
            Ok(book) => {
                let message = format!("Book \"{}\" has been successfully added to the catalog.", book.title);
                CommandReply::ok(message.as_str(), book)
            }
            Err(err) => CommandReply::from(err),
        }
    }
}
