use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::search::{filter_books, is_blank_term, SearchType};
use crate::core::domain::Configuration;
use crate::core::library::{store_failure, LibraryError, LibraryResult};

const ISBN_LEN: usize = 13;

pub(crate) struct CatalogServiceImpl {
    max_title_len: usize,
    max_author_len: usize,
    book_repository: Arc<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>) -> Self {
        Self {
            max_title_len: config.max_title_len,
            max_author_len: config.max_author_len,
            book_repository,
        }
    }

    // checks the fields in order and stops at the first failure
    fn validate_new_book(&self, title: &str, author: &str, isbn: &str, total_copies: i64) -> LibraryResult<()> {
        if title.is_empty() {
            return invalid("Title is required.");
        }
        if title.chars().count() > self.max_title_len {
            return invalid(format!("Title must be less than {} characters.", self.max_title_len).as_str());
        }
        if author.is_empty() {
            return invalid("Author is required.");
        }
        if author.chars().count() > self.max_author_len {
            return invalid(format!("Author must be less than {} characters.", self.max_author_len).as_str());
        }
        if isbn.chars().count() != ISBN_LEN {
            return invalid("ISBN must be exactly 13 digits.");
        }
        if total_copies <= 0 {
            return invalid("Total copies must be a positive integer.");
        }
        Ok(())
    }
}

fn invalid(message: &str) -> LibraryResult<()> {
    Err(LibraryError::validation(message, Some("400".to_string())))
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, title: &str, author: &str, isbn: &str, total_copies: i64) -> LibraryResult<BookDto> {
        let (title, author) = (title.trim(), author.trim());
        self.validate_new_book(title, author, isbn, total_copies)?;
        let existing = self.book_repository.find_by_isbn(isbn).await
            .map_err(|err| store_failure("Database error occurred while adding the book.", err))?;
        if existing.is_some() {
            return Err(LibraryError::duplicate_key("A book with this ISBN already exists."));
        }
        let mut book = BookEntity::new(title, author, isbn, total_copies);
        book.book_id = self.book_repository.create(&book).await
            .map_err(|err| store_failure("Database error occurred while adding the book.", err))?;
        info!(book_id = book.book_id, isbn, "book added to catalog");
        Ok(BookDto::from(&book))
    }

    async fn find_book(&self, book_id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(book_id).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::not_found("Book not found."))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let mut books: Vec<BookDto> = self.book_repository.find_all().await?.iter().map(BookDto::from).collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn search_books(&self, term: &str, search_type: &str) -> LibraryResult<Vec<BookDto>> {
        if is_blank_term(term) {
            return Ok(vec![]);
        }
        let books = self.book_repository.find_all().await?.iter().map(BookDto::from).collect();
        Ok(filter_books(books, term, SearchType::from(search_type)))
    }
}
