use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::Utc;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};

#[derive(Debug, Default)]
struct BookTable {
    next_id: i64,
    rows: BTreeMap<i64, BookEntity>,
}

// MemoryBookRepository keeps the catalog in process, used for tests and embedded setups.
#[derive(Debug, Default)]
pub(crate) struct MemoryBookRepository {
    table: Mutex<BookTable>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> LibraryResult<MutexGuard<'_, BookTable>> {
        self.table.lock().map_err(|err| LibraryError::database(
            format!("books table lock poisoned {:?}", err).as_str(), None, false))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let mut table = self.lock()?;
        if table.rows.values().any(|b| b.isbn == entity.isbn) {
            return Err(LibraryError::duplicate_key(format!("book with isbn {} already exists",
                                                           entity.isbn).as_str()));
        }
        table.next_id += 1;
        let book_id = table.next_id;
        let mut row = entity.clone();
        row.book_id = book_id;
        table.rows.insert(book_id, row);
        Ok(book_id)
    }

    async fn get(&self, book_id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.lock()?.rows.get(&book_id).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        Ok(self.lock()?.rows.values().find(|b| b.isbn == isbn).cloned())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn update_availability(&self, book_id: i64, delta: i64) -> LibraryResult<usize> {
        let mut table = self.lock()?;
        let row = table.rows.get_mut(&book_id).ok_or_else(|| LibraryError::not_found(
            format!("book not found for {}", book_id).as_str()))?;
        let available = row.with_availability_delta(delta).ok_or_else(|| LibraryError::validation(
            format!("availability of book {} cannot change by {}", book_id, delta).as_str(), Some("400".to_string())))?;
        row.available_copies = available;
        row.version += 1;
        row.updated_at = Utc::now().naive_utc();
        Ok(1)
    }
}
