use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use crate::checkout::domain::model::LoanEntity;
use crate::checkout::repository::LoanRepository;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};

// MemoryLoanRepository keeps borrow records in process, keyed by loan_id.
#[derive(Debug, Default)]
pub(crate) struct MemoryLoanRepository {
    rows: Mutex<HashMap<String, LoanEntity>>,
}

impl MemoryLoanRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> LibraryResult<MutexGuard<'_, HashMap<String, LoanEntity>>> {
        self.rows.lock().map_err(|err| LibraryError::database(
            format!("loans table lock poisoned {:?}", err).as_str(), None, false))
    }
}

#[async_trait]
impl LoanRepository for MemoryLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let mut rows = self.lock()?;
        if rows.contains_key(&entity.loan_id) {
            return Err(LibraryError::duplicate_key(format!("loan {} already exists",
                                                           entity.loan_id).as_str()));
        }
        rows.insert(entity.loan_id.clone(), entity.clone());
        Ok(1)
    }

    async fn delete(&self, loan_id: &str) -> LibraryResult<usize> {
        Ok(self.lock()?.remove(loan_id).map(|_| 1).unwrap_or(0))
    }

    async fn count_active(&self, patron_id: &str) -> LibraryResult<usize> {
        Ok(self.lock()?.values().filter(|l| l.patron_id == patron_id && l.is_active()).count())
    }

    async fn find_active(&self, patron_id: &str) -> LibraryResult<Vec<LoanEntity>> {
        Ok(self.lock()?.values().filter(|l| l.patron_id == patron_id && l.is_active()).cloned().collect())
    }

    async fn close(&self, patron_id: &str, book_id: i64, returned_at: NaiveDateTime) -> LibraryResult<Option<LoanEntity>> {
        let mut rows = self.lock()?;
        let active = rows.values_mut()
            .find(|l| l.patron_id == patron_id && l.book_id == book_id && l.is_active());
        Ok(active.map(|loan| {
            loan.loan_status = LoanStatus::Returned;
            loan.returned_at = Some(returned_at);
            loan.version += 1;
            loan.updated_at = returned_at;
            loan.clone()
        }))
    }

    async fn reopen(&self, loan_id: &str) -> LibraryResult<usize> {
        let mut rows = self.lock()?;
        let loan = rows.get_mut(loan_id).ok_or_else(|| LibraryError::not_found(
            format!("loan not found for {}", loan_id).as_str()))?;
        loan.loan_status = LoanStatus::Active;
        loan.returned_at = None;
        loan.version += 1;
        loan.updated_at = Utc::now().naive_utc();
        Ok(1)
    }
}
