use std::sync::Arc;
use chrono::Utc;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{error, info};
use crate::books::domain::Book;
use crate::books::repository::BookRepository;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::model::LoanEntity;
use crate::checkout::dto::{CheckoutReceipt, LoanDto, ReturnReceipt};
use crate::checkout::repository::LoanRepository;
use crate::core::domain::{is_valid_patron_id, Configuration};
use crate::core::library::{store_failure, LibraryError, LibraryResult};
use crate::fees::domain::FeeService;
use crate::utils::date::format_day;

pub(crate) struct CheckoutServiceImpl {
    config: Configuration,
    book_repository: Arc<dyn BookRepository>,
    loan_repository: Arc<dyn LoanRepository>,
    fee_service: Arc<dyn FeeService>,
}

impl CheckoutServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>,
                      loan_repository: Arc<dyn LoanRepository>, fee_service: Arc<dyn FeeService>) -> Self {
        Self {
            config: config.clone(),
            book_repository,
            loan_repository,
            fee_service,
        }
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn borrow_book(&self, patron_id: &str, book_id: i64) -> LibraryResult<CheckoutReceipt> {
        if !is_valid_patron_id(patron_id) {
            return Err(LibraryError::validation("Invalid patron ID. Must be exactly 6 digits.", Some("400".to_string())));
        }
        let book = self.book_repository.get(book_id).await
            .map_err(|err| store_failure("Database error occurred while looking up the book.", err))?
            .ok_or_else(|| LibraryError::not_found("Book not found."))?;
        if !book.is_available() {
            return Err(LibraryError::unavailable("This book is currently not available.", None, false));
        }
        let borrowed = self.loan_repository.count_active(patron_id).await
            .map_err(|err| store_failure("Database error occurred while counting borrowed books.", err))?;
        if borrowed >= self.config.max_borrowed_books {
            return Err(LibraryError::not_granted(format!("You have reached the maximum borrowing limit of {} books.",
                                                         self.config.max_borrowed_books).as_str(), None));
        }

        let loan = LoanEntity::new(patron_id, book_id, Utc::now().naive_utc(), self.config.book_loan_days);
        self.loan_repository.create(&loan).await
            .map_err(|err| store_failure("Database error occurred while creating borrow record.", err))?;
        if let Err(err) = self.book_repository.update_availability(book_id, -1).await {
            if let Err(undo) = self.loan_repository.delete(loan.loan_id.as_str()).await {
                error!(loan_id = loan.loan_id.as_str(), cause = ?undo, "failed to remove borrow record after availability update failed");
            }
            return Err(store_failure("Database error occurred while updating book availability.", err));
        }

        info!(patron_id, book_id, loan_id = loan.loan_id.as_str(), "book borrowed");
        Ok(CheckoutReceipt {
            message: format!("Successfully borrowed \"{}\". Due date: {}.", book.title(), format_day(loan.due_at)),
            loan: LoanDto::from(&loan),
            title: book.title,
        })
    }

    async fn return_book(&self, patron_id: &str, book_id: i64) -> LibraryResult<ReturnReceipt> {
        let book = self.book_repository.get(book_id).await
            .map_err(|err| store_failure("Database error occurred while looking up the book.", err))?
            .ok_or_else(|| LibraryError::not_found("Book not found."))?;
        // the fee needs the loan while it is still active
        let fee = self.fee_service.calculate_late_fee(patron_id, book_id).await
            .map_err(|err| store_failure("Unable to calculate late fees.", err))?;

        let loan = self.loan_repository.close(patron_id, book_id, Utc::now().naive_utc()).await
            .map_err(|err| store_failure("Database error occurred while updating borrow record.", err))?
            .ok_or_else(|| LibraryError::not_found("This book is not currently being borrowed by this patron."))?;
        if let Err(err) = self.book_repository.update_availability(book_id, 1).await {
            if let Err(undo) = self.loan_repository.reopen(loan.loan_id.as_str()).await {
                error!(loan_id = loan.loan_id.as_str(), cause = ?undo, "failed to reopen borrow record after availability update failed");
            }
            return Err(store_failure("Database error occurred while updating book availability.", err));
        }

        info!(patron_id, book_id, loan_id = loan.loan_id.as_str(), days_overdue = fee.days_overdue, "book returned");
        let message = if fee.fee_amount > Decimal::ZERO {
            format!("Return processed for \"{}\". Late by {} day(s). Fee due: ${:.2}.",
                    book.title(), fee.days_overdue, fee.fee_amount)
        } else {
            format!("Return processed for \"{}\". No late fees owed.", book.title())
        };
        Ok(ReturnReceipt {
            loan: LoanDto::from(&loan),
            title: book.title,
            days_overdue: fee.days_overdue,
            fee_amount: fee.fee_amount,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::{BookRepository, MockBookRepository};
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::checkout::domain::CheckoutService;
    use crate::checkout::domain::model::LoanEntity;
    use crate::checkout::domain::service::CheckoutServiceImpl;
    use crate::checkout::repository::{LoanRepository, MockLoanRepository};
    use crate::checkout::repository::memory_loan_repository::MemoryLoanRepository;
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, LoanStatus};
    use crate::fees::domain::MockFeeService;
    use crate::fees::domain::model::FeeResult;
    use crate::fees::domain::service::FeeServiceImpl;
    use crate::utils::date::format_day;

    struct Fixture {
        checkout_svc: CheckoutServiceImpl,
        books: Arc<MemoryBookRepository>,
        loans: Arc<MemoryLoanRepository>,
    }

    fn fixture() -> Fixture {
        let config = Configuration::new("test");
        let books = Arc::new(MemoryBookRepository::new());
        let loans = Arc::new(MemoryLoanRepository::new());
        let fee_svc = Arc::new(FeeServiceImpl::new(&config, books.clone(), loans.clone()));
        Fixture {
            checkout_svc: CheckoutServiceImpl::new(&config, books.clone(), loans.clone(), fee_svc),
            books,
            loans,
        }
    }

    async fn add_book(books: &MemoryBookRepository, title: &str, isbn: &str, copies: i64) -> i64 {
        books.create(&BookEntity::new(title, "author", isbn, copies)).await.expect("should create book")
    }

    async fn available(books: &MemoryBookRepository, book_id: i64) -> i64 {
        books.get(book_id).await.expect("should get book").expect("should exist").available_copies
    }

    #[tokio::test]
    async fn test_should_borrow_and_return() {
        let f = fixture();
        let book_id = add_book(&f.books, "1984", "9780451524935", 1).await;
        let res = f.checkout_svc.return_book("123456", book_id).await;
        assert_eq!(Some("This book is not currently being borrowed by this patron.".to_string()),
                   res.err().map(|e| e.to_string()));

        let receipt = f.checkout_svc.borrow_book("123456", book_id).await.expect("should borrow");
        assert_eq!(format!("Successfully borrowed \"1984\". Due date: {}.", format_day(receipt.loan.due_at)), receipt.message);
        assert_eq!(receipt.loan.borrowed_at + Duration::days(14), receipt.loan.due_at);
        assert_eq!(0, available(&f.books, book_id).await);

        let res = f.checkout_svc.borrow_book("654321", book_id).await;
        assert!(matches!(res, Err(LibraryError::CurrentlyUnavailable { .. })));

        let returned = f.checkout_svc.return_book("123456", book_id).await.expect("should return");
        assert_eq!("Return processed for \"1984\". No late fees owed.", returned.message);
        assert_eq!(LoanStatus::Returned, returned.loan.loan_status);
        assert_eq!(1, available(&f.books, book_id).await);

        let res = f.checkout_svc.return_book("123456", book_id).await;
        assert_eq!(Some("This book is not currently being borrowed by this patron.".to_string()),
                   res.err().map(|e| e.to_string()));
        assert_eq!(1, available(&f.books, book_id).await);
    }

    #[tokio::test]
    async fn test_should_validate_borrow_request() {
        let f = fixture();
        let book_id = add_book(&f.books, "1984", "9780451524935", 1).await;
        let res = f.checkout_svc.borrow_book("12345", book_id).await;
        assert_eq!(Some("Invalid patron ID. Must be exactly 6 digits.".to_string()), res.err().map(|e| e.to_string()));
        let res = f.checkout_svc.borrow_book("123456", 99).await;
        assert_eq!(Some("Book not found.".to_string()), res.err().map(|e| e.to_string()));
        let res = f.checkout_svc.return_book("123456", 99).await;
        assert_eq!(Some("Book not found.".to_string()), res.err().map(|e| e.to_string()));
        assert_eq!(0, f.loans.count_active("123456").await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_enforce_borrowing_limit() {
        let f = fixture();
        for i in 0..5 {
            let book_id = add_book(&f.books, format!("title {}", i).as_str(), format!("978000000000{}", i).as_str(), 1).await;
            f.checkout_svc.borrow_book("123456", book_id).await.expect("should borrow");
        }
        let sixth = add_book(&f.books, "title 5", "9780000000005", 1).await;
        let res = f.checkout_svc.borrow_book("123456", sixth).await;
        assert_eq!(Some("You have reached the maximum borrowing limit of 5 books.".to_string()),
                   res.err().map(|e| e.to_string()));
        assert_eq!(1, available(&f.books, sixth).await);
        assert_eq!(5, f.loans.count_active("123456").await.expect("should count"));
        // another patron is not affected
        f.checkout_svc.borrow_book("654321", sixth).await.expect("should borrow");
    }

    #[tokio::test]
    async fn test_should_report_late_fee_on_return() {
        let f = fixture();
        let book_id = add_book(&f.books, "The Great Gatsby", "9780743273565", 3).await;
        let loan = LoanEntity::new("123456", book_id, Utc::now().naive_utc() - Duration::days(14 + 8), 14);
        f.loans.create(&loan).await.expect("should create loan");
        f.books.update_availability(book_id, -1).await.expect("should update");

        let returned = f.checkout_svc.return_book("123456", book_id).await.expect("should return");
        assert_eq!("Return processed for \"The Great Gatsby\". Late by 8 day(s). Fee due: $4.50.", returned.message);
        assert_eq!(dec!(4.50), returned.fee_amount);
        assert_eq!(3, available(&f.books, book_id).await);
    }

    #[tokio::test]
    async fn test_should_remove_loan_when_availability_update_fails() {
        let mut books = MockBookRepository::new();
        books.expect_get().returning(|id| {
            let mut book = BookEntity::new("1984", "George Orwell", "9780451524935", 1);
            book.book_id = id;
            Ok(Some(book))
        });
        books.expect_update_availability().returning(|_, _| Err(LibraryError::database("conditional check failed", None, false)));
        let loans = Arc::new(MemoryLoanRepository::new());
        let checkout_svc = CheckoutServiceImpl::new(&Configuration::new("test"), Arc::new(books),
                                                    loans.clone(), Arc::new(MockFeeService::new()));

        let res = checkout_svc.borrow_book("123456", 1).await;
        assert_eq!(Some("Database error occurred while updating book availability.".to_string()),
                   res.err().map(|e| e.to_string()));
        assert_eq!(0, loans.count_active("123456").await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_keep_availability_when_loan_insert_fails() {
        let mut books = MockBookRepository::new();
        books.expect_get().returning(|_| Ok(Some(BookEntity::new("1984", "George Orwell", "9780451524935", 1))));
        books.expect_update_availability().never();
        let mut loans = MockLoanRepository::new();
        loans.expect_count_active().returning(|_| Ok(0));
        loans.expect_create().returning(|_| Err(LibraryError::database("throttled", None, true)));
        let checkout_svc = CheckoutServiceImpl::new(&Configuration::new("test"), Arc::new(books),
                                                    Arc::new(loans), Arc::new(MockFeeService::new()));

        let res = checkout_svc.borrow_book("123456", 1).await;
        assert_eq!(Some("Database error occurred while creating borrow record.".to_string()),
                   res.err().map(|e| e.to_string()));
    }

    #[tokio::test]
    async fn test_should_reopen_loan_when_availability_update_fails() {
        let mut books = MockBookRepository::new();
        books.expect_get().returning(|_| Ok(Some(BookEntity::new("1984", "George Orwell", "9780451524935", 1))));
        books.expect_update_availability().returning(|_, _| Err(LibraryError::database("conditional check failed", None, false)));
        let loans = Arc::new(MemoryLoanRepository::new());
        loans.create(&LoanEntity::new("123456", 1, Utc::now().naive_utc(), 14)).await.expect("should create loan");
        let mut fee_svc = MockFeeService::new();
        fee_svc.expect_calculate_late_fee().returning(|_, _| Ok(FeeResult::new(dec!(0), 0)));
        let checkout_svc = CheckoutServiceImpl::new(&Configuration::new("test"), Arc::new(books),
                                                    loans.clone(), Arc::new(fee_svc));

        let res = checkout_svc.return_book("123456", 1).await;
        assert_eq!(Some("Database error occurred while updating book availability.".to_string()),
                   res.err().map(|e| e.to_string()));
        let active = loans.find_active("123456").await.expect("should query");
        assert_eq!(1, active.len());
        assert_eq!(None, active[0].returned_at);
    }

    #[tokio::test]
    async fn test_should_stop_return_when_fee_lookup_fails() {
        let mut books = MockBookRepository::new();
        books.expect_get().returning(|_| Ok(Some(BookEntity::new("1984", "George Orwell", "9780451524935", 1))));
        let mut loans = MockLoanRepository::new();
        loans.expect_close().never();
        let mut fee_svc = MockFeeService::new();
        fee_svc.expect_calculate_late_fee().returning(|_, _| Err(LibraryError::database("timeout", None, true)));
        let checkout_svc = CheckoutServiceImpl::new(&Configuration::new("test"), Arc::new(books),
                                                    Arc::new(loans), Arc::new(fee_svc));
        let res = checkout_svc.return_book("123456", 1).await;
        assert_eq!(Some("Unable to calculate late fees.".to_string()), res.err().map(|e| e.to_string()));
    }
}
