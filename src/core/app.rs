use crate::catalog::command::add_book_cmd::AddBookCommand;
use crate::catalog::command::search_books_cmd::SearchBooksCommand;
use crate::catalog::factory::create_catalog_service;
use crate::catalog::seed::seed_sample_data;
use crate::checkout::command::checkout_book_cmd::CheckoutBookCommand;
use crate::checkout::command::return_book_cmd::ReturnBookCommand;
use crate::checkout::factory::create_checkout_service;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::{Repositories, RepositoryStore};
use crate::fees::command::calculate_fee_cmd::CalculateLateFeeCommand;
use crate::fees::factory::create_fee_service;
use crate::patrons::command::get_patron_report_cmd::GetPatronReportCommand;
use crate::patrons::factory::create_patron_service;
use crate::payments::command::pay_late_fees_cmd::PayLateFeesCommand;
use crate::payments::command::refund_late_fee_cmd::RefundLateFeeCommand;
use crate::payments::factory::create_payment_service;

// AppState wires the commands of one library branch to a shared set of repositories.
pub struct AppState {
    pub config: Configuration,
    pub repositories: Repositories,
    pub add_book: AddBookCommand,
    pub search_books: SearchBooksCommand,
    pub checkout_book: CheckoutBookCommand,
    pub return_book: ReturnBookCommand,
    pub calculate_late_fee: CalculateLateFeeCommand,
    pub patron_report: GetPatronReportCommand,
    pub pay_late_fees: PayLateFeesCommand,
    pub refund_late_fee: RefundLateFeeCommand,
}

impl AppState {
    pub async fn new(branch: &str, store: RepositoryStore) -> AppState {
        let repositories = Repositories::create(store).await;
        AppState::build(Configuration::new(branch), repositories)
    }

    pub fn build(config: Configuration, repositories: Repositories) -> AppState {
        let catalog_svc = create_catalog_service(&config, &repositories);
        let checkout_svc = create_checkout_service(&config, &repositories);
        let payment_svc = create_payment_service(&config, &repositories);
        AppState {
            add_book: AddBookCommand::new(catalog_svc.clone()),
            search_books: SearchBooksCommand::new(catalog_svc),
            checkout_book: CheckoutBookCommand::new(checkout_svc.clone()),
            return_book: ReturnBookCommand::new(checkout_svc),
            calculate_late_fee: CalculateLateFeeCommand::new(create_fee_service(&config, &repositories)),
            patron_report: GetPatronReportCommand::new(create_patron_service(&config, &repositories)),
            pay_late_fees: PayLateFeesCommand::new(payment_svc.clone()),
            refund_late_fee: RefundLateFeeCommand::new(payment_svc),
            config,
            repositories,
        }
    }

    pub async fn seed(&self) -> LibraryResult<usize> {
        seed_sample_data(&self.config, &self.repositories).await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use crate::catalog::command::add_book_cmd::AddBookCommandRequest;
    use crate::catalog::command::search_books_cmd::SearchBooksCommandRequest;
    use crate::checkout::command::checkout_book_cmd::CheckoutBookCommandRequest;
    use crate::checkout::command::return_book_cmd::ReturnBookCommandRequest;
    use crate::core::app::AppState;
    use crate::core::command::Command;
    use crate::core::repository::RepositoryStore;
    use crate::fees::command::calculate_fee_cmd::CalculateLateFeeCommandRequest;
    use crate::patrons::command::get_patron_report_cmd::GetPatronReportCommandRequest;
    use crate::payments::command::pay_late_fees_cmd::PayLateFeesCommandRequest;
    use crate::payments::command::refund_late_fee_cmd::RefundLateFeeCommandRequest;

    async fn add_book(app: &AppState, title: &str, isbn: &str, copies: i64) -> i64 {
        let reply = app.add_book.execute(AddBookCommandRequest::new(title, "Test Author", isbn, copies)).await;
        assert!(reply.success, "{}", reply.message);
        reply.data.expect("should carry book").book_id
    }

    #[tokio::test]
    async fn test_should_borrow_and_return_book() {
        let app = AppState::new("test", RepositoryStore::InMemory).await;
        let book_id = add_book(&app, "The Great Gatsby", "9780743273565", 3).await;

        let reply = app.checkout_book.execute(CheckoutBookCommandRequest::new("123456", book_id)).await;
        assert!(reply.success, "{}", reply.message);
        let book = app.repositories.books.get(book_id).await.expect("should load").expect("should exist");
        assert_eq!(2, book.available_copies);

        let reply = app.return_book.execute(ReturnBookCommandRequest::new("123456", book_id)).await;
        assert!(reply.success, "{}", reply.message);
        assert!(reply.message.ends_with("No late fees owed."));
        let book = app.repositories.books.get(book_id).await.expect("should load").expect("should exist");
        assert_eq!(3, book.available_copies);

        let reply = app.return_book.execute(ReturnBookCommandRequest::new("123456", book_id)).await;
        assert!(!reply.success);
        assert_eq!("This book is not currently being borrowed by this patron.", reply.message);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn() {
        let app = AppState::new("test", RepositoryStore::InMemory).await;
        add_book(&app, "1984", "9780451524935", 1).await;
        let reply = app.add_book.execute(AddBookCommandRequest::new("Nineteen Eighty-Four", "George Orwell", "9780451524935", 4)).await;
        assert!(!reply.success);
        assert_eq!("A book with this ISBN already exists.", reply.message);
        let books = app.repositories.books.find_all().await.expect("should list");
        assert_eq!(1, books.len());
        assert_eq!(1, books[0].total_copies);
    }

    #[tokio::test]
    async fn test_should_stop_at_borrowing_limit() {
        let app = AppState::new("test", RepositoryStore::InMemory).await;
        let mut book_ids = vec![];
        for i in 0..6 {
            book_ids.push(add_book(&app, format!("Book {}", i).as_str(), format!("978000000000{}", i).as_str(), 1).await);
        }
        for book_id in &book_ids[..5] {
            let reply = app.checkout_book.execute(CheckoutBookCommandRequest::new("222222", *book_id)).await;
            assert!(reply.success, "{}", reply.message);
        }
        let reply = app.checkout_book.execute(CheckoutBookCommandRequest::new("222222", book_ids[5])).await;
        assert!(!reply.success);
        assert_eq!("You have reached the maximum borrowing limit of 5 books.", reply.message);

        let reply = app.patron_report.execute(GetPatronReportCommandRequest::new("222222")).await;
        let report = reply.data.expect("should carry report");
        assert_eq!(5, report.borrowed_count);
        assert_eq!(0, report.remaining_allowance);
    }

    #[tokio::test]
    async fn test_should_report_on_seeded_library() {
        let app = AppState::new("test", RepositoryStore::InMemory).await;
        assert_eq!(3, app.seed().await.expect("should seed"));
        assert_eq!(0, app.seed().await.expect("should skip seeding"));

        let reply = app.search_books.execute(SearchBooksCommandRequest::new("orwell", "author")).await;
        let found = reply.data.expect("should carry books");
        assert_eq!(1, found.len());
        let book_id = found[0].book_id;
        assert_eq!(0, found[0].available_copies);

        let reply = app.patron_report.execute(GetPatronReportCommandRequest::new("123456")).await;
        assert!(reply.success);
        let report = reply.data.expect("should carry report");
        assert_eq!(1, report.borrowed_count);
        assert_eq!(4, report.remaining_allowance);
        assert_eq!(0, report.overdue_count);
        assert_eq!(Some(report.borrowed_books[0].due_at.clone()), report.next_due_date);

        let reply = app.calculate_late_fee.execute(CalculateLateFeeCommandRequest::new("123456", book_id)).await;
        assert!(reply.success);
        assert_eq!(Some(dec!(0)), reply.data.map(|f| f.fee_amount));

        let reply = app.pay_late_fees.execute(PayLateFeesCommandRequest::new("123456", book_id)).await;
        assert!(!reply.success);
        assert_eq!("No late fees to pay for this book.", reply.message);

        let reply = app.refund_late_fee.execute(RefundLateFeeCommandRequest::new("txn_123456_1700000000", dec!(2.50))).await;
        assert!(reply.success, "{}", reply.message);
    }
}
