use std::sync::Arc;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, warn};
use crate::books::repository::BookRepository;
use crate::core::domain::{is_valid_patron_id, Configuration};
use crate::core::library::{store_failure, LibraryError, LibraryResult};
use crate::fees::domain::FeeService;
use crate::gateway::payment::{PaymentGateway, PaymentOutcome, RefundOutcome};
use crate::payments::domain::PaymentService;
use crate::payments::dto::{PaymentReceipt, RefundReceipt};

pub(crate) struct PaymentServiceImpl {
    max_late_fee: Decimal,
    book_repository: Arc<dyn BookRepository>,
    fee_service: Arc<dyn FeeService>,
    default_gateway: Arc<dyn PaymentGateway>,
}

impl PaymentServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>,
                      fee_service: Arc<dyn FeeService>, default_gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            max_late_fee: config.max_late_fee,
            book_repository,
            fee_service,
            default_gateway,
        }
    }
}

#[async_trait]
impl PaymentService for PaymentServiceImpl {
    async fn pay_late_fees(&self, patron_id: &str, book_id: i64,
                           gateway: Option<&dyn PaymentGateway>) -> LibraryResult<PaymentReceipt> {
        if !is_valid_patron_id(patron_id) {
            return Err(LibraryError::validation("Invalid patron ID. Must be exactly 6 digits.", Some("400".to_string())));
        }
        let fee = self.fee_service.calculate_late_fee(patron_id, book_id).await
            .map_err(|err| store_failure("Unable to calculate late fees.", err))?;
        if fee.fee_amount <= Decimal::ZERO {
            return Err(LibraryError::validation("No late fees to pay for this book.", None));
        }
        let book = self.book_repository.get(book_id).await
            .map_err(|err| store_failure("Database error occurred while looking up the book.", err))?
            .ok_or_else(|| LibraryError::not_found("Book not found."))?;

        let gateway = gateway.unwrap_or(self.default_gateway.as_ref());
        let description = format!("Late fees for '{}'", book.title);
        match gateway.process_payment(patron_id, fee.fee_amount, description.as_str()).await {
            PaymentOutcome::Approved { transaction_id, message } => {
                info!(patron_id, book_id, transaction_id = transaction_id.as_str(), "late fees paid");
                Ok(PaymentReceipt {
                    transaction_id,
                    amount: fee.fee_amount,
                    message: format!("Payment successful! {}", message),
                })
            }
            PaymentOutcome::Declined { message } => {
                Err(LibraryError::payment_declined(format!("Payment failed: {}", message).as_str()))
            }
            PaymentOutcome::Error { message } => {
                warn!(patron_id, book_id, message = message.as_str(), "payment gateway failed");
                Err(LibraryError::runtime(format!("Payment processing error: {}", message).as_str(), None))
            }
        }
    }

    async fn refund_late_fee_payment(&self, transaction_id: &str, amount: Decimal,
                                     gateway: Option<&dyn PaymentGateway>) -> LibraryResult<RefundReceipt> {
        if !transaction_id.starts_with("txn_") {
            return Err(LibraryError::validation("Invalid transaction ID.", Some("400".to_string())));
        }
        if amount <= Decimal::ZERO {
            return Err(LibraryError::validation("Refund amount must be greater than 0.", Some("400".to_string())));
        }
        if amount > self.max_late_fee {
            return Err(LibraryError::validation("Refund amount exceeds maximum late fee.", Some("400".to_string())));
        }

        let gateway = gateway.unwrap_or(self.default_gateway.as_ref());
        match gateway.refund_payment(transaction_id, amount).await {
            RefundOutcome::Approved { message } => {
                info!(transaction_id, "late fee refunded");
                Ok(RefundReceipt {
                    transaction_id: transaction_id.to_string(),
                    amount,
                    message,
                })
            }
            RefundOutcome::Declined { message } => {
                Err(LibraryError::payment_declined(format!("Refund failed: {}", message).as_str()))
            }
            RefundOutcome::Error { message } => {
                warn!(transaction_id, message = message.as_str(), "payment gateway failed");
                Err(LibraryError::runtime(format!("Refund processing error: {}", message).as_str(), None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::MockBookRepository;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::fees::domain::MockFeeService;
    use crate::fees::domain::model::{FeeResult, FeeStatus};
    use crate::gateway::payment::{MockPaymentGateway, PaymentOutcome, RefundOutcome};
    use crate::payments::domain::PaymentService;
    use crate::payments::domain::service::PaymentServiceImpl;

    fn fee_service(fee: FeeResult) -> MockFeeService {
        let mut fee_svc = MockFeeService::new();
        fee_svc.expect_calculate_late_fee().returning(move |_, _| Ok(fee.clone()));
        fee_svc
    }

    fn book_repository() -> MockBookRepository {
        let mut books = MockBookRepository::new();
        books.expect_get().returning(|_| Ok(Some(BookEntity::new("1984", "George Orwell", "9780451524935", 1))));
        books
    }

    fn build_service(fee_svc: MockFeeService, books: MockBookRepository) -> PaymentServiceImpl {
        let mut default_gateway = MockPaymentGateway::new();
        default_gateway.expect_process_payment().never();
        default_gateway.expect_refund_payment().never();
        PaymentServiceImpl::new(&Configuration::new("test"), Arc::new(books), Arc::new(fee_svc), Arc::new(default_gateway))
    }

    fn message<T>(res: Result<T, LibraryError>) -> Option<String> {
        res.err().map(|e| e.to_string())
    }

    #[tokio::test]
    async fn test_should_pay_late_fees() {
        let payment_svc = build_service(fee_service(FeeResult::new(dec!(4.50), 8)), book_repository());
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment()
            .with(eq("123456"), eq(dec!(4.50)), eq("Late fees for '1984'"))
            .times(1)
            .returning(|_, _, _| PaymentOutcome::Approved {
                transaction_id: "txn_123456_1".to_string(),
                message: "Payment of $4.50 processed successfully".to_string(),
            });
        let receipt = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await.expect("should pay");
        assert_eq!("txn_123456_1", receipt.transaction_id);
        assert_eq!(dec!(4.50), receipt.amount);
        assert_eq!("Payment successful! Payment of $4.50 processed successfully", receipt.message);
    }

    #[tokio::test]
    async fn test_should_map_declined_and_failed_payments() {
        let payment_svc = build_service(fee_service(FeeResult::new(dec!(15.00), 30)), book_repository());
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().times(1)
            .returning(|_, _, _| PaymentOutcome::Declined { message: "Insufficient funds".to_string() });
        let res = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await;
        assert_eq!(Some("Payment failed: Insufficient funds".to_string()), message(res));

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().times(1)
            .returning(|_, _, _| PaymentOutcome::Error { message: "Network timeout".to_string() });
        let res = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await;
        assert_eq!(Some("Payment processing error: Network timeout".to_string()), message(res));
    }

    #[tokio::test]
    async fn test_should_not_call_gateway_without_fee() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_process_payment().never();

        let payment_svc = build_service(MockFeeService::new(), MockBookRepository::new());
        let res = payment_svc.pay_late_fees("12345", 1, Some(&gateway)).await;
        assert_eq!(Some("Invalid patron ID. Must be exactly 6 digits.".to_string()), message(res));

        let payment_svc = build_service(fee_service(FeeResult::new(dec!(0.00), 0)), MockBookRepository::new());
        let res = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await;
        assert_eq!(Some("No late fees to pay for this book.".to_string()), message(res));

        let payment_svc = build_service(fee_service(FeeResult::none(FeeStatus::NotBorrowed)), MockBookRepository::new());
        let res = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await;
        assert_eq!(Some("No late fees to pay for this book.".to_string()), message(res));

        let mut fee_svc = MockFeeService::new();
        fee_svc.expect_calculate_late_fee().returning(|_, _| Err(LibraryError::database("timeout", None, true)));
        let payment_svc = build_service(fee_svc, MockBookRepository::new());
        let res = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await;
        assert_eq!(Some("Unable to calculate late fees.".to_string()), message(res));

        let mut books = MockBookRepository::new();
        books.expect_get().returning(|_| Ok(None));
        let payment_svc = build_service(fee_service(FeeResult::new(dec!(2.00), 4)), books);
        let res = payment_svc.pay_late_fees("123456", 1, Some(&gateway)).await;
        assert_eq!(Some("Book not found.".to_string()), message(res));
    }

    #[tokio::test]
    async fn test_should_refund_payment() {
        let payment_svc = build_service(MockFeeService::new(), MockBookRepository::new());
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_refund_payment()
            .with(eq("txn_123456_1"), eq(dec!(15.00)))
            .times(1)
            .returning(|_, _| RefundOutcome::Approved { message: "Refund of $15.00 processed successfully.".to_string() });
        let receipt = payment_svc.refund_late_fee_payment("txn_123456_1", dec!(15.00), Some(&gateway))
            .await.expect("should refund");
        assert_eq!("Refund of $15.00 processed successfully.", receipt.message);

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_refund_payment().times(1)
            .returning(|_, _| RefundOutcome::Declined { message: "Transaction already refunded".to_string() });
        let res = payment_svc.refund_late_fee_payment("txn_123456_1", dec!(5), Some(&gateway)).await;
        assert_eq!(Some("Refund failed: Transaction already refunded".to_string()), message(res));

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_refund_payment().times(1)
            .returning(|_, _| RefundOutcome::Error { message: "Gateway unavailable".to_string() });
        let res = payment_svc.refund_late_fee_payment("txn_123456_1", dec!(5), Some(&gateway)).await;
        assert_eq!(Some("Refund processing error: Gateway unavailable".to_string()), message(res));
    }

    #[tokio::test]
    async fn test_should_validate_refund_before_gateway() {
        let payment_svc = build_service(MockFeeService::new(), MockBookRepository::new());
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_refund_payment().never();
        for (transaction_id, amount, expected) in [
            ("123456", dec!(5), "Invalid transaction ID."),
            ("", dec!(5), "Invalid transaction ID."),
            ("txn_1", Decimal::ZERO, "Refund amount must be greater than 0."),
            ("txn_1", dec!(-3), "Refund amount must be greater than 0."),
            ("txn_1", dec!(15.01), "Refund amount exceeds maximum late fee."),
        ] {
            let res = payment_svc.refund_late_fee_payment(transaction_id, amount, Some(&gateway)).await;
            assert_eq!(Some(expected.to_string()), message(res));
        }
    }

    #[tokio::test]
    async fn test_should_use_default_gateway() {
        let mut default_gateway = MockPaymentGateway::new();
        default_gateway.expect_process_payment().times(1)
            .returning(|patron_id, _, _| PaymentOutcome::Approved {
                transaction_id: format!("txn_{}_2", patron_id),
                message: "ok".to_string(),
            });
        let payment_svc = PaymentServiceImpl::new(&Configuration::new("test"), Arc::new(book_repository()),
                                                  Arc::new(fee_service(FeeResult::new(dec!(1.50), 3))), Arc::new(default_gateway));
        let receipt = payment_svc.pay_late_fees("123456", 1, None).await.expect("should pay");
        assert_eq!("txn_123456_2", receipt.transaction_id);
    }
}
