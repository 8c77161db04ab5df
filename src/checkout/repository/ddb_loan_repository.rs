use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Select};
use chrono::{NaiveDateTime, Utc};

use crate::checkout::domain::model::LoanEntity;
use crate::checkout::repository::LoanRepository;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::utils::ddb::{number, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date};

#[derive(Debug)]
pub(crate) struct DDBLoanRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBLoanRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl LoanRepository for DDBLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(loan_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn delete(&self, loan_id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(loan_id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn count_active(&self, patron_id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .select(Select::Count)
            .key_condition_expression("patron_id = :patron_id AND loan_status = :loan_status")
            .expression_attribute_values(":patron_id", AttributeValue::S(patron_id.to_string()))
            .expression_attribute_values(":loan_status", AttributeValue::S(LoanStatus::Active.to_string()))
            .send()
            .await.map(|req| req.count().max(0) as usize).map_err(LibraryError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn find_active(&self, patron_id: &str) -> LibraryResult<Vec<LoanEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("patron_id = :patron_id AND loan_status = :loan_status")
            .expression_attribute_values(":patron_id", AttributeValue::S(patron_id.to_string()))
            .expression_attribute_values(":loan_status", AttributeValue::S(LoanStatus::Active.to_string()))
            .send()
            .await.map_err(LibraryError::from)?
            .items().unwrap_or_default().iter().map(LoanEntity::try_from).collect()
    }

    async fn close(&self, patron_id: &str, book_id: i64, returned_at: NaiveDateTime) -> LibraryResult<Option<LoanEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let active = self.find_active(patron_id).await?.into_iter().find(|l| l.book_id == book_id);
        let mut loan = match active {
            Some(loan) => loan,
            None => return Ok(None),
        };
        self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(loan.loan_id.clone()))
            .update_expression("SET version = :version, loan_status = :loan_status, returned_at = :returned_at, updated_at = :updated_at")
            .expression_attribute_values(":old_version", number(loan.version))
            .expression_attribute_values(":version", number(loan.version + 1))
            .expression_attribute_values(":loan_status", AttributeValue::S(LoanStatus::Returned.to_string()))
            .expression_attribute_values(":returned_at", string_date(returned_at))
            .expression_attribute_values(":updated_at", string_date(returned_at))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map_err(LibraryError::from)?;
        loan.version += 1;
        loan.loan_status = LoanStatus::Returned;
        loan.returned_at = Some(returned_at);
        loan.updated_at = returned_at;
        Ok(Some(loan))
    }

    async fn reopen(&self, loan_id: &str) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", AttributeValue::S(loan_id.to_string()))
            .update_expression("SET loan_status = :loan_status, returned_at = :returned_at, updated_at = :updated_at ADD version :one")
            .expression_attribute_values(":loan_status", AttributeValue::S(LoanStatus::Active.to_string()))
            .expression_attribute_values(":returned_at", AttributeValue::Null(true))
            .expression_attribute_values(":updated_at", string_date(now))
            .expression_attribute_values(":one", number(1))
            .condition_expression("attribute_exists(loan_id)")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }
}

// rows with a missing or unknown loan_status are rejected rather than treated as active
impl TryFrom<&HashMap<String, AttributeValue>> for LoanEntity {
    type Error = LibraryError;

    fn try_from(map: &HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        let loan_status = LoanStatus::try_from(parse_string_attribute("loan_status", map).unwrap_or_default().as_str())?;
        Ok(LoanEntity {
            loan_id: parse_string_attribute("loan_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            patron_id: parse_string_attribute("patron_id", map).unwrap_or_default(),
            book_id: parse_number_attribute("book_id", map),
            loan_status,
            borrowed_at: parse_date_attribute("borrowed_at", map).unwrap_or(Utc::now().naive_utc()),
            due_at: parse_date_attribute("due_at", map).unwrap_or(Utc::now().naive_utc()),
            returned_at: parse_date_attribute("returned_at", map),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        })
    }
}
