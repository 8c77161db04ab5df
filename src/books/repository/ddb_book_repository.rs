use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::ddb::{number, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date};

// book_id 0 is reserved for the id sequence item
const SEQUENCE_ID: i64 = 0;

#[derive(Debug)]
pub(crate) struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    async fn next_book_id(&self) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number(SEQUENCE_ID))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", number(1))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await.map_err(LibraryError::from)?;
        match out.attributes() {
            Some(attrs) if parse_number_attribute("next_id", attrs) > SEQUENCE_ID => {
                Ok(parse_number_attribute("next_id", attrs))
            }
            _ => Err(LibraryError::database("failed to allocate book id", None, false)),
        }
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let mut row = entity.clone();
        row.book_id = self.next_book_id().await?;
        let val = serde_json::to_value(&row)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| row.book_id).map_err(LibraryError::from)
    }

    async fn get(&self, book_id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "book_id = :book_id",
            )
            .expression_attribute_values(
                ":book_id",
                number(book_id),
            )
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            let items = req.items().unwrap_or_default();
            if items.len() > 1 {
                return Err(LibraryError::database(format!("too many books for {}", book_id).as_str(), None, false));
            }
            Ok(items.first().map(map_to_book))
        })
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("isbn = :isbn")
            .expression_attribute_values(":isbn", AttributeValue::S(isbn.to_string()))
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            req.items().unwrap_or_default().first().map(map_to_book)
        })
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut exclusive_start_key = None;
        loop {
            let req = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .filter_expression("book_id > :sequence_id")
                .expression_attribute_values(":sequence_id", number(SEQUENCE_ID))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await.map_err(LibraryError::from)?;
            books.extend(req.items().unwrap_or_default().iter().map(map_to_book));
            match req.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(books)
    }

    async fn update_availability(&self, book_id: i64, delta: i64) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        let entity = self.get(book_id).await?.ok_or_else(|| LibraryError::not_found(
            format!("book not found for {}", book_id).as_str()))?;
        let available = entity.with_availability_delta(delta).ok_or_else(|| LibraryError::validation(
            format!("availability of book {} cannot change by {}", book_id, delta).as_str(), Some("400".to_string())))?;

        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number(book_id))
            .update_expression("SET version = :version, available_copies = :available_copies, updated_at = :updated_at")
            .expression_attribute_values(":old_version", number(entity.version))
            .expression_attribute_values(":version", number(entity.version + 1))
            .expression_attribute_values(":available_copies", number(available))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        version: parse_number_attribute("version", map),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        author: parse_string_attribute("author", map).unwrap_or_default(),
        isbn: parse_string_attribute("isbn", map).unwrap_or_default(),
        total_copies: parse_number_attribute("total_copies", map),
        available_copies: parse_number_attribute("available_copies", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
