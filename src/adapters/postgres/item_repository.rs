//! PostgreSQL implementation of ItemRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::catalog::{Item, ItemDetails, NewItem};
use crate::domain::foundation::{DomainError, ErrorCode, ItemId, Timestamp};
use crate::ports::ItemRepository;

use super::offer_repository::db_error;

const ITEM_COLUMNS: &str = "id, name, description, base_price, status, created_at";

#[derive(Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn insert(&self, item: NewItem) -> Result<Item, DomainError> {
        let sql = format!(
            "INSERT INTO items (id, name, description, base_price, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ITEM_COLUMNS
        );

        let result = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(item.id.as_str())
            .bind(item.details.name())
            .bind(item.details.description())
            .bind(item.details.base_price())
            .bind(item.details.status())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => row.into_item(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DomainError::new(ErrorCode::Conflict, format!("item {}", item.id))
                    .with_detail("item_id", item.id.as_str()),
            ),
            Err(e) => Err(db_error("insert item", e)),
        }
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        let sql = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);

        sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch item", e))?
            .map(ItemRow::into_item)
            .transpose()
    }

    async fn list(&self, status: Option<&str>) -> Result<Vec<Item>, DomainError> {
        let rows = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {} FROM items WHERE status = $1 ORDER BY created_at DESC",
                    ITEM_COLUMNS
                );
                sqlx::query_as::<_, ItemRow>(&sql)
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!("SELECT {} FROM items ORDER BY created_at DESC", ITEM_COLUMNS);
                sqlx::query_as::<_, ItemRow>(&sql).fetch_all(&self.pool).await
            }
        }
        .map_err(|e| db_error("list items", e))?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    async fn update(&self, id: &ItemId, details: ItemDetails) -> Result<Option<Item>, DomainError> {
        let sql = format!(
            "UPDATE items SET name = $2, description = $3, base_price = $4, status = $5 \
             WHERE id = $1 RETURNING {}",
            ITEM_COLUMNS
        );

        sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id.as_str())
            .bind(details.name())
            .bind(details.description())
            .bind(details.base_price())
            .bind(details.status())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update item", e))?
            .map(ItemRow::into_item)
            .transpose()
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete item", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    description: Option<String>,
    base_price: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> Result<Item, DomainError> {
        let id = ItemId::new(self.id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid item id: {}", e))
        })?;

        Ok(Item {
            id,
            name: self.name,
            description: self.description,
            base_price: self.base_price,
            status: self.status,
            created_at: Timestamp::from_datetime(self.created_at),
        })
    }
}
