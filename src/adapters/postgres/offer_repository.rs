//! PostgreSQL implementation of OfferRepository.
//!
//! Every read joins `users` and `items` so offers carry display names.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, OfferId, Timestamp, UserId};
use crate::domain::offer::{NewOffer, Offer};
use crate::ports::OfferRepository;

const SELECT_JOINED: &str = r#"
    SELECT o.id, o.user_id, o.item_id, o.amount, o.created_at,
           u.name AS user_name, i.name AS item_name
    FROM offers o
    JOIN users u ON o.user_id = u.id
    JOIN items i ON o.item_id = i.id
"#;

/// PostgreSQL implementation of OfferRepository.
#[derive(Clone)]
pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        sql: &str,
        bind: Option<Bind<'_>>,
        what: &str,
    ) -> Result<Vec<Offer>, DomainError> {
        let query = sqlx::query_as::<_, OfferRow>(sql);
        let query = match bind {
            Some(Bind::Item(item_id)) => query.bind(item_id.as_str()),
            Some(Bind::User(user_id)) => query.bind(user_id.as_i32()),
            None => query,
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(what, e))?;

        rows.into_iter().map(OfferRow::into_offer).collect()
    }
}

enum Bind<'a> {
    Item(&'a ItemId),
    User(UserId),
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn insert(&self, offer: NewOffer) -> Result<Offer, DomainError> {
        let sql = r#"
            WITH inserted AS (
                INSERT INTO offers (user_id, item_id, amount)
                VALUES ($1, $2, $3)
                RETURNING id, user_id, item_id, amount, created_at
            )
            SELECT o.id, o.user_id, o.item_id, o.amount, o.created_at,
                   u.name AS user_name, i.name AS item_name
            FROM inserted o
            JOIN users u ON o.user_id = u.id
            JOIN items i ON o.item_id = i.id
        "#;

        let result = sqlx::query_as::<_, OfferRow>(sql)
            .bind(offer.user_id().as_i32())
            .bind(offer.item_id().as_str())
            .bind(offer.amount())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => row.into_offer(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(DomainError::new(
                    ErrorCode::ForeignKeyViolation,
                    "User or item doesn't exist",
                )
                .with_detail("user_id", offer.user_id().to_string())
                .with_detail("item_id", offer.item_id().as_str()))
            }
            Err(e) => Err(db_error("insert offer", e)),
        }
    }

    async fn find_by_id(&self, id: OfferId) -> Result<Option<Offer>, DomainError> {
        let sql = format!("{} WHERE o.id = $1", SELECT_JOINED);

        sqlx::query_as::<_, OfferRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch offer", e))?
            .map(OfferRow::into_offer)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        let sql = format!("{} ORDER BY o.created_at DESC", SELECT_JOINED);
        self.fetch_many(&sql, None, "list offers").await
    }

    async fn list_by_item(&self, item_id: &ItemId) -> Result<Vec<Offer>, DomainError> {
        let sql = format!(
            "{} WHERE o.item_id = $1 ORDER BY o.amount DESC, o.created_at ASC",
            SELECT_JOINED
        );
        self.fetch_many(&sql, Some(Bind::Item(item_id)), "list offers by item")
            .await
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Offer>, DomainError> {
        let sql = format!(
            "{} WHERE o.user_id = $1 ORDER BY o.created_at DESC",
            SELECT_JOINED
        );
        self.fetch_many(&sql, Some(Bind::User(user_id)), "list offers by user")
            .await
    }

    async fn highest_for_item(&self, item_id: &ItemId) -> Result<Option<Offer>, DomainError> {
        let sql = format!(
            "{} WHERE o.item_id = $1 ORDER BY o.amount DESC, o.created_at ASC LIMIT 1",
            SELECT_JOINED
        );

        sqlx::query_as::<_, OfferRow>(&sql)
            .bind(item_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch highest offer", e))?
            .map(OfferRow::into_offer)
            .transpose()
    }

    async fn delete(&self, id: OfferId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete offer", e))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
struct OfferRow {
    id: i32,
    user_id: i32,
    item_id: String,
    amount: Decimal,
    created_at: DateTime<Utc>,
    user_name: Option<String>,
    item_name: Option<String>,
}

impl OfferRow {
    fn into_offer(self) -> Result<Offer, DomainError> {
        let item_id = ItemId::new(self.item_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid item_id: {}", e))
        })?;

        Ok(Offer {
            id: OfferId::new(self.id),
            user_id: UserId::new(self.user_id),
            item_id,
            amount: self.amount,
            created_at: Timestamp::from_datetime(self.created_at),
            user_name: self.user_name,
            item_name: self.item_name,
        })
    }
}

pub(super) fn db_error(what: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", what, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item_id: &str) -> OfferRow {
        OfferRow {
            id: 3,
            user_id: 7,
            item_id: item_id.to_string(),
            amount: Decimal::new(12550, 2),
            created_at: Utc::now(),
            user_name: Some("alice".to_string()),
            item_name: None,
        }
    }

    #[test]
    fn row_maps_to_offer() {
        let offer = row("ITEM1").into_offer().unwrap();
        assert_eq!(offer.id, OfferId::new(3));
        assert_eq!(offer.user_id, UserId::new(7));
        assert_eq!(offer.item_id.as_str(), "ITEM1");
        assert_eq!(offer.amount, Decimal::new(12550, 2));
        assert_eq!(offer.user_name.as_deref(), Some("alice"));
        assert!(offer.item_name.is_none());
    }

    #[test]
    fn blank_item_id_in_row_is_a_database_error() {
        let err = row("").into_offer().unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn db_error_names_the_operation() {
        let err = db_error("delete offer", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to delete offer"));
    }
}
