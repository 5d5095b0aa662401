use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const CARD_COLUMNS: &str =
    "card_id, user_id, card_name, card_number, card_type, expiry_date, card_color, created_at, updated_at";

/// Card row from database. `card_number` holds the obscured form.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BankCardRow {
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub card_name: String,
    pub card_number: String,
    pub card_type: String,
    pub expiry_date: String,
    pub card_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository for bank card operations. Every lookup and mutation except
/// [`BankCardRepo::list_by_user`] is scoped to `(card_id, user_id)`, so a
/// card owned by someone else behaves exactly like a card that does not
/// exist.
pub struct BankCardRepo;

impl BankCardRepo {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
        card_name: &str,
        card_number: &str,
        card_type: &str,
        expiry_date: &str,
        card_color: &str,
    ) -> Result<BankCardRow> {
        let row = sqlx::query_as::<_, BankCardRow>(&format!(
            r#"INSERT INTO bank_card (card_id, user_id, card_name, card_number, card_type, expiry_date, card_color)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {CARD_COLUMNS}"#,
        ))
        .bind(card_id)
        .bind(user_id)
        .bind(card_name)
        .bind(card_number)
        .bind(card_type)
        .bind(expiry_date)
        .bind(card_color)
        .fetch_one(pool)
        .await
        .context("Failed to create bank card")?;
        Ok(row)
    }

    /// All cards owned by `user_id`, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BankCardRow>> {
        let rows = sqlx::query_as::<_, BankCardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM bank_card WHERE user_id = $1 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
        .context("Failed to list bank cards")?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, card_id: Uuid, user_id: Uuid) -> Result<Option<BankCardRow>> {
        let row = sqlx::query_as::<_, BankCardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM bank_card WHERE card_id = $1 AND user_id = $2",
        ))
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get bank card")?;
        Ok(row)
    }

    /// Update the mutable card fields; number and type are immutable after
    /// creation. Returns `None` when no owned card matched.
    pub async fn update(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
        card_name: &str,
        expiry_date: &str,
        card_color: &str,
    ) -> Result<Option<BankCardRow>> {
        let row = sqlx::query_as::<_, BankCardRow>(&format!(
            r#"UPDATE bank_card
               SET card_name = $3, expiry_date = $4, card_color = $5, updated_at = NOW()
               WHERE card_id = $1 AND user_id = $2
               RETURNING {CARD_COLUMNS}"#,
        ))
        .bind(card_id)
        .bind(user_id)
        .bind(card_name)
        .bind(expiry_date)
        .bind(card_color)
        .fetch_optional(pool)
        .await
        .context("Failed to update bank card")?;
        Ok(row)
    }

    /// Returns false when no owned card matched.
    pub async fn delete(pool: &PgPool, card_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bank_card WHERE card_id = $1 AND user_id = $2")
            .bind(card_id)
            .bind(user_id)
            .execute(pool)
            .await
            .context("Failed to delete bank card")?;
        Ok(result.rows_affected() > 0)
    }
}
