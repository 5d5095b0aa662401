use crate::error::ServiceError;
use cardvault_common::card;
use cardvault_common::models::{CardView, SharedCardView};
use cardvault_common::share;
use cardvault_db::{BankCardRepo, BankCardRow};
use sqlx::PgPool;
use uuid::Uuid;

/// Card CRUD and share-link reads. Apart from [`CardService::shared`],
/// every operation acts on behalf of an authenticated owner.
pub struct CardService;

impl CardService {
    /// All cards owned by `user_id`, newest first, numbers revealed for
    /// display.
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<CardView>, ServiceError> {
        let rows = BankCardRepo::list_by_user(pool, user_id).await?;
        rows.into_iter().map(owner_view).collect()
    }

    /// Ownership-scoped lookup; `None` both when the card is absent and
    /// when it belongs to someone else.
    pub async fn get(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<CardView>, ServiceError> {
        match BankCardRepo::get(pool, card_id, user_id).await? {
            Some(row) => Ok(Some(owner_view(row)?)),
            None => Ok(None),
        }
    }

    /// Validate, classify and store a new card.
    pub async fn add(
        pool: &PgPool,
        user_id: Uuid,
        card_name: &str,
        card_number: &str,
        expiry_date: &str,
        card_color: &str,
    ) -> Result<CardView, ServiceError> {
        let clean = card::clean_number(card_number);
        if !card::validate_number(&clean) {
            return Err(ServiceError::InvalidCardNumber);
        }

        let network = card::network_of(&clean);
        let row = BankCardRepo::create(
            pool,
            Uuid::new_v4(),
            user_id,
            card_name,
            &card::obscure_number(&clean),
            network.as_str(),
            expiry_date,
            card_color,
        )
        .await?;

        // Build the response from the cleaned input instead of decoding the
        // row we just wrote; the stored form round-trips exactly anyway.
        Ok(CardView {
            id: row.card_id,
            card_name: row.card_name,
            card_number: card::format_number(&clean),
            card_type: row.card_type,
            expiry_date: row.expiry_date,
            card_color: row.card_color,
            created_at: row.created_at,
        })
    }

    /// Update name/expiry/color of an owned card. Number and network are
    /// immutable after creation.
    pub async fn update(
        pool: &PgPool,
        card_id: Uuid,
        user_id: Uuid,
        card_name: &str,
        expiry_date: &str,
        card_color: &str,
    ) -> Result<CardView, ServiceError> {
        let row = BankCardRepo::update(pool, card_id, user_id, card_name, expiry_date, card_color)
            .await?
            .ok_or(ServiceError::NotFound)?;
        owner_view(row)
    }

    /// Remove an owned card.
    pub async fn delete(pool: &PgPool, card_id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
        if !BankCardRepo::delete(pool, card_id, user_id).await? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    /// Anonymous read through a share token. The token itself is the
    /// authorization; a decodable token grants access to every card of the
    /// user id it names.
    pub async fn shared(pool: &PgPool, token: &str) -> Result<Vec<SharedCardView>, ServiceError> {
        let payload = share::decode_share_token(token).ok_or(ServiceError::InvalidToken)?;

        let rows = BankCardRepo::list_by_user(pool, payload.user_id).await?;
        rows.into_iter().map(shared_view).collect()
    }

    /// Mint a share token for `user_id`. Stateless: nothing is recorded and
    /// the token never expires.
    pub fn share_token(user_id: Uuid) -> String {
        share::encode_share_token(user_id)
    }
}

fn owner_view(row: BankCardRow) -> Result<CardView, ServiceError> {
    let number = card::reveal_number(&row.card_number)?;
    Ok(CardView {
        id: row.card_id,
        card_name: row.card_name,
        card_number: card::format_number(&number),
        card_type: row.card_type,
        expiry_date: row.expiry_date,
        card_color: row.card_color,
        created_at: row.created_at,
    })
}

fn shared_view(row: BankCardRow) -> Result<SharedCardView, ServiceError> {
    let number = card::reveal_number(&row.card_number)?;
    Ok(SharedCardView {
        id: row.card_id,
        card_name: row.card_name,
        card_number: card::format_number(&number),
        card_type: row.card_type,
        expiry_date: row.expiry_date,
    })
}
