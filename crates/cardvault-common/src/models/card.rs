use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card as returned to its owner: number revealed and formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: Uuid,
    pub card_name: String,
    pub card_number: String,
    pub card_type: String,
    pub expiry_date: String,
    pub card_color: String,
    pub created_at: DateTime<Utc>,
}

/// Card as exposed through a share link: no color, no creation time, and
/// nothing identifying the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCardView {
    pub id: Uuid,
    pub card_name: String,
    pub card_number: String,
    pub card_type: String,
    pub expiry_date: String,
}
