use base64ct::{Base64, Encoding};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of a card-sharing capability token.
///
/// The token is the base64 of this payload's JSON serialization. It is
/// deliberately unsigned and carries no expiry: whoever holds (or can
/// construct) the string can read the owner's cards, and the link stays
/// valid for the lifetime of the system. `issued_at` is recorded but never
/// checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub user_id: Uuid,
    pub issued_at: i64,
}

/// Encode a share token granting read access to all of `user_id`'s cards.
pub fn encode_share_token(user_id: Uuid) -> String {
    let payload = SharePayload {
        user_id,
        issued_at: Utc::now().timestamp(),
    };
    // Serializing a two-field struct of primitives cannot fail
    let json = serde_json::to_vec(&payload).expect("share payload serializes");
    Base64::encode_string(&json)
}

/// Best-effort decode of a share token; `None` on any structural failure.
pub fn decode_share_token(token: &str) -> Option<SharePayload> {
    let json = Base64::decode_vec(token).ok()?;
    serde_json::from_slice(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let user_id = Uuid::new_v4();
        let token = encode_share_token(user_id);
        let payload = decode_share_token(&token).expect("token should decode");
        assert_eq!(payload.user_id, user_id);
        assert!(payload.issued_at > 0);
    }

    #[test]
    fn test_corrupted_token_decodes_to_none() {
        let token = encode_share_token(Uuid::new_v4());
        let corrupted = format!("x{}", &token[1..]);
        // Either the base64 or the JSON layer fails; both map to None
        assert!(decode_share_token(&corrupted).is_none());
        assert!(decode_share_token("not a token").is_none());
        assert!(decode_share_token("").is_none());
    }

    #[test]
    fn test_garbage_json_decodes_to_none() {
        let token = Base64::encode_string(b"{\"wrong\": \"shape\"}");
        assert!(decode_share_token(&token).is_none());
    }

    #[test]
    fn test_token_is_forgeable_by_construction() {
        // No signature: anyone who knows the format can mint a token for an
        // arbitrary user id.
        let victim = Uuid::new_v4();
        let forged = Base64::encode_string(
            serde_json::to_vec(&SharePayload {
                user_id: victim,
                issued_at: 0,
            })
            .unwrap()
            .as_slice(),
        );
        assert_eq!(decode_share_token(&forged).unwrap().user_id, victim);
    }
}
