//! The authenticated profile held by the session store.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;
use crate::types::role::{Role, TransportType};

/// The authenticated identity and role context for the active session.
///
/// Created on successful login, immutable once issued except by replacement
/// on re-authentication. Serialized field names match the session blob the
/// backend login response produces, so `expiry` travels as `expiration` and
/// `delivery_address` as `address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub wallet_address: String,
    #[serde(rename = "address")]
    pub delivery_address: String,
    pub role: Role,
    /// Courier transport; absent for other roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,
    /// Restaurant activation flag; absent for other roles.
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub active_flag: Option<bool>,
    #[serde(rename = "token")]
    pub auth_token: String,
    /// Token expiry as epoch seconds.
    #[serde(rename = "expiration")]
    pub expiry: i64,
}

impl Profile {
    /// Token expiry in epoch milliseconds.
    #[must_use]
    pub const fn expiry_ms(&self) -> i64 {
        self.expiry * 1000
    }

    /// Milliseconds of validity left at `now_ms`; negative when expired.
    #[must_use]
    pub const fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.expiry_ms() - now_ms
    }

    /// Whether the token has expired at `now_ms`.
    #[must_use]
    pub const fn is_expired(&self, now_ms: i64) -> bool {
        self.remaining_ms(now_ms) <= 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample() -> Profile {
        Profile {
            id: UserId::new(Uuid::new_v4()),
            name: "Ada".to_string(),
            wallet_address: "0xabc".to_string(),
            delivery_address: "1 Main St".to_string(),
            role: Role::Customer,
            transport_type: None,
            active_flag: None,
            auth_token: "tok".to_string(),
            expiry: 1_700_000_000,
        }
    }

    #[test]
    fn test_expiry_math() {
        let profile = sample();
        let just_before = profile.expiry_ms() - 1;
        let at = profile.expiry_ms();

        assert!(!profile.is_expired(just_before));
        assert_eq!(profile.remaining_ms(just_before), 1);
        // `remaining <= 0` counts as expired, not merely `< 0`.
        assert!(profile.is_expired(at));
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("expiration").is_some());
        assert!(json.get("token").is_some());
        assert!(json.get("address").is_some());
        assert!(json.get("expiry").is_none());
        // Role-specific options are omitted entirely when absent.
        assert!(json.get("transport_type").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_round_trip() {
        let profile = sample();
        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
