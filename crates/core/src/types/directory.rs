//! Read-only directory entries for couriers and restaurants.
//!
//! Fetched transiently to populate workflow choices, never persisted beyond
//! the active workflow session.

use serde::{Deserialize, Serialize};

use crate::types::id::{CourierId, RestaurantId};

/// A courier directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierSummary {
    pub id: CourierId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

/// A restaurant directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}
