//! Order lifecycle status.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing an order status from its wire form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct StatusError(pub String);

/// Server-side order lifecycle status.
///
/// The client never advances an order's status itself; it only submits new
/// orders as [`OrderStatus::Created`] and filters lists by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Created,
    Pending,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Wire spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Pending => "pending",
            Self::Delivering => "delivering",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// All statuses, in lifecycle order. Used to populate filter choices.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Created,
            Self::Pending,
            Self::Delivering,
            Self::Delivered,
            Self::Cancelled,
        ]
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "pending" => Ok(Self::Pending),
            "delivering" => Ok(Self::Delivering),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in OrderStatus::all() {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_wire_form_is_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Delivering).expect("serialize");
        assert_eq!(json, "\"delivering\"");
    }
}
