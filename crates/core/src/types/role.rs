//! Roles and the role-capability descriptor.
//!
//! The three roles differ in which backend they talk to, which identity
//! parameter scopes their order queries, and which registration fields they
//! send. Those differences live in one [`RoleCapabilities`] table instead of
//! being re-branched in every component.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a role or transport type from its wire form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown transport type: {0}")]
    UnknownTransportType(String),
}

/// The three independent platform roles.
///
/// A profile's role is fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Courier,
    Restaurant,
}

impl Role {
    /// Wire/route spelling of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Courier => "courier",
            Self::Restaurant => "restaurant",
        }
    }

    /// The capability descriptor for this role.
    #[must_use]
    pub const fn capabilities(self) -> &'static RoleCapabilities {
        match self {
            Self::Customer => &CUSTOMER_CAPS,
            Self::Courier => &COURIER_CAPS,
            Self::Restaurant => &RESTAURANT_CAPS,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "courier" => Ok(Self::Courier),
            "restaurant" => Ok(Self::Restaurant),
            other => Err(RoleError::UnknownRole(other.to_string())),
        }
    }
}

/// Courier transport options offered at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    #[default]
    Bicycle,
    Car,
    Scooter,
    Foot,
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Bicycle => "bicycle",
            Self::Car => "car",
            Self::Scooter => "scooter",
            Self::Foot => "foot",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TransportType {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bicycle" => Ok(Self::Bicycle),
            "car" => Ok(Self::Car),
            "scooter" => Ok(Self::Scooter),
            "foot" => Ok(Self::Foot),
            other => Err(RoleError::UnknownTransportType(other.to_string())),
        }
    }
}

/// Extra fields a role's registration body carries beyond name, wallet
/// address, and password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationExtras {
    /// Body includes a delivery/business `address` field.
    pub address: bool,
    /// Body includes `status: true` (restaurant activation flag).
    pub active_flag: bool,
    /// Body includes a `transport_type` field.
    pub transport_type: bool,
}

/// Per-role behavior consumed by the gateway, order queries, and workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCapabilities {
    /// Query parameter naming this role's identity in order list requests.
    pub identity_param: &'static str,
    /// May browse the courier and restaurant directories.
    pub browse_directories: bool,
    /// May open the order creation workflow.
    pub create_orders: bool,
    /// May list and upload its own menu.
    pub manage_menu: bool,
    /// Registration body extras.
    pub registration: RegistrationExtras,
}

const CUSTOMER_CAPS: RoleCapabilities = RoleCapabilities {
    identity_param: "customer_id",
    browse_directories: true,
    create_orders: true,
    manage_menu: false,
    registration: RegistrationExtras {
        address: true,
        active_flag: false,
        transport_type: false,
    },
};

const COURIER_CAPS: RoleCapabilities = RoleCapabilities {
    identity_param: "courier_id",
    browse_directories: false,
    create_orders: false,
    manage_menu: false,
    registration: RegistrationExtras {
        address: false,
        active_flag: false,
        transport_type: true,
    },
};

const RESTAURANT_CAPS: RoleCapabilities = RoleCapabilities {
    identity_param: "restaurant_id",
    browse_directories: false,
    create_orders: false,
    manage_menu: true,
    registration: RegistrationExtras {
        address: true,
        active_flag: true,
        transport_type: false,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Customer, Role::Courier, Role::Restaurant] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_from_str_unknown() {
        assert_eq!(
            "driver".parse::<Role>(),
            Err(RoleError::UnknownRole("driver".to_string()))
        );
    }

    #[test]
    fn test_identity_param_per_role() {
        assert_eq!(Role::Customer.capabilities().identity_param, "customer_id");
        assert_eq!(Role::Courier.capabilities().identity_param, "courier_id");
        assert_eq!(
            Role::Restaurant.capabilities().identity_param,
            "restaurant_id"
        );
    }

    #[test]
    fn test_only_customer_creates_orders() {
        assert!(Role::Customer.capabilities().create_orders);
        assert!(!Role::Courier.capabilities().create_orders);
        assert!(!Role::Restaurant.capabilities().create_orders);
    }

    #[test]
    fn test_registration_extras() {
        assert!(Role::Customer.capabilities().registration.address);
        assert!(Role::Courier.capabilities().registration.transport_type);
        assert!(Role::Restaurant.capabilities().registration.active_flag);
        assert!(!Role::Courier.capabilities().registration.address);
    }

    #[test]
    fn test_transport_type_serde() {
        let json = serde_json::to_string(&TransportType::Scooter).expect("serialize");
        assert_eq!(json, "\"scooter\"");
    }
}
