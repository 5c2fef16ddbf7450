//! Core types for Mealdrop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod directory;
pub mod id;
pub mod menu;
pub mod order;
pub mod profile;
pub mod role;
pub mod status;

pub use directory::{CourierSummary, RestaurantSummary};
pub use id::*;
pub use menu::MenuItem;
pub use order::{Order, OrderItem, OrderItemInput};
pub use profile::Profile;
pub use role::{RegistrationExtras, Role, RoleCapabilities, RoleError, TransportType};
pub use status::{OrderStatus, StatusError};
