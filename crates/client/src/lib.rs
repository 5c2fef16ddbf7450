//! Mealdrop Client - session and order-workflow orchestration.
//!
//! This crate is the client-side orchestration layer of the Mealdrop
//! platform: three independent roles (customer, courier, restaurant)
//! authenticate against per-role backend services and operate a shared order
//! lifecycle. It owns the expiring credential, role-scoped cancellable data
//! fetching, and the multi-step order creation/augmentation workflows.
//!
//! # Architecture
//!
//! - [`config`] - per-role base URLs and the session file path, from env
//! - [`api`] - thin JSON client over `reqwest`, one per resolved role base
//! - [`fetch`] - the [`fetch::Remote`] resource state and request supersession
//! - [`session`] - profile persistence and the expiry lifecycle monitor
//! - [`services`] - auth, order queries, reference data, menu management
//! - [`workflow`] - order creation and augmentation state machines
//!
//! The backends themselves (login/register, orders, couriers, restaurants,
//! menu) are external collaborators; only their request/response contracts
//! are encoded here. Rendering and navigation belong to whatever front end
//! drives this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod session;
pub mod services;
pub mod workflow;

pub use api::ApiClient;
pub use config::{ApiBases, ClientConfig, ConfigError};
pub use error::{ActionError, ApiError};
pub use fetch::{Remote, RequestToken, RequestTracker};
pub use session::{
    Clock, FileSessionStore, ManualClock, MemorySessionStore, Redirect, SessionMonitor,
    SessionState, SessionStore, SystemClock,
};
