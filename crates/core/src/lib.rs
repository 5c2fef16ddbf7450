//! Mealdrop Core - Shared types library.
//!
//! This crate provides common types used across all Mealdrop components:
//! - `client` - Session, fetch, and workflow orchestration library
//! - `cli` - Command-line driver
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! Wire-facing structs carry serde renames so that their JSON shape matches
//! the backend contract exactly; everything else is plain Rust naming.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, roles, order/menu models, and the profile

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
