//! Command implementations.
//!
//! Every command loads configuration from the environment, builds the
//! role-scoped client pieces from `mealdrop-client`, and prints plain-text
//! results. Commands that act on behalf of a signed-in identity hydrate the
//! session monitor first; an absent, mismatched, or expired session aborts
//! the command with the redirect's message instead of hitting the backend.

pub mod auth;
pub mod menu;
pub mod orders;
pub mod reference;
pub mod session;
pub mod workflow;

use std::sync::Arc;

use thiserror::Error;

use mealdrop_client::session::{Redirect, SessionMonitor, SystemClock};
use mealdrop_client::{
    ActionError, ApiError, ClientConfig, ConfigError, FileSessionStore,
};
use mealdrop_core::{Profile, Role};

/// Errors a command can surface.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] mealdrop_client::session::SessionStoreError),

    /// Backend or validation failure, already reduced to its user message.
    #[error("{0}")]
    Command(String),

    #[error("no {0} session; run `mealdrop login --role {0}` first")]
    NotSignedIn(Role),

    #[error("stored session belongs to another role; run `mealdrop session show` to inspect it")]
    RoleMismatch,

    #[error("session expired, run `mealdrop login --role {0}` to sign in again")]
    SessionExpired(Role),
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::Command(e.user_message())
    }
}

impl From<ActionError> for CliError {
    fn from(e: ActionError) -> Self {
        Self::Command(e.message().to_string())
    }
}

/// Config plus the file-backed session store it names.
pub fn load_env() -> Result<(ClientConfig, FileSessionStore), CliError> {
    let config = ClientConfig::from_env()?;
    let store = FileSessionStore::new(config.session_file.clone());
    Ok((config, store))
}

/// Hydrate the session for `role`, failing the command on any redirect.
pub fn require_session(store: &FileSessionStore, role: Role) -> Result<Profile, CliError> {
    let mut monitor = SessionMonitor::new(
        Arc::new(store.clone()),
        Arc::new(SystemClock),
        role,
    );
    match monitor.hydrate() {
        None => monitor
            .profile()
            .cloned()
            .ok_or(CliError::NotSignedIn(role)),
        Some(Redirect::RolePicker) => Err(CliError::RoleMismatch),
        Some(Redirect::Login { notice: Some(_), .. }) => Err(CliError::SessionExpired(role)),
        Some(Redirect::Login { .. }) => Err(CliError::NotSignedIn(role)),
    }
}
