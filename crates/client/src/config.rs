//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with local-development defaults:
//! - `MEALDROP_CUSTOMER_API_URL` - customer backend base (default `http://localhost:8091`)
//! - `MEALDROP_COURIER_API_URL` - courier backend base (default `http://localhost:8090`)
//! - `MEALDROP_RESTAURANT_API_URL` - restaurant backend base (default `http://localhost:8092`)
//! - `MEALDROP_SESSION_FILE` - session blob path (default `.mealdrop/current_user.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use mealdrop_core::Role;

const DEFAULT_CUSTOMER_BASE: &str = "http://localhost:8091";
const DEFAULT_COURIER_BASE: &str = "http://localhost:8090";
const DEFAULT_RESTAURANT_BASE: &str = "http://localhost:8092";
const DEFAULT_SESSION_FILE: &str = ".mealdrop/current_user.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// The three per-role backend base URLs.
#[derive(Debug, Clone)]
pub struct ApiBases {
    pub customer: Url,
    pub courier: Url,
    pub restaurant: Url,
}

impl ApiBases {
    /// Resolve the base URL for a role.
    ///
    /// A missing role falls back to the customer base; every fetching
    /// component takes the resolved base as a dependency.
    #[must_use]
    pub const fn base_for(&self, role: Option<Role>) -> &Url {
        match role {
            Some(Role::Courier) => &self.courier,
            Some(Role::Restaurant) => &self.restaurant,
            Some(Role::Customer) | None => &self.customer,
        }
    }
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-role backend bases.
    pub bases: ApiBases,
    /// Path of the persisted session blob.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a base URL variable is set but does not
    /// parse as an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            bases: ApiBases {
                customer: get_url_or_default("MEALDROP_CUSTOMER_API_URL", DEFAULT_CUSTOMER_BASE)?,
                courier: get_url_or_default("MEALDROP_COURIER_API_URL", DEFAULT_COURIER_BASE)?,
                restaurant: get_url_or_default(
                    "MEALDROP_RESTAURANT_API_URL",
                    DEFAULT_RESTAURANT_BASE,
                )?,
            },
            session_file: PathBuf::from(get_env_or_default(
                "MEALDROP_SESSION_FILE",
                DEFAULT_SESSION_FILE,
            )),
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable as a URL, with a default.
fn get_url_or_default(key: &str, default: &str) -> Result<Url, ConfigError> {
    get_env_or_default(key, default)
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bases() -> ApiBases {
        ApiBases {
            customer: DEFAULT_CUSTOMER_BASE.parse().unwrap(),
            courier: DEFAULT_COURIER_BASE.parse().unwrap(),
            restaurant: DEFAULT_RESTAURANT_BASE.parse().unwrap(),
        }
    }

    #[test]
    fn test_base_for_each_role() {
        let bases = bases();
        assert_eq!(
            bases.base_for(Some(Role::Courier)).as_str(),
            "http://localhost:8090/"
        );
        assert_eq!(
            bases.base_for(Some(Role::Restaurant)).as_str(),
            "http://localhost:8092/"
        );
        assert_eq!(
            bases.base_for(Some(Role::Customer)).as_str(),
            "http://localhost:8091/"
        );
    }

    #[test]
    fn test_missing_role_falls_back_to_customer() {
        let bases = bases();
        assert_eq!(bases.base_for(None), &bases.customer);
    }
}
