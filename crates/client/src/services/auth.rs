//! Login and registration against the role backend.
//!
//! Registration bodies vary by role: customer and restaurant carry an
//! `address`, restaurant additionally `status: true`, courier a
//! `transport_type`. Which extras apply comes from the role capability
//! table, not per-call branching. Registering does not create a session;
//! callers chain [`AuthService::login`] with the same credentials.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use mealdrop_core::{Profile, Role, TransportType, UserId};

use crate::api::ApiClient;
use crate::error::ApiError;

const LOGIN_FALLBACK: &str = "Invalid wallet address or password";
const REGISTER_FALLBACK: &str = "Failed to register";

/// Authentication operations for one role backend.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    role: Role,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    wallet_address: &'a str,
    password: &'a str,
}

/// `POST /login` response. Backends differ in which optional fields they
/// return, so everything beyond the token is defaulted.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    id: UserId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    wallet_address: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    transport_type: Option<TransportType>,
    #[serde(default)]
    status: Option<bool>,
    token: String,
    #[serde(default)]
    expiration: Option<i64>,
}

/// Registration input; role-specific extras are applied from the capability
/// table when the body is built.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub wallet_address: String,
    pub password: SecretString,
    /// Delivery/business address; ignored for roles that don't send one.
    pub address: String,
    /// Courier transport; ignored for other roles.
    pub transport_type: TransportType,
}

impl AuthService {
    #[must_use]
    pub const fn new(api: ApiClient, role: Role) -> Self {
        Self { api, role }
    }

    /// `POST {base}/login` and shape the response into a [`Profile`] stamped
    /// with this service's role.
    ///
    /// # Errors
    ///
    /// `ApiError::Api` carries the server's `error_message` verbatim, or
    /// the generic invalid-credentials fallback.
    #[instrument(skip(self, password), fields(role = %self.role))]
    pub async fn login(
        &self,
        wallet_address: &str,
        password: &SecretString,
    ) -> Result<Profile, ApiError> {
        let body = LoginBody {
            wallet_address,
            password: password.expose_secret(),
        };
        let response: LoginResponse = self.api.post_json("login", &body, LOGIN_FALLBACK).await?;
        Ok(profile_from_login(self.role, wallet_address, response))
    }

    /// `POST {base}/register` with the role-appropriate body.
    ///
    /// # Errors
    ///
    /// `ApiError::Api` carries the server's `error_message` verbatim, or
    /// the generic registration fallback.
    #[instrument(skip(self, form), fields(role = %self.role))]
    pub async fn register(&self, form: &RegisterForm) -> Result<(), ApiError> {
        let body = register_body(self.role, form);
        self.api.post_unit("register", &body, REGISTER_FALLBACK).await
    }

    /// Register, then log in with the same credentials.
    ///
    /// # Errors
    ///
    /// Either step's `ApiError`.
    pub async fn register_and_login(&self, form: &RegisterForm) -> Result<Profile, ApiError> {
        self.register(form).await?;
        self.login(&form.wallet_address, &form.password).await
    }
}

/// Build the role-specific registration body.
fn register_body(role: Role, form: &RegisterForm) -> Value {
    let extras = role.capabilities().registration;
    let mut body = Map::new();
    body.insert("name".to_string(), Value::String(form.name.clone()));
    body.insert(
        "wallet_address".to_string(),
        Value::String(form.wallet_address.clone()),
    );
    body.insert(
        "password".to_string(),
        Value::String(form.password.expose_secret().to_string()),
    );
    if extras.address {
        body.insert("address".to_string(), Value::String(form.address.clone()));
    }
    if extras.active_flag {
        body.insert("status".to_string(), Value::Bool(true));
    }
    if extras.transport_type {
        body.insert(
            "transport_type".to_string(),
            Value::String(form.transport_type.to_string()),
        );
    }
    Value::Object(body)
}

/// Fold the login response into a profile, falling back to the entered
/// wallet address for fields the backend left blank.
fn profile_from_login(role: Role, wallet_address: &str, response: LoginResponse) -> Profile {
    Profile {
        id: response.id,
        name: response
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| wallet_address.to_string()),
        wallet_address: response
            .wallet_address
            .unwrap_or_else(|| wallet_address.to_string()),
        delivery_address: response.address.unwrap_or_default(),
        role,
        transport_type: response.transport_type,
        active_flag: response.status,
        auth_token: response.token,
        expiry: response.expiration.unwrap_or(0),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn form() -> RegisterForm {
        RegisterForm {
            name: "Ada".to_string(),
            wallet_address: "0xabc".to_string(),
            password: SecretString::from("hunter2hunter2"),
            address: "1 Main St".to_string(),
            transport_type: TransportType::Scooter,
        }
    }

    #[test]
    fn test_customer_register_body() {
        let body = register_body(Role::Customer, &form());
        let object = body.as_object().unwrap();
        assert_eq!(object.get("address").unwrap(), "1 Main St");
        assert!(object.get("status").is_none());
        assert!(object.get("transport_type").is_none());
    }

    #[test]
    fn test_restaurant_register_body_sets_status_true() {
        let body = register_body(Role::Restaurant, &form());
        let object = body.as_object().unwrap();
        assert_eq!(object.get("status").unwrap(), true);
        assert_eq!(object.get("address").unwrap(), "1 Main St");
    }

    #[test]
    fn test_courier_register_body_sends_transport_only() {
        let body = register_body(Role::Courier, &form());
        let object = body.as_object().unwrap();
        assert_eq!(object.get("transport_type").unwrap(), "scooter");
        assert!(object.get("address").is_none());
        assert!(object.get("status").is_none());
    }

    #[test]
    fn test_profile_from_login_falls_back_to_wallet() {
        let response = LoginResponse {
            id: UserId::new(Uuid::new_v4()),
            name: None,
            wallet_address: None,
            address: None,
            transport_type: None,
            status: None,
            token: "tok".to_string(),
            expiration: None,
        };
        let profile = profile_from_login(Role::Customer, "0xabc", response);
        assert_eq!(profile.name, "0xabc");
        assert_eq!(profile.wallet_address, "0xabc");
        assert_eq!(profile.expiry, 0);
        assert_eq!(profile.role, Role::Customer);
    }

    #[test]
    fn test_profile_from_login_decodes_full_response() {
        let raw = format!(
            r#"{{
                "id": "{}",
                "name": "Casa Mia",
                "wallet_address": "0xdef",
                "address": "2 Side St",
                "status": true,
                "token": "tok",
                "expiration": 1700000000
            }}"#,
            Uuid::new_v4()
        );
        let response: LoginResponse = serde_json::from_str(&raw).unwrap();
        let profile = profile_from_login(Role::Restaurant, "0xdef", response);
        assert_eq!(profile.name, "Casa Mia");
        assert_eq!(profile.active_flag, Some(true));
        assert_eq!(profile.expiry, 1_700_000_000);
    }
}
