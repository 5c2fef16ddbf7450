//! Login and registration commands.

use secrecy::SecretString;

use mealdrop_client::services::auth::{AuthService, RegisterForm};
use mealdrop_client::session::SessionStore;
use mealdrop_client::ApiClient;
use mealdrop_core::{Role, TransportType};

use super::{load_env, CliError};

/// Sign in and persist the resulting profile as the active session.
pub async fn login(role: Role, wallet_address: &str, password: String) -> Result<(), CliError> {
    let (config, store) = load_env()?;
    let api = ApiClient::for_role(&config, Some(role));
    let auth = AuthService::new(api, role);

    let password = SecretString::from(password);
    let profile = auth.login(wallet_address, &password).await?;
    store.save(&profile)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Signed in as {} ({role})", profile.name);
        println!("Session stored at {}", store.path().display());
    }
    Ok(())
}

/// Register a new account, then sign in with the same credentials.
pub async fn register(
    role: Role,
    name: String,
    wallet_address: String,
    password: String,
    address: String,
    transport: TransportType,
) -> Result<(), CliError> {
    let (config, store) = load_env()?;
    let api = ApiClient::for_role(&config, Some(role));
    let auth = AuthService::new(api, role);

    let form = RegisterForm {
        name,
        wallet_address,
        password: SecretString::from(password),
        address,
        transport_type: transport,
    };
    let profile = auth.register_and_login(&form).await?;
    store.save(&profile)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Registered and signed in as {} ({role})", profile.name);
    }
    Ok(())
}
