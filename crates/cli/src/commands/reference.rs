//! Directory listing commands (customer browsing).

use mealdrop_client::services::reference::ReferenceDataService;
use mealdrop_client::ApiClient;
use mealdrop_core::Role;

use super::{load_env, require_session, CliError};

/// List the courier directory.
pub async fn couriers() -> Result<(), CliError> {
    let (config, store) = load_env()?;
    require_session(&store, Role::Customer)?;

    let api = ApiClient::for_role(&config, Some(Role::Customer));
    let mut reference = ReferenceDataService::new(api);
    reference.load_couriers().await;

    if let Some(message) = reference.couriers().error() {
        return Err(CliError::Command(message.to_string()));
    }

    #[allow(clippy::print_stdout)]
    if let Some(couriers) = reference.couriers().ready() {
        if couriers.is_empty() {
            println!("No couriers registered.");
        }
        for courier in couriers {
            println!("{}  {}", courier.id, courier.name);
        }
    }
    Ok(())
}

/// List the restaurant directory.
pub async fn restaurants() -> Result<(), CliError> {
    let (config, store) = load_env()?;
    require_session(&store, Role::Customer)?;

    let api = ApiClient::for_role(&config, Some(Role::Customer));
    let mut reference = ReferenceDataService::new(api);
    reference.load_restaurants().await;

    if let Some(message) = reference.restaurants().error() {
        return Err(CliError::Command(message.to_string()));
    }

    #[allow(clippy::print_stdout)]
    if let Some(restaurants) = reference.restaurants().ready() {
        if restaurants.is_empty() {
            println!("No restaurants registered.");
        }
        for restaurant in restaurants {
            println!("{}  {}", restaurant.id, restaurant.name);
        }
    }
    Ok(())
}
