//! Menu browsing and self-service management.

use mealdrop_client::services::menu::{MenuManagementService, MenuUploadForm};
use mealdrop_client::services::reference::{MenuRead, ReferenceDataService};
use mealdrop_client::ApiClient;
use mealdrop_core::{MenuItem, RestaurantId, Role};

use super::{load_env, require_session, CliError};

/// Show a restaurant's menu (customer browsing).
pub async fn show(restaurant_id: &str) -> Result<(), CliError> {
    let restaurant_id: RestaurantId = restaurant_id
        .trim()
        .parse()
        .map_err(|_| CliError::Command("Restaurant id must be a valid UUID.".to_string()))?;

    let (config, store) = load_env()?;
    require_session(&store, Role::Customer)?;

    let api = ApiClient::for_role(&config, Some(Role::Customer));
    let mut reference = ReferenceDataService::new(api);
    reference.load_menu(restaurant_id, MenuRead::Lookup).await;

    print_menu(&reference)
}

/// Upload a menu item as the signed-in restaurant, then re-list the menu.
pub async fn upload(
    name: String,
    description: String,
    price: String,
    quantity: String,
) -> Result<(), CliError> {
    let (config, store) = load_env()?;
    let profile = require_session(&store, Role::Restaurant)?;

    let api = ApiClient::for_role(&config, Some(Role::Restaurant));
    let mut reference = ReferenceDataService::new(api.clone());
    let mut menu = MenuManagementService::new(api, profile.id.as_restaurant());

    *menu.form_mut() = MenuUploadForm {
        name,
        description,
        price,
        quantity,
    };
    menu.upload_item(&mut reference).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Menu item uploaded.");
    }
    print_menu(&reference)
}

fn print_menu(reference: &ReferenceDataService) -> Result<(), CliError> {
    if let Some(message) = reference.menu().error() {
        return Err(CliError::Command(message.to_string()));
    }

    #[allow(clippy::print_stdout)]
    if let Some(menu) = reference.menu().ready() {
        if menu.is_empty() {
            println!("Menu is empty.");
        }
        for item in menu {
            print_item(item);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_item(item: &MenuItem) {
    println!(
        "{}  {:<24}  {:>8.2}  x{}  {}",
        item.id, item.name, item.price, item.quantity_available, item.description,
    );
}
