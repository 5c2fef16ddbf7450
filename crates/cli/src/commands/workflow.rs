//! Order creation and augmentation commands.
//!
//! These drive the library's workflow state machines end to end in one shot:
//! choose, load the menu, set quantities, submit. Validation failures are
//! reported without any request leaving the machine.

use mealdrop_client::services::orders::OrderQueryService;
use mealdrop_client::services::reference::ReferenceDataService;
use mealdrop_client::workflow::{OrderAugmentationWorkflow, OrderCreationWorkflow};
use mealdrop_client::ApiClient;
use mealdrop_core::{CourierId, MenuItemId, OrderId, RestaurantId, Role};

use super::{load_env, require_session, CliError};

/// One `--item id:quantity` argument.
pub fn parse_item(raw: &str) -> Result<(MenuItemId, u32), String> {
    let (id, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <menu-item-uuid>:<quantity>, got `{raw}`"))?;
    let id: MenuItemId = id
        .trim()
        .parse()
        .map_err(|_| format!("`{id}` is not a valid menu item UUID"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("`{quantity}` is not a valid quantity"))?;
    Ok((id, quantity))
}

/// Create an order as the signed-in customer.
pub async fn create(
    courier: CourierId,
    restaurant: RestaurantId,
    items: Vec<(MenuItemId, u32)>,
) -> Result<(), CliError> {
    let (config, store) = load_env()?;
    let profile = require_session(&store, Role::Customer)?;

    let api = ApiClient::for_role(&config, Some(Role::Customer));
    let mut reference = ReferenceDataService::new(api.clone());
    let mut orders = OrderQueryService::new(api.clone(), Role::Customer, profile.id);
    let mut workflow = OrderCreationWorkflow::new(api, profile.id.as_customer());

    workflow.choose_courier(courier);
    workflow.choose_restaurant(restaurant, &mut reference);
    workflow.load_menu(&mut reference).await?;
    if let Some(message) = reference.menu().error() {
        return Err(CliError::Command(message.to_string()));
    }
    for (item, quantity) in items {
        workflow.set_quantity(item, quantity);
    }

    let order = workflow.submit(&mut reference, &mut orders).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Order created: {}", order.id);
    }
    Ok(())
}

/// Add one item to an existing order.
pub async fn add_item(
    order_id: OrderId,
    restaurant: &str,
    item: MenuItemId,
    quantity: u32,
) -> Result<(), CliError> {
    let (config, store) = load_env()?;
    require_session(&store, Role::Customer)?;

    let api = ApiClient::for_role(&config, Some(Role::Customer));
    let mut reference = ReferenceDataService::new(api.clone());
    let mut workflow = OrderAugmentationWorkflow::new(api, order_id);

    workflow.enter_restaurant(restaurant, &mut reference)?;
    workflow.load_menu(&mut reference).await?;
    if let Some(message) = reference.menu().error() {
        return Err(CliError::Command(message.to_string()));
    }
    workflow.set_quantity(item, quantity);
    workflow.submit(&mut reference).await?;

    #[allow(clippy::print_stdout)]
    if let Some(confirmation) = workflow.confirmation() {
        println!("{confirmation}");
    }
    Ok(())
}
