//! Order list command.

use mealdrop_client::services::orders::OrderQueryService;
use mealdrop_client::ApiClient;
use mealdrop_core::{OrderStatus, Role};

use super::{load_env, require_session, CliError};

/// List the signed-in identity's orders, optionally filtered by status.
pub async fn list(role: Role, status: Option<OrderStatus>) -> Result<(), CliError> {
    let (config, store) = load_env()?;
    let profile = require_session(&store, role)?;

    let api = ApiClient::for_role(&config, Some(role));
    let mut orders = OrderQueryService::new(api, role, profile.id);
    orders.set_status_filter(status);
    orders.refresh().await;

    if let Some(message) = orders.error() {
        return Err(CliError::Command(message.to_string()));
    }

    #[allow(clippy::print_stdout)]
    {
        if orders.orders().is_empty() {
            println!("No orders.");
            return Ok(());
        }
        for order in orders.orders() {
            println!(
                "{}  {:<10}  {} item(s)  created {}",
                order.id,
                order.status,
                order.items.len(),
                order.created_at.format("%Y-%m-%d %H:%M"),
            );
        }
    }
    Ok(())
}
