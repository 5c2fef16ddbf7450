//! Mealdrop CLI - role-scoped client for the Mealdrop backends.
//!
//! # Usage
//!
//! ```bash
//! # Sign in as a customer
//! mealdrop login -r customer -w 0xabc -p hunter2
//!
//! # Register a courier and sign in
//! mealdrop register -r courier -n "Ada" -w 0xabc -p hunter2 --transport scooter
//!
//! # Show the stored session for a role (with remaining validity)
//! mealdrop session show -r customer
//!
//! # List this role's orders, optionally filtered by status
//! mealdrop orders list -r customer --status delivering
//!
//! # Create an order / add an item to one (customer)
//! mealdrop orders create --courier <uuid> --restaurant <uuid> --item <uuid>:2
//! mealdrop orders add-item --order <uuid> --restaurant <uuid> --item <uuid>
//!
//! # Browse directories and menus (customer)
//! mealdrop couriers
//! mealdrop restaurants
//! mealdrop menu show <restaurant-uuid>
//!
//! # Upload a menu item (restaurant)
//! mealdrop menu upload -n "Soup" -d "Hot" --price 4.50 --quantity 12
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mealdrop_core::{
    CourierId, MenuItemId, OrderId, OrderStatus, RestaurantId, Role, TransportType,
};

mod commands;

#[derive(Parser)]
#[command(name = "mealdrop")]
#[command(author, version, about = "Mealdrop platform CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in against a role backend and persist the session
    Login {
        /// Role to sign in as
        #[arg(short, long)]
        role: Role,

        /// Wallet address
        #[arg(short, long)]
        wallet_address: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account, then sign in with the same credentials
    Register {
        /// Role to register as
        #[arg(short, long)]
        role: Role,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Wallet address
        #[arg(short, long)]
        wallet_address: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Delivery/business address (customer and restaurant)
        #[arg(short, long, default_value = "")]
        address: String,

        /// Courier transport (`bicycle`, `car`, `scooter`, `foot`)
        #[arg(long, default_value = "bicycle")]
        transport: TransportType,
    },
    /// Inspect or clear the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// List, create, or extend orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// List the courier directory
    Couriers,
    /// List the restaurant directory
    Restaurants,
    /// Browse or manage menus
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List this role's orders
    List {
        /// Role whose session to use
        #[arg(short, long, default_value = "customer")]
        role: Role,

        /// Only show orders in this status
        #[arg(short, long)]
        status: Option<OrderStatus>,
    },
    /// Create an order as the signed-in customer
    Create {
        /// Courier id (UUID)
        #[arg(long)]
        courier: CourierId,

        /// Restaurant id (UUID)
        #[arg(long)]
        restaurant: RestaurantId,

        /// Item and quantity as `<menu-item-uuid>:<quantity>`; repeatable
        #[arg(long = "item", value_parser = commands::workflow::parse_item, required = true)]
        items: Vec<(MenuItemId, u32)>,
    },
    /// Add one item to an existing order
    AddItem {
        /// Order id (UUID)
        #[arg(long)]
        order: OrderId,

        /// Restaurant id the item belongs to (UUID)
        #[arg(long)]
        restaurant: String,

        /// Menu item id (UUID)
        #[arg(long)]
        item: MenuItemId,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the stored session and its remaining validity
    Show {
        /// Role whose session to inspect
        #[arg(short, long, default_value = "customer")]
        role: Role,
    },
    /// Delete the stored session
    Clear,
}

#[derive(Subcommand)]
enum MenuAction {
    /// Show a restaurant's menu
    Show {
        /// Restaurant id (UUID)
        restaurant_id: String,
    },
    /// Upload a menu item as the signed-in restaurant
    Upload {
        /// Item name
        #[arg(short, long)]
        name: String,

        /// Item description
        #[arg(short, long)]
        description: String,

        /// Price (must be greater than zero)
        #[arg(long)]
        price: String,

        /// Available quantity (non-negative whole number)
        #[arg(long)]
        quantity: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Login {
            role,
            wallet_address,
            password,
        } => commands::auth::login(role, &wallet_address, password).await?,
        Commands::Register {
            role,
            name,
            wallet_address,
            password,
            address,
            transport,
        } => {
            commands::auth::register(role, name, wallet_address, password, address, transport)
                .await?;
        }
        Commands::Session { action } => match action {
            SessionAction::Show { role } => commands::session::show(role)?,
            SessionAction::Clear => commands::session::clear()?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List { role, status } => commands::orders::list(role, status).await?,
            OrdersAction::Create {
                courier,
                restaurant,
                items,
            } => commands::workflow::create(courier, restaurant, items).await?,
            OrdersAction::AddItem {
                order,
                restaurant,
                item,
                quantity,
            } => commands::workflow::add_item(order, &restaurant, item, quantity).await?,
        },
        Commands::Couriers => commands::reference::couriers().await?,
        Commands::Restaurants => commands::reference::restaurants().await?,
        Commands::Menu { action } => match action {
            MenuAction::Show { restaurant_id } => commands::menu::show(&restaurant_id).await?,
            MenuAction::Upload {
                name,
                description,
                price,
                quantity,
            } => commands::menu::upload(name, description, price, quantity).await?,
        },
    }
    Ok(())
}
