//! Session inspection and teardown.

use std::sync::Arc;

use mealdrop_client::session::{Redirect, SessionMonitor, SessionStore, SystemClock};
use mealdrop_core::Role;

use super::{load_env, CliError};

/// Show the stored session as seen from `role`'s route.
pub fn show(role: Role) -> Result<(), CliError> {
    let (_, store) = load_env()?;
    let mut monitor = SessionMonitor::new(Arc::new(store), Arc::new(SystemClock), role);

    #[allow(clippy::print_stdout)]
    match monitor.hydrate() {
        None => {
            // hydrate() returning None guarantees a valid profile.
            if let Some(profile) = monitor.profile() {
                println!("Signed in: {} ({})", profile.name, profile.role);
                println!("  wallet:  {}", profile.wallet_address);
                println!("  id:      {}", profile.id);
                if let Some(label) = monitor.countdown_label() {
                    println!("  expires: {label}");
                }
            }
        }
        Some(Redirect::RolePicker) => {
            println!("Stored session belongs to another role.");
        }
        Some(Redirect::Login { notice, .. }) => match notice {
            Some(notice) => println!("{notice}"),
            None => println!("Not signed in."),
        },
    }
    Ok(())
}

/// Delete the stored session.
pub fn clear() -> Result<(), CliError> {
    let (_, store) = load_env()?;
    store.clear();

    #[allow(clippy::print_stdout)]
    {
        println!("Session cleared.");
    }
    Ok(())
}
