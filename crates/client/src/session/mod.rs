//! Session persistence and lifecycle.
//!
//! The [`SessionStore`] owns the single persisted profile blob; the
//! [`SessionMonitor`] gates everything else on the profile still being valid
//! and drives the one persistent background activity, the expiry countdown.

mod clock;
mod monitor;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use monitor::{
    CountdownDriver, EXPIRED_NOTICE, Redirect, SessionMonitor, SessionState,
};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};
