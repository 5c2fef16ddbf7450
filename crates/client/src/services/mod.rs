//! Role-scoped backend services.
//!
//! Each service owns its own fetch state and supersession tracking; a
//! failure in one never disturbs another's last-good data.

pub mod auth;
pub mod menu;
pub mod orders;
pub mod reference;

pub use auth::{AuthService, RegisterForm};
pub use menu::{MenuManagementService, MenuUploadForm};
pub use orders::OrderQueryService;
pub use reference::{MenuRead, ReferenceDataService};
