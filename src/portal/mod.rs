//! Citizen portal workflows: scholarship intake, scheme applications, and the
//! dashboard screens built on top of them.

pub mod activity;
pub mod dashboard;
pub mod ids;
pub mod scheme;
pub mod scholarship;
pub mod session;
pub mod sheets;
pub mod views;

pub use activity::{ActivityLog, TracingActivityLog};
pub use dashboard::{dashboard_router, Dashboard, DashboardSnapshot, DashboardView};
pub use session::CitizenSession;
pub use sheets::{SheetSync, SyncError, SyncReceipt};
