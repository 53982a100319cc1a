//! Scheme catalog reads, application intake, and the status summary screen.

pub mod domain;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{Scheme, SchemeApplication, SchemeApplicationId, SchemeApplicationStatus};
pub use router::scheme_router;
pub use service::{SchemeApplicationService, SchemeServiceError};
