//! Citizen services portal core.
//!
//! Three facets: an eligibility engine (pure threshold rules over grade and
//! family income), an application store (blob-per-collection key-value
//! persistence), and a presentation layer (list, detail, gallery, and summary
//! screens rebuilt in full from store contents).

pub mod config;
pub mod error;
pub mod portal;
pub mod store;
pub mod telemetry;
