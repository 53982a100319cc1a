use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StoredRecord;

/// Entry in the government schemes catalog. The catalog is maintained by
/// external tooling; the portal only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl StoredRecord for Scheme {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Identifier wrapper for stored scheme applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemeApplicationId(pub String);

/// A citizen's application for one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeApplication {
    pub id: SchemeApplicationId,
    pub user_id: String,
    pub scheme_id: String,
    /// Scheme name captured at application time; later catalog edits do not
    /// rewrite stored applications.
    pub scheme_name: String,
    pub status: SchemeApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl StoredRecord for SchemeApplication {
    fn record_id(&self) -> &str {
        &self.id.0
    }
}

/// Only `Pending` is assigned here; officials move applications to the other
/// states through their own tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemeApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SchemeApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SchemeApplicationStatus::Pending => "Pending",
            SchemeApplicationStatus::Accepted => "Accepted",
            SchemeApplicationStatus::Rejected => "Rejected",
        }
    }
}
