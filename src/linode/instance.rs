//! Linode instance records as returned by the `/linode/instances` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state reported for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Running,
    Offline,
    Booting,
    Rebooting,
    ShuttingDown,
    Provisioning,
    Deleting,
    Migrating,
    Rebuilding,
    Cloning,
    Restoring,
    Stopped,
    Resizing,
    #[serde(other)]
    Unknown,
}

/// A Linode instance.
///
/// Timestamps are UTC without an offset, as the API sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "type", default)]
    pub instance_type: Option<String>,
    pub status: InstanceStatus,
    #[serde(default)]
    pub ipv4: Vec<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated: Option<NaiveDateTime>,
}

impl Instance {
    /// The provider ID identifying this instance to the orchestration layer.
    pub fn provider_id(&self) -> String {
        crate::core::provider_id::format(self.id)
    }
}

/// Paginated envelope wrapping every Linode list response.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub pages: u32,
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorReason>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorReason {
    pub reason: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| match &e.field {
                Some(field) => format!("[{}] {}", field, e.reason),
                None => e.reason.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
