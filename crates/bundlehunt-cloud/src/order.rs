//! Purchase request and outcome types

use serde::{Deserialize, Serialize};

/// Everything needed to place an instance order, apart from the bundle id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Image (blueprint) identifier
    pub blueprint_id: String,

    /// Instance name prefix; a random suffix is appended per request
    pub instance_name_prefix: String,

    /// Number of instances to create per order
    pub instance_count: u32,

    /// Prepaid period in months
    pub period_months: u32,

    /// Renewal policy passed through to the vendor
    pub renew_flag: String,
}

/// Result of a purchase attempt
///
/// Vendor-side refusals (stock vanished, quota reached, ...) are ordinary
/// outcomes of racing other buyers and are reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    /// Instances were created
    Created { instance_ids: Vec<String> },
    /// The order was refused or could not be delivered
    Failed {
        reason: String,
        code: Option<String>,
    },
}

impl PurchaseOutcome {
    pub fn created(instance_ids: Vec<String>) -> Self {
        PurchaseOutcome::Created { instance_ids }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        PurchaseOutcome::Failed {
            reason: reason.into(),
            code: None,
        }
    }

    pub fn failed_with_code(reason: impl Into<String>, code: impl Into<String>) -> Self {
        PurchaseOutcome::Failed {
            reason: reason.into(),
            code: Some(code.into()),
        }
    }

}

/// Instance name: `<prefix>-<6 random hex chars>`
pub fn instance_name(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &suffix[..6])
}

/// Fresh idempotency token for a single create request
pub fn client_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
