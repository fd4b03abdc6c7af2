//! Bundle provider trait definition

use crate::bundle::{BundleFilter, BundleInfo};
use crate::error::Result;
use crate::order::{PurchaseOrder, PurchaseOutcome};
use async_trait::async_trait;

/// Cloud vendor abstraction used by the purchase monitor
///
/// Implementations wrap authenticated calls to a single vendor. Calls are
/// issued strictly one at a time by the caller.
#[async_trait]
pub trait BundleProvider: Send + Sync {
    /// Returns the provider name (e.g., "tencent-lighthouse")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// Fail fast on bad credentials
    ///
    /// Returns `CloudError::AuthenticationFailed` when the vendor rejects them.
    async fn validate_credentials(&self) -> Result<()>;

    /// List bundles matching a server-side filter
    async fn list_bundles(&self, filter: &BundleFilter) -> Result<Vec<BundleInfo>>;

    /// Whether `bundle_id` is currently purchasable
    ///
    /// Re-queries the same filtered listing used for selection. An id that is
    /// absent from the listing is reported as `Ok(false)`, not as an error.
    async fn is_available(&self, bundle_id: &str) -> Result<bool>;

    /// Place an order for `bundle_id`
    ///
    /// Never fails: vendor refusals and transport problems are reported as
    /// `PurchaseOutcome::Failed`.
    async fn purchase(&self, bundle_id: &str, order: &PurchaseOrder) -> PurchaseOutcome;
}
