//! Tencent Cloud Lighthouse provider implementation

use crate::client::{Credentials, LighthouseClient};
use crate::error::Result;
use crate::model::{CreateInstancesRequest, DescribeBundlesRequest, InstanceChargePrepaid};
use async_trait::async_trait;
use bundlehunt_cloud::{
    Availability, BundleFilter, BundleInfo, BundleProvider, PurchaseOrder, PurchaseOutcome,
    client_token, instance_name,
};

/// Bundle type monitored when none is configured
pub const DEFAULT_BUNDLE_TYPE: &str = "RAZOR_SPEED_BUNDLE";

/// Connection settings for the Lighthouse provider
#[derive(Debug, Clone)]
pub struct TencentConfig {
    pub credentials: Credentials,
    pub region: String,
    /// Overrides the public API endpoint
    pub endpoint: Option<String>,
    /// Bundle type tag used for listing and availability checks
    pub bundle_type: String,
}

/// Result of querying a bundle through both vendor query paths
#[derive(Debug, Clone)]
pub struct BundleInspection {
    pub bundle_id: String,
    /// Entry found through the bundle-type filtered listing
    pub by_type: Option<BundleInfo>,
    /// Ids present in the bundle-type listing
    pub listed_ids: Vec<String>,
    /// Entry found through a direct bundle-id filter
    pub by_id: Option<BundleInfo>,
}

impl BundleInspection {
    /// Both paths found the bundle but report different sale states
    pub fn states_diverge(&self) -> bool {
        match (&self.by_type, &self.by_id) {
            (Some(a), Some(b)) => a.sale_state != b.sale_state,
            _ => false,
        }
    }
}

/// Tencent Cloud Lighthouse provider
pub struct LighthouseProvider {
    client: LighthouseClient,
    bundle_type: String,
}

impl LighthouseProvider {
    pub fn new(config: TencentConfig) -> Result<Self> {
        let client = match config.endpoint.as_deref() {
            Some(endpoint) => {
                LighthouseClient::with_endpoint(config.credentials, &config.region, endpoint)?
            }
            None => LighthouseClient::new(config.credentials, &config.region)?,
        };
        Ok(Self {
            client,
            bundle_type: config.bundle_type,
        })
    }

    /// Filter used for both the selection listing and availability checks
    pub fn category_filter(&self) -> BundleFilter {
        BundleFilter::bundle_type(&self.bundle_type)
    }

    /// Fetch every page of a filtered DescribeBundles listing
    async fn describe_all(&self, filter: &BundleFilter) -> Result<Vec<BundleInfo>> {
        let mut bundles: Vec<BundleInfo> = Vec::new();
        loop {
            let offset = bundles.len() as u32;
            let page = self
                .client
                .describe_bundles(&DescribeBundlesRequest::filtered(filter, offset))
                .await?;

            let fetched = page.bundle_set.len();
            bundles.extend(page.bundle_set.into_iter().map(BundleInfo::from));

            if fetched == 0 || bundles.len() as u32 >= page.total_count {
                break;
            }
        }
        tracing::debug!(%filter, count = bundles.len(), "Listed bundles");
        Ok(bundles)
    }

    /// Classify the target bundle against the category listing
    pub async fn check_availability(&self, bundle_id: &str) -> Result<Availability> {
        let bundles = self.describe_all(&self.category_filter()).await?;
        let availability = Availability::classify(&bundles, bundle_id);

        match &availability {
            Availability::CategoryEmpty => {
                tracing::warn!(bundle_type = %self.bundle_type, "No bundles listed in category");
            }
            Availability::NotListed => {
                let listed: Vec<&str> = bundles.iter().map(|b| b.id.as_str()).collect();
                tracing::warn!(
                    bundle_id,
                    listed = %listed.join(", "),
                    "Bundle not found in category listing"
                );
            }
            Availability::Ambiguous(count) => {
                tracing::warn!(bundle_id, count, "Bundle id listed more than once");
            }
            Availability::Available | Availability::NotAvailable(_) => {
                if let Some(bundle) = bundles.iter().find(|b| b.id == bundle_id) {
                    tracing::debug!(
                        bundle_id,
                        title = %bundle.title(),
                        cpu = bundle.cpu,
                        memory_gb = bundle.memory_gb,
                        state = %bundle.sale_state,
                        bandwidth_mbps = ?bundle.bandwidth_mbps,
                        "Bundle stock details"
                    );
                }
            }
        }

        Ok(availability)
    }

    /// Query the bundle through the category listing and a direct id filter
    pub async fn inspect(&self, bundle_id: &str) -> Result<BundleInspection> {
        let listed = self.describe_all(&self.category_filter()).await?;
        let by_type = listed.iter().find(|b| b.id == bundle_id).cloned();
        let listed_ids = listed.into_iter().map(|b| b.id).collect();

        let by_id = self
            .describe_all(&BundleFilter::bundle_id(bundle_id))
            .await?
            .into_iter()
            .next();

        Ok(BundleInspection {
            bundle_id: bundle_id.to_string(),
            by_type,
            listed_ids,
            by_id,
        })
    }
}

#[async_trait]
impl BundleProvider for LighthouseProvider {
    fn name(&self) -> &str {
        "tencent-lighthouse"
    }

    fn display_name(&self) -> &str {
        "Tencent Cloud Lighthouse"
    }

    async fn validate_credentials(&self) -> bundlehunt_cloud::Result<()> {
        self.client
            .describe_bundles(&DescribeBundlesRequest::probe())
            .await?;
        Ok(())
    }

    async fn list_bundles(&self, filter: &BundleFilter) -> bundlehunt_cloud::Result<Vec<BundleInfo>> {
        Ok(self.describe_all(filter).await?)
    }

    async fn is_available(&self, bundle_id: &str) -> bundlehunt_cloud::Result<bool> {
        Ok(self.check_availability(bundle_id).await?.is_available())
    }

    async fn purchase(&self, bundle_id: &str, order: &PurchaseOrder) -> PurchaseOutcome {
        let req = CreateInstancesRequest {
            bundle_id: bundle_id.to_string(),
            blueprint_id: order.blueprint_id.clone(),
            instance_charge_prepaid: InstanceChargePrepaid {
                period: order.period_months,
                renew_flag: order.renew_flag.clone(),
            },
            instance_name: instance_name(&order.instance_name_prefix),
            instance_count: order.instance_count,
            client_token: client_token(),
        };

        tracing::debug!(
            bundle_id,
            instance_name = %req.instance_name,
            client_token = %req.client_token,
            "Submitting CreateInstances"
        );

        match self.client.create_instances(&req).await {
            Ok(resp) => PurchaseOutcome::created(resp.instance_id_set),
            Err(e) => match e.code() {
                Some(code) => PurchaseOutcome::failed_with_code(e.to_string(), code),
                None => PurchaseOutcome::failed(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(endpoint: Option<&str>) -> LighthouseProvider {
        LighthouseProvider::new(TencentConfig {
            credentials: Credentials {
                secret_id: "AKIDEXAMPLE".into(),
                secret_key: "secret".into(),
            },
            region: "ap-hongkong".into(),
            endpoint: endpoint.map(str::to_string),
            bundle_type: DEFAULT_BUNDLE_TYPE.into(),
        })
        .unwrap()
    }

    #[test]
    fn test_category_filter() {
        let p = provider(None);
        assert_eq!(
            p.category_filter(),
            BundleFilter::bundle_type("RAZOR_SPEED_BUNDLE")
        );
        assert_eq!(p.name(), "tencent-lighthouse");
    }

    #[test]
    fn test_inspection_divergence() {
        use bundlehunt_cloud::SaleState;

        let mut inspection = BundleInspection {
            bundle_id: "b".into(),
            by_type: Some(BundleInfo::new("b", SaleState::SoldOut)),
            listed_ids: vec!["b".into()],
            by_id: Some(BundleInfo::new("b", SaleState::Available)),
        };
        assert!(inspection.states_diverge());

        inspection.by_id = None;
        assert!(!inspection.states_diverge());
    }
}
