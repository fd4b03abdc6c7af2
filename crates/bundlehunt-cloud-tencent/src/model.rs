//! Lighthouse API request/response shapes
//!
//! Field names follow the vendor's PascalCase wire format.

use bundlehunt_cloud::{BundleFilter, BundleInfo, BundlePrice, SaleState};
use serde::{Deserialize, Serialize};

/// Page size used for DescribeBundles (vendor maximum)
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl From<&BundleFilter> for Filter {
    fn from(filter: &BundleFilter) -> Self {
        Self {
            name: filter.name().to_string(),
            values: vec![filter.value().to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeBundlesRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl DescribeBundlesRequest {
    pub fn filtered(filter: &BundleFilter, offset: u32) -> Self {
        Self {
            filters: vec![Filter::from(filter)],
            offset: Some(offset),
            limit: Some(MAX_PAGE_SIZE),
        }
    }

    /// Cheapest possible call, used to probe credentials
    pub fn probe() -> Self {
        Self {
            limit: Some(1),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeBundlesResponse {
    #[serde(default)]
    pub bundle_set: Vec<ApiBundle>,

    #[serde(default)]
    pub total_count: u32,

    #[serde(default)]
    pub request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiBundle {
    pub bundle_id: String,

    #[serde(rename = "CPU", default)]
    pub cpu: u32,

    #[serde(default)]
    pub memory: u32,

    #[serde(default)]
    pub bundle_sales_state: String,

    pub internet_max_bandwidth_out: Option<u32>,

    pub bundle_display_title: Option<String>,

    pub bundle_type: Option<String>,

    pub price: Option<ApiPrice>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiPrice {
    pub instance_price: Option<ApiInstancePrice>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiInstancePrice {
    #[serde(default)]
    pub original_price: f64,

    #[serde(default)]
    pub discount_price: f64,

    #[serde(default = "full_price")]
    pub discount: f64,

    pub currency: Option<String>,
}

fn full_price() -> f64 {
    100.0
}

impl From<ApiBundle> for BundleInfo {
    fn from(api: ApiBundle) -> Self {
        let price = api
            .price
            .and_then(|p| p.instance_price)
            .map(|p| BundlePrice {
                original: p.original_price,
                discounted: p.discount_price,
                discount: p.discount,
                currency: p.currency.unwrap_or_else(|| "CNY".to_string()),
            });

        Self {
            id: api.bundle_id,
            cpu: api.cpu,
            memory_gb: api.memory,
            sale_state: SaleState::from(api.bundle_sales_state),
            bandwidth_mbps: api.internet_max_bandwidth_out,
            display_title: api.bundle_display_title,
            price,
            bundle_type: api.bundle_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceChargePrepaid {
    pub period: u32,
    pub renew_flag: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateInstancesRequest {
    pub bundle_id: String,
    pub blueprint_id: String,
    pub instance_charge_prepaid: InstanceChargePrepaid,
    pub instance_name: String,
    pub instance_count: u32,
    pub client_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateInstancesResponse {
    #[serde(default)]
    pub instance_id_set: Vec<String>,

    #[serde(default)]
    pub request_id: String,
}
