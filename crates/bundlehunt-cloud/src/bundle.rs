//! Bundle snapshot types returned by inventory queries

use serde::{Deserialize, Serialize};

/// Vendor-reported sale state of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SaleState {
    /// In stock
    Available,
    /// Out of stock
    SoldOut,
    /// Any state the vendor reports that we do not model
    Other(String),
}

impl SaleState {
    pub fn is_available(&self) -> bool {
        matches!(self, SaleState::Available)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SaleState::Available => "AVAILABLE",
            SaleState::SoldOut => "SOLD_OUT",
            SaleState::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for SaleState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AVAILABLE" => SaleState::Available,
            "SOLD_OUT" => SaleState::SoldOut,
            _ => SaleState::Other(value),
        }
    }
}

impl From<&str> for SaleState {
    fn from(value: &str) -> Self {
        SaleState::from(value.to_string())
    }
}

impl From<SaleState> for String {
    fn from(value: SaleState) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for SaleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly price of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundlePrice {
    /// List price
    pub original: f64,

    /// Price after discount
    pub discounted: f64,

    /// Discount percentage (100 means no discount)
    pub discount: f64,

    /// ISO currency code
    pub currency: String,
}

impl BundlePrice {
    pub fn has_discount(&self) -> bool {
        self.discount < 100.0
    }
}

/// Immutable snapshot of a purchasable bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleInfo {
    /// Vendor bundle identifier
    pub id: String,

    /// CPU core count
    pub cpu: u32,

    /// Memory size in GB
    pub memory_gb: u32,

    /// Current sale state
    pub sale_state: SaleState,

    /// Outbound bandwidth in Mbps
    pub bandwidth_mbps: Option<u32>,

    /// Human-readable title shown by the vendor console
    pub display_title: Option<String>,

    /// Monthly price
    pub price: Option<BundlePrice>,

    /// Bundle type tag (e.g. "RAZOR_SPEED_BUNDLE")
    pub bundle_type: Option<String>,
}

impl BundleInfo {
    pub fn new(id: impl Into<String>, sale_state: SaleState) -> Self {
        Self {
            id: id.into(),
            cpu: 0,
            memory_gb: 0,
            sale_state,
            bandwidth_mbps: None,
            display_title: None,
            price: None,
            bundle_type: None,
        }
    }

    pub fn with_spec(mut self, cpu: u32, memory_gb: u32) -> Self {
        self.cpu = cpu;
        self.memory_gb = memory_gb;
        self
    }

    pub fn with_bandwidth(mut self, mbps: u32) -> Self {
        self.bandwidth_mbps = Some(mbps);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.display_title = Some(title.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.sale_state.is_available()
    }

    /// Display title, falling back to "<cpu>C<mem>GB"
    pub fn title(&self) -> String {
        match &self.display_title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => format!("{}C{}GB", self.cpu, self.memory_gb),
        }
    }
}

/// Server-side filter for bundle listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleFilter {
    /// Filter by bundle type tag
    BundleType(String),
    /// Filter by bundle identifier
    BundleId(String),
}

impl BundleFilter {
    pub fn bundle_type(tag: impl Into<String>) -> Self {
        BundleFilter::BundleType(tag.into())
    }

    pub fn bundle_id(id: impl Into<String>) -> Self {
        BundleFilter::BundleId(id.into())
    }

    /// Vendor filter name
    pub fn name(&self) -> &'static str {
        match self {
            BundleFilter::BundleType(_) => "bundle-type",
            BundleFilter::BundleId(_) => "bundle-id",
        }
    }

    /// Vendor filter value
    pub fn value(&self) -> &str {
        match self {
            BundleFilter::BundleType(v) | BundleFilter::BundleId(v) => v,
        }
    }
}

impl std::fmt::Display for BundleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name(), self.value())
    }
}
