//! Availability classification of a target bundle within a listing
//!
//! Availability is always decided against the same filtered listing the
//! selection menu shows, never through a separate by-id query path.

use crate::bundle::{BundleInfo, SaleState};

/// What a listing says about a target bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Exactly one matching entry, in stock
    Available,
    /// Exactly one matching entry, not in stock
    NotAvailable(SaleState),
    /// The listing has entries but none with the target id
    NotListed,
    /// The listing is empty
    CategoryEmpty,
    /// More than one entry carries the target id
    Ambiguous(usize),
}

impl Availability {
    /// Classify `bundle_id` against a listing
    pub fn classify(bundles: &[BundleInfo], bundle_id: &str) -> Self {
        if bundles.is_empty() {
            return Availability::CategoryEmpty;
        }

        let mut matches = bundles.iter().filter(|b| b.id == bundle_id);
        match (matches.next(), matches.count()) {
            (None, _) => Availability::NotListed,
            (Some(bundle), 0) if bundle.is_available() => Availability::Available,
            (Some(bundle), 0) => Availability::NotAvailable(bundle.sale_state.clone()),
            (Some(_), rest) => Availability::Ambiguous(rest + 1),
        }
    }

    /// Only a single in-stock entry counts as available
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "AVAILABLE"),
            Availability::NotAvailable(state) => write!(f, "{}", state),
            Availability::NotListed => write!(f, "not listed"),
            Availability::CategoryEmpty => write!(f, "category empty"),
            Availability::Ambiguous(n) => write!(f, "ambiguous ({} entries)", n),
        }
    }
}
