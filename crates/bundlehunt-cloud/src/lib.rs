//! bundlehunt cloud abstraction
//!
//! This crate defines the narrow interface the purchase monitor uses to talk
//! to a cloud vendor: list bundles, check a bundle's sale state, create an
//! instance.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 bundlehunt CLI                   │
//! │         (run / select / bundles / inspect)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               bundlehunt-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  trait BundleProvider { ... }             │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Bundle model │  │ Availability │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼────────────┐
//! │  tencent lighthouse │
//! │      provider       │
//! └────────────────────┘
//! ```

pub mod availability;
pub mod bundle;
pub mod error;
pub mod order;
pub mod provider;

// Re-exports
pub use availability::Availability;
pub use bundle::{BundleFilter, BundleInfo, BundlePrice, SaleState};
pub use error::{CloudError, Result};
pub use order::{PurchaseOrder, PurchaseOutcome, client_token, instance_name};
pub use provider::BundleProvider;
