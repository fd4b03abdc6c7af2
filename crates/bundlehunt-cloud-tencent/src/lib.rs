//! Tencent Cloud Lighthouse provider for bundlehunt
//!
//! This crate implements the BundleProvider trait for Tencent Cloud
//! Lighthouse, talking to the API 3.0 endpoint directly over HTTPS.
//!
//! # Features
//!
//! - Bundle listing by type or id (DescribeBundles, paginated)
//! - Availability checks through the same category listing
//! - Instance creation with idempotency tokens (CreateInstances)
//!
//! # Example
//!
//! ```ignore
//! use bundlehunt_cloud::BundleProvider;
//! use bundlehunt_cloud_tencent::{Credentials, LighthouseProvider, TencentConfig};
//!
//! let provider = LighthouseProvider::new(TencentConfig {
//!     credentials: Credentials { secret_id, secret_key },
//!     region: "ap-hongkong".into(),
//!     endpoint: None,
//!     bundle_type: "RAZOR_SPEED_BUNDLE".into(),
//! })?;
//!
//! provider.validate_credentials().await?;
//! let in_stock = provider.is_available("bundle_razor_01").await?;
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod provider;
pub mod signer;

pub use client::{Credentials, DEFAULT_ENDPOINT, LighthouseClient};
pub use error::{Result, TencentError};
pub use provider::{BundleInspection, DEFAULT_BUNDLE_TYPE, LighthouseProvider, TencentConfig};
