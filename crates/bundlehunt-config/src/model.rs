//! Purchase configuration value type

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

pub const PLACEHOLDER_SECRET_ID: &str = "YOUR_SECRET_ID";
pub const PLACEHOLDER_SECRET_KEY: &str = "YOUR_SECRET_KEY";
pub const PLACEHOLDER_BUNDLE_ID: &str = "bundle-razor-xxxx";
pub const PLACEHOLDER_BLUEPRINT_ID: &str = "lhbp-xxxx";

pub const ENV_SECRET_ID: &str = "TENCENT_SECRET_ID";
pub const ENV_SECRET_KEY: &str = "TENCENT_SECRET_KEY";
pub const ENV_INTERACTIVE_MODE: &str = "INTERACTIVE_MODE";

/// On-disk purchase configuration
///
/// Keys are camelCase. Missing keys take the defaults below; unknown keys are
/// kept in `extra` so that saving never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseConfig {
    pub secret_id: String,
    pub secret_key: String,
    pub region: String,
    pub bundle_id: String,
    pub blueprint_id: String,
    pub instance_name_prefix: String,
    pub instance_count: u32,
    /// Poll interval in milliseconds
    pub check_interval: u64,
    pub max_retries: u32,
    pub exit_after_purchase: bool,
    pub log_file: PathBuf,
    pub interactive_mode: bool,
    /// Bundle type tag used for listing and availability checks
    pub bundle_type: String,
    /// Prepaid period in months
    pub period: u32,
    pub renew_flag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            secret_id: PLACEHOLDER_SECRET_ID.to_string(),
            secret_key: PLACEHOLDER_SECRET_KEY.to_string(),
            region: "ap-hongkong".to_string(),
            bundle_id: PLACEHOLDER_BUNDLE_ID.to_string(),
            blueprint_id: PLACEHOLDER_BLUEPRINT_ID.to_string(),
            instance_name_prefix: "auto-ruichi".to_string(),
            instance_count: 1,
            check_interval: 10_000,
            max_retries: 3,
            exit_after_purchase: false,
            log_file: PathBuf::from("./auto-buy.log"),
            interactive_mode: true,
            bundle_type: "RAZOR_SPEED_BUNDLE".to_string(),
            period: 1,
            renew_flag: "NOTIFY_AND_MANUAL_RENEW".to_string(),
            endpoint: None,
            extra: BTreeMap::new(),
        }
    }
}

impl PurchaseConfig {
    /// Apply environment overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup
    ///
    /// Credentials are replaced when the variable is non-empty.
    /// `INTERACTIVE_MODE=false` disables the wizard; any other value enables it.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup(ENV_SECRET_ID).filter(|v| !v.is_empty()) {
            self.secret_id = id;
        }
        if let Some(key) = lookup(ENV_SECRET_KEY).filter(|v| !v.is_empty()) {
            self.secret_key = key;
        }
        if let Some(mode) = lookup(ENV_INTERACTIVE_MODE) {
            self.interactive_mode = mode.trim() != "false";
        }
    }

    pub fn has_placeholder_credentials(&self) -> bool {
        self.secret_id.is_empty()
            || self.secret_key.is_empty()
            || self.secret_id == PLACEHOLDER_SECRET_ID
            || self.secret_key == PLACEHOLDER_SECRET_KEY
    }

    /// Whether a concrete bundle id is configured
    pub fn has_target_bundle(&self) -> bool {
        !self.bundle_id.trim().is_empty() && self.bundle_id != PLACEHOLDER_BUNDLE_ID
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval)
    }

    /// Startup validation; every failure here is fatal
    pub fn validate(&self) -> Result<()> {
        if self.has_placeholder_credentials() {
            return Err(ConfigError::PlaceholderCredentials);
        }
        if self.region.trim().is_empty() {
            return Err(invalid("region", "must not be empty"));
        }
        if self.instance_count == 0 {
            return Err(invalid("instanceCount", "must be at least 1"));
        }
        if self.check_interval == 0 {
            return Err(invalid("checkInterval", "must be greater than 0 ms"));
        }
        if self.max_retries == 0 {
            return Err(invalid("maxRetries", "must be at least 1"));
        }
        if self.period == 0 {
            return Err(invalid("period", "must be at least 1 month"));
        }
        if self.bundle_type.trim().is_empty() {
            return Err(invalid("bundleType", "must not be empty"));
        }
        Ok(())
    }

    /// Secret id with everything but the first 8 characters masked
    pub fn masked_secret_id(&self) -> String {
        let visible: String = self.secret_id.chars().take(8).collect();
        if visible.len() < self.secret_id.len() {
            format!("{}***", visible)
        } else {
            visible
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        field,
        reason: reason.to_string(),
    }
}
