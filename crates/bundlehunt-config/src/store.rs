//! 設定ファイルの読み書き

use crate::error::{ConfigError, Result};
use crate::model::PurchaseConfig;
use std::fs;
use std::path::PathBuf;

/// 読み込んだ設定と、その取得元
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PurchaseConfig,
    pub path: PathBuf,
    /// ファイルが存在せず、デフォルト値で新規作成した場合 true
    pub created: bool,
}

/// JSON 設定ファイルへのハンドル
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 設定を読み込み、環境変数による上書きを適用する
    ///
    /// ファイルが無い場合はデフォルト値で作成する。
    pub fn load(&self) -> Result<LoadedConfig> {
        let created = if self.path.exists() {
            false
        } else {
            self.save(&PurchaseConfig::default())?;
            tracing::info!(path = %self.path.display(), "Created default config file");
            true
        };

        let mut config = self.read_file()?;
        config.apply_env_overrides();

        Ok(LoadedConfig {
            config,
            path: self.path.clone(),
            created,
        })
    }

    /// ファイルの内容のみを読む (環境変数の上書きなし)
    pub fn read_file(&self) -> Result<PurchaseConfig> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// 2スペースインデントの JSON として保存
    pub fn save(&self, config: &PurchaseConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Saved config file");
        Ok(())
    }

    /// bundleId だけを書き換えて保存
    ///
    /// ファイルを読み直してから書くため、環境変数由来の認証情報が
    /// ファイルに書き出されることはない。
    pub fn update_bundle_id(&self, bundle_id: &str) -> Result<PurchaseConfig> {
        let mut on_disk = if self.path.exists() {
            self.read_file()?
        } else {
            PurchaseConfig::default()
        };
        on_disk.bundle_id = bundle_id.to_string();
        self.save(&on_disk)?;
        tracing::info!(bundle_id, path = %self.path.display(), "Persisted bundle id");
        Ok(on_disk)
    }
}
