use crate::commands::select::interactive_selection;
use crate::display;
use crate::monitor::{Monitor, MonitorSettings};
use crate::shutdown;
use crate::wizard::WizardOutcome;
use anyhow::Context;
use bundlehunt_cloud::BundleProvider;
use bundlehunt_config::{ConfigStore, LoadedConfig, PurchaseConfig};
use colored::Colorize;
use std::sync::Arc;
use tokio::sync::watch;

/// `run` のコマンドライン上書き
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub bundle: Option<String>,
    pub interval: Option<u64>,
    pub max_retries: Option<u32>,
    pub exit_after_purchase: bool,
    pub non_interactive: bool,
}

impl RunOptions {
    pub fn apply(&self, config: &mut PurchaseConfig) {
        if let Some(bundle) = &self.bundle {
            config.bundle_id = bundle.clone();
        }
        if let Some(interval) = self.interval {
            config.check_interval = interval;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        if self.exit_after_purchase {
            config.exit_after_purchase = true;
        }
        if self.non_interactive {
            config.interactive_mode = false;
        }
    }
}

/// 認証確認 → (必要なら) パッケージ選択 → 在庫監視
///
/// 戻り値は終了コード。
pub async fn handle(
    loaded: LoadedConfig,
    options: RunOptions,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    let LoadedConfig {
        mut config, path, ..
    } = loaded;
    options.apply(&mut config);
    config.validate()?;

    let provider = Arc::new(super::provider(&config)?);

    println!("{}", "Tencent Cloud の認証情報を確認中...".blue());
    match shutdown::or_shutdown(provider.validate_credentials(), &mut shutdown).await {
        None => return Ok(0),
        Some(Err(e)) if e.is_auth_failure() => {
            return Err(anyhow::Error::new(e)
                .context("認証情報が拒否されました。secretId / secretKey を確認してください"));
        }
        Some(result) => result.context("認証情報の確認に失敗しました")?,
    }
    println!("{}", "✓ 認証に成功しました".green());
    tracing::info!(region = %config.region, "Credentials validated");

    if config.has_target_bundle() {
        tracing::info!(bundle_id = %config.bundle_id, "Using bundle from config");
    } else {
        if !config.interactive_mode {
            anyhow::bail!(
                "対象パッケージ (bundleId) が設定されておらず、対話モードも無効です。\
                設定ファイルの bundleId か --bundle を指定してください"
            );
        }

        let filter = provider.category_filter();
        let Some(listed) = shutdown::or_shutdown(provider.list_bundles(&filter), &mut shutdown).await
        else {
            return Ok(0);
        };
        let bundles = listed.context("パッケージ一覧の取得に失敗しました")?;
        tracing::info!(count = bundles.len(), %filter, "Fetched bundle list");

        display::print_current_config(&config, &path);

        let store = ConfigStore::new(&path);
        match interactive_selection(bundles, store, true, &mut shutdown).await? {
            None => return Ok(0),
            Some(WizardOutcome::Cancelled) => {
                tracing::info!("Selection cancelled by operator");
                println!("{}", "選択をキャンセルしました。".yellow());
                return Ok(0);
            }
            Some(WizardOutcome::Chosen { start: false, .. }) => {
                tracing::info!("Operator chose not to start monitoring now");
                return Ok(0);
            }
            Some(WizardOutcome::Chosen { bundle, .. }) => {
                config.bundle_id = bundle.id;
            }
        }
    }

    println!(
        "{} {} ({}ms 間隔, Ctrl-C で停止)",
        "在庫監視を開始します:".bold(),
        config.bundle_id.cyan(),
        config.check_interval
    );
    println!(
        "  開始時刻: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let settings = MonitorSettings::from_config(&config);
    let report = Monitor::new(provider, settings, shutdown).run().await;

    display::print_report(&report);
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_config() {
        let mut config = PurchaseConfig::default();
        let options = RunOptions {
            bundle: Some("bundle_razor_05".into()),
            interval: Some(3000),
            max_retries: Some(5),
            exit_after_purchase: true,
            non_interactive: true,
        };
        options.apply(&mut config);

        assert_eq!(config.bundle_id, "bundle_razor_05");
        assert_eq!(config.check_interval, 3000);
        assert_eq!(config.max_retries, 5);
        assert!(config.exit_after_purchase);
        assert!(!config.interactive_mode);
    }

    #[test]
    fn test_default_options_keep_config() {
        let mut config = PurchaseConfig {
            exit_after_purchase: true,
            ..Default::default()
        };
        let before = config.clone();
        RunOptions::default().apply(&mut config);
        assert_eq!(config, before);
    }
}
