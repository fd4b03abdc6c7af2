pub mod bundles;
pub mod check;
pub mod config;
pub mod inspect;
pub mod run;
pub mod select;

use anyhow::Context;
use bundlehunt_cloud_tencent::{Credentials, LighthouseProvider, TencentConfig};
use bundlehunt_config::PurchaseConfig;

/// 設定から Lighthouse プロバイダーを組み立てる
pub fn provider(config: &PurchaseConfig) -> anyhow::Result<LighthouseProvider> {
    LighthouseProvider::new(TencentConfig {
        credentials: Credentials {
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
        },
        region: config.region.clone(),
        endpoint: config.endpoint.clone(),
        bundle_type: config.bundle_type.clone(),
    })
    .context("Lighthouse クライアントの初期化に失敗しました")
}
