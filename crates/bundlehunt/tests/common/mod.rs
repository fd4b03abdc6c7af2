#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.path().join("auto-buy.log")
    }

    /// 有効な認証情報と、モックサーバーを向いた設定を書き出す
    pub fn write_config(&self, endpoint: &str, overrides: Value) {
        let mut config = json!({
            "secretId": "AKIDTESTTESTTEST",
            "secretKey": "test-secret-key",
            "region": "ap-hongkong",
            "bundleId": "bundle_razor_01",
            "blueprintId": "lhbp-test",
            "checkInterval": 10,
            "maxRetries": 3,
            "logFile": self.log_path(),
            "endpoint": endpoint
        });
        if let (Some(base), Some(extra)) = (config.as_object_mut(), overrides.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        fs::write(
            self.config_path(),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
    }

    pub fn read_config(&self) -> Value {
        serde_json::from_str(&fs::read_to_string(self.config_path()).unwrap()).unwrap()
    }

    #[allow(dead_code)]
    pub fn read_log(&self) -> String {
        fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// 環境変数の影響を受けないコマンド
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("bundlehunt").unwrap();
        cmd.current_dir(self.root.path())
            .env_remove("TENCENT_SECRET_ID")
            .env_remove("TENCENT_SECRET_KEY")
            .env_remove("INTERACTIVE_MODE")
            .env_remove("BUNDLEHUNT_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// DescribeBundles のレスポンス
pub fn listing(bundles: &[(&str, &str)]) -> Value {
    let set: Vec<Value> = bundles
        .iter()
        .map(|(id, state)| {
            json!({
                "BundleId": id,
                "CPU": 2,
                "Memory": 4,
                "BundleSalesState": state,
                "InternetMaxBandwidthOut": 200,
                "BundleType": "RAZOR_SPEED_BUNDLE",
                "Price": {
                    "InstancePrice": {
                        "OriginalPrice": 60.0,
                        "DiscountPrice": 30.0,
                        "Discount": 50,
                        "Currency": "CNY"
                    }
                }
            })
        })
        .collect();
    json!({
        "Response": {
            "BundleSet": set,
            "TotalCount": set.len(),
            "RequestId": "req-test"
        }
    })
}
