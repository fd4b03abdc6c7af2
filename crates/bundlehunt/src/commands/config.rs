use crate::display;
use bundlehunt_config::{LoadedConfig, PurchaseConfig};
use colored::Colorize;

/// 秘密鍵を伏せた設定のコピー
fn masked(config: &PurchaseConfig) -> PurchaseConfig {
    PurchaseConfig {
        secret_id: config.masked_secret_id(),
        secret_key: "********".to_string(),
        ..config.clone()
    }
}

pub fn handle(loaded: &LoadedConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&masked(&loaded.config))?);
        return Ok(());
    }

    if loaded.created {
        println!(
            "{} {}",
            "デフォルト設定ファイルを作成しました:".yellow(),
            loaded.path.display()
        );
    }
    display::print_current_config(&loaded.config, &loaded.path);

    if let Err(e) = loaded.config.validate() {
        println!();
        println!("{} {}", "⚠".yellow(), e);
    }
    Ok(())
}
