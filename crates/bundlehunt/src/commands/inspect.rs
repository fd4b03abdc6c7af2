use anyhow::Context;
use bundlehunt_cloud::BundleInfo;
use bundlehunt_config::PurchaseConfig;
use colored::Colorize;

fn print_entry(bundle: &BundleInfo) {
    println!("   状態: {}", bundle.sale_state);
    println!(
        "   タイトル: {}",
        bundle.display_title.as_deref().unwrap_or("N/A")
    );
    println!(
        "   種別: {}",
        bundle.bundle_type.as_deref().unwrap_or("N/A")
    );
}

/// 種別フィルタと ID フィルタの2経路で同じパッケージを照会し、結果を比較する
pub async fn handle(config: &PurchaseConfig, bundle_id: &str) -> anyhow::Result<()> {
    config.validate()?;
    let provider = super::provider(config)?;

    println!("{}", "🔍 パッケージ状態を照会中...".blue());
    let inspection = provider
        .inspect(bundle_id)
        .await
        .context("パッケージの照会に失敗しました")?;

    println!("{}", "=".repeat(60));
    println!("1. bundle-type={} の一覧", config.bundle_type.cyan());
    match &inspection.by_type {
        Some(bundle) => {
            println!("{} 一覧に存在: {}", "✓".green(), bundle_id);
            print_entry(bundle);
        }
        None => {
            println!("{} 一覧に存在しません: {}", "✗".red(), bundle_id);
            let listed = if inspection.listed_ids.is_empty() {
                "なし".to_string()
            } else {
                inspection.listed_ids.join(", ")
            };
            println!("   一覧のパッケージ: {}", listed);
        }
    }

    println!("{}", "-".repeat(40));
    println!("2. bundle-id={} で直接照会", bundle_id.cyan());
    match &inspection.by_id {
        Some(bundle) => {
            println!("{} 見つかりました", "✓".green());
            print_entry(bundle);
        }
        None => println!("{} 見つかりませんでした", "✗".red()),
    }
    println!("{}", "=".repeat(60));

    if let (Some(by_type), Some(by_id)) = (&inspection.by_type, &inspection.by_id) {
        if inspection.states_diverge() {
            println!(
                "{}",
                "⚠ 2つの照会方法で状態が一致しません".yellow().bold()
            );
            println!("   種別一覧: {}", by_type.sale_state);
            println!("   ID 照会: {}", by_id.sale_state);
            tracing::warn!(
                bundle_id,
                by_type = %by_type.sale_state,
                by_id = %by_id.sale_state,
                "Query paths disagree on sale state"
            );
        } else {
            println!("{}", "✓ 2つの照会方法の状態は一致しています".green());
        }
    }

    Ok(())
}
