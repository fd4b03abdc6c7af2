use anyhow::Context;
use bundlehunt_cloud::BundleProvider;
use bundlehunt_config::PurchaseConfig;
use colored::Colorize;

/// 認証情報と API 疎通を確認する
pub async fn handle(config: &PurchaseConfig) -> anyhow::Result<()> {
    println!("{}", "🔍 Tencent Cloud の認証情報を確認中...".blue());
    println!("  SecretId: {}", config.masked_secret_id());
    println!("  リージョン: {}", config.region);

    config.validate()?;
    let provider = super::provider(config)?;

    provider
        .validate_credentials()
        .await
        .context("認証情報の確認に失敗しました")?;
    println!("{}", "✓ API 呼び出しに成功しました".green());

    let filter = provider.category_filter();
    let bundles = provider
        .list_bundles(&filter)
        .await
        .context("パッケージ一覧の取得に失敗しました")?;
    let available = bundles.iter().filter(|b| b.is_available()).count();
    println!(
        "{} {} 件のパッケージ (在庫あり {} 件)",
        "✓".green(),
        bundles.len(),
        available
    );

    if config.has_target_bundle() {
        let target = bundles.iter().find(|b| b.id == config.bundle_id);
        match target {
            Some(bundle) => println!(
                "  対象パッケージ {}: {}",
                bundle.id.cyan(),
                bundle.sale_state
            ),
            None => println!(
                "  {} 対象パッケージ {} は {} の一覧にありません",
                "⚠".yellow(),
                config.bundle_id.cyan(),
                config.bundle_type
            ),
        }
    }

    println!();
    println!("{}", "✓ 認証情報は有効です".green().bold());
    Ok(())
}
