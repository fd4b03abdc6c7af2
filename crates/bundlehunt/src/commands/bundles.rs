use crate::display;
use crate::wizard::Partitioned;
use anyhow::Context;
use bundlehunt_cloud::BundleProvider;
use bundlehunt_config::PurchaseConfig;
use colored::Colorize;

pub async fn handle(config: &PurchaseConfig, json: bool) -> anyhow::Result<()> {
    config.validate()?;
    let provider = super::provider(config)?;

    let filter = provider.category_filter();
    let bundles = provider
        .list_bundles(&filter)
        .await
        .context("パッケージ一覧の取得に失敗しました")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundles)?);
        return Ok(());
    }

    println!(
        "{} {} ({}, {})",
        "📋 パッケージ一覧:".bold(),
        config.bundle_type.cyan(),
        filter,
        config.region
    );

    if bundles.is_empty() {
        println!("{}", "パッケージが見つかりませんでした".yellow());
        return Ok(());
    }

    let partitioned = Partitioned::new(&bundles);
    println!(
        "{}",
        display::bundle_list(&partitioned.available, &partitioned.others, false)
    );
    println!(
        "合計 {}件 (在庫あり {}件 / 在庫なし {}件)",
        partitioned.len(),
        partitioned.available.len(),
        partitioned.others.len()
    );

    Ok(())
}
