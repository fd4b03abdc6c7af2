//! コンソール表示

use crate::monitor::{MonitorReport, StopReason};
use bundlehunt_cloud::{BundleInfo, BundlePrice};
use bundlehunt_config::PurchaseConfig;
use colored::Colorize;
use std::path::Path;

const RULE_WIDTH: usize = 80;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// 月額価格の表示。割引がある場合は割引価格も併記
pub fn format_price(price: Option<&BundlePrice>) -> String {
    match price {
        None => "価格不明".to_string(),
        Some(p) if p.has_discount() => format!(
            "{} {}/月 (割引価格: {}/月)",
            p.currency, p.original, p.discounted
        ),
        Some(p) => format!("{} {}/月", p.currency, p.original),
    }
}

/// 一覧の1行。`number` があれば先頭に番号を付ける
pub fn bundle_line(number: Option<usize>, bundle: &BundleInfo) -> String {
    let bandwidth = bundle
        .bandwidth_mbps
        .map(|mbps| format!("{}Mbps", mbps))
        .unwrap_or_else(|| "不明".to_string());
    let state = if bundle.is_available() {
        bundle.sale_state.as_str().green()
    } else {
        bundle.sale_state.as_str().red()
    };
    let prefix = match number {
        Some(n) => format!("{:>3}. ", n),
        None => " • ".to_string(),
    };

    format!(
        "{}{} - {} - 帯域: {} - 価格: {} - 状態: {}",
        prefix,
        bundle.id.cyan(),
        bundle.title(),
        bandwidth,
        format_price(bundle.price.as_ref()),
        state
    )
}

/// 在庫あり / 在庫なしの2区分で一覧表示
///
/// `numbered` の場合は在庫ありから通し番号を振る。
pub fn bundle_list(available: &[&BundleInfo], others: &[&BundleInfo], numbered: bool) -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push('\n');

    if !available.is_empty() {
        out.push_str(&format!("\n{}\n", "✓ 在庫あり:".green().bold()));
        for (i, bundle) in available.iter().enumerate() {
            let number = numbered.then_some(i + 1);
            out.push_str(&bundle_line(number, bundle));
            out.push('\n');
        }
    }

    if !others.is_empty() {
        out.push_str(&format!("\n{}\n", "✗ 在庫なし:".red().bold()));
        for (i, bundle) in others.iter().enumerate() {
            let number = numbered.then_some(available.len() + i + 1);
            out.push_str(&bundle_line(number, bundle));
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&rule());
    out
}

/// 現在の設定 (秘密鍵はマスク)
pub fn print_current_config(config: &PurchaseConfig, path: &Path) {
    println!();
    println!("{}", "📋 現在の設定:".bold());
    println!("{}", "=".repeat(50));
    println!("設定ファイル: {}", path.display().to_string().cyan());
    println!("SecretId: {}", config.masked_secret_id());
    println!("SecretKey: {}", "********".dimmed());
    println!("リージョン: {}", config.region);
    println!("パッケージ種別: {}", config.bundle_type);
    let target = if config.has_target_bundle() {
        config.bundle_id.cyan()
    } else {
        "(未設定)".yellow()
    };
    println!("対象パッケージ: {}", target);
    println!("イメージID: {}", config.blueprint_id);
    println!("インスタンス名プレフィックス: {}", config.instance_name_prefix);
    println!("購入数: {}", config.instance_count);
    println!("購入期間: {}ヶ月 ({})", config.period, config.renew_flag);
    println!("確認間隔: {}ms", config.check_interval);
    println!("最大リトライ回数: {}", config.max_retries);
    println!("購入後に終了: {}", yes_no(config.exit_after_purchase));
    println!("対話モード: {}", yes_no(config.interactive_mode));
    println!("ログファイル: {}", config.log_file.display());
    if let Some(endpoint) = &config.endpoint {
        println!("エンドポイント: {}", endpoint);
    }
    println!("{}", "=".repeat(50));
}

fn yes_no(value: bool) -> &'static str {
    if value { "はい" } else { "いいえ" }
}

pub fn print_report(report: &MonitorReport) {
    println!();
    match report.reason {
        StopReason::Purchased => println!("{}", "✓ 購入が完了しました".green().bold()),
        StopReason::Shutdown => println!("{}", "監視を停止しました".yellow()),
        StopReason::RetriesExhausted => {
            eprintln!(
                "{}",
                "✗ 在庫確認の失敗が上限に達したため終了します".red().bold()
            );
            if let Some(err) = &report.last_error {
                eprintln!("  {}", err);
            }
        }
    }
    println!("  在庫確認: {}回", report.checks);
    println!(
        "  購入成功: {}回 / 購入失敗: {}回",
        report.purchase_count, report.purchase_failures
    );
    if !report.instance_ids.is_empty() {
        println!("  インスタンスID: {}", report.instance_ids.join(", ").cyan());
    }
}
