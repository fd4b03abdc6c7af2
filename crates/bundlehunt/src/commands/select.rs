use crate::display;
use crate::shutdown;
use crate::wizard::{Prompter, WizardOutcome};
use anyhow::Context;
use bundlehunt_cloud::{BundleInfo, BundleProvider};
use bundlehunt_config::{ConfigStore, LoadedConfig};
use colored::Colorize;
use tokio::sync::watch;

/// 標準入力でウィザードを実行する
///
/// 読み込みはブロッキングタスクで行い、停止要求が先に来たら None。
pub async fn interactive_selection(
    bundles: Vec<BundleInfo>,
    store: ConfigStore,
    ask_start: bool,
    shutdown: &mut watch::Receiver<bool>,
) -> anyhow::Result<Option<WizardOutcome>> {
    let task = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        prompter.run(&bundles, ask_start, |bundle_id| {
            store.update_bundle_id(bundle_id)?;
            Ok(())
        })
    });

    match shutdown::or_shutdown(task, shutdown).await {
        None => Ok(None),
        Some(joined) => {
            let outcome = joined.context("対話入力タスクが異常終了しました")??;
            Ok(Some(outcome))
        }
    }
}

/// パッケージを選んで設定ファイルに保存する (監視は開始しない)
pub async fn handle(
    loaded: LoadedConfig,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    let LoadedConfig { config, path, .. } = loaded;
    config.validate()?;

    let provider = super::provider(&config)?;

    let filter = provider.category_filter();
    let Some(listed) = shutdown::or_shutdown(provider.list_bundles(&filter), &mut shutdown).await
    else {
        return Ok(0);
    };
    let bundles = listed.context("パッケージ一覧の取得に失敗しました")?;

    display::print_current_config(&config, &path);

    match interactive_selection(bundles, ConfigStore::new(&path), false, &mut shutdown).await? {
        None | Some(WizardOutcome::Cancelled) => {
            tracing::info!("Selection cancelled by operator");
            println!("{}", "選択をキャンセルしました。".yellow());
        }
        Some(WizardOutcome::Chosen { bundle, saved, .. }) => {
            if saved {
                tracing::info!(bundle_id = %bundle.id, "Bundle selection saved");
                println!();
                println!("次のコマンドで在庫監視を開始できます:");
                println!("  {} run", "bundlehunt".cyan());
            } else {
                println!();
                println!("設定ファイルは変更していません。このパッケージを監視するには:");
                println!("  {} run --bundle {}", "bundlehunt".cyan(), bundle.id);
            }
        }
    }

    Ok(0)
}
