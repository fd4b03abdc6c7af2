mod commands;
mod display;
mod logging;
mod monitor;
mod shutdown;
mod wizard;

use anyhow::Context;
use bundlehunt_config::ConfigStore;
use clap::{Parser, Subcommand};
use commands::run::RunOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bundlehunt")]
#[command(
    about = "Tencent Cloud Lighthouse のパッケージ在庫を監視し、在庫が出た瞬間に購入する",
    long_about = None
)]
struct Cli {
    /// 設定ファイルのパス (省略時は BUNDLEHUNT_CONFIG → ./config.json → ./.bundlehunt/config.json → ~/.config/bundlehunt/config.json)
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 在庫監視と自動購入を開始 (デフォルト)
    Run {
        /// 監視するパッケージID (設定ファイルの bundleId より優先)
        #[arg(short, long)]
        bundle: Option<String>,
        /// 確認間隔 (ミリ秒)
        #[arg(short, long, value_name = "MS")]
        interval: Option<u64>,
        /// 在庫確認の連続失敗で終了するまでの回数
        #[arg(long)]
        max_retries: Option<u32>,
        /// 購入に成功したら終了する
        #[arg(long)]
        exit_after_purchase: bool,
        /// 対話式のパッケージ選択を行わない
        #[arg(long)]
        non_interactive: bool,
    },
    /// パッケージを対話的に選択して設定ファイルに保存
    Select,
    /// 設定された種別のパッケージ一覧を表示
    Bundles {
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// 認証情報と API 疎通を確認
    Check,
    /// 種別一覧と ID 照会でパッケージ状態を比較
    Inspect {
        /// パッケージID
        bundle_id: String,
    },
    /// 現在の設定を表示 (秘密鍵はマスク)
    Config {
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            // 設定読み込み前のエラーでもコンソールには出す
            logging::init(None);
            tracing::error!("{:#}", e);
            1
        }
    };

    // 対話入力のブロッキングタスクを待たずに終了する
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    // 設定読み込み中のシグナルも停止要求として扱う
    let mut shutdown = shutdown::listen();

    let command = cli.command.unwrap_or(Commands::Run {
        bundle: None,
        interval: None,
        max_retries: None,
        exit_after_purchase: false,
        non_interactive: false,
    });

    // Versionコマンドは設定ファイル不要
    if matches!(command, Commands::Version) {
        println!("bundlehunt {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let path = bundlehunt_config::find_config_file(cli.config_path.as_deref())?;
    let loaded = ConfigStore::new(&path)
        .load()
        .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))?;

    logging::init(Some(&loaded.config.log_file));
    if loaded.created {
        tracing::warn!(
            path = %loaded.path.display(),
            "Config file not found, created one with defaults"
        );
    }
    tracing::debug!(path = %loaded.path.display(), "Loaded config");

    match command {
        Commands::Run {
            bundle,
            interval,
            max_retries,
            exit_after_purchase,
            non_interactive,
        } => {
            let options = RunOptions {
                bundle,
                interval,
                max_retries,
                exit_after_purchase,
                non_interactive,
            };
            commands::run::handle(loaded, options, shutdown).await
        }
        Commands::Select => commands::select::handle(loaded, shutdown).await,
        Commands::Bundles { json } => {
            let listing = commands::bundles::handle(&loaded.config, json);
            interruptible(listing, &mut shutdown).await
        }
        Commands::Check => {
            let check = commands::check::handle(&loaded.config);
            interruptible(check, &mut shutdown).await
        }
        Commands::Inspect { bundle_id } => {
            let inspection = commands::inspect::handle(&loaded.config, &bundle_id);
            interruptible(inspection, &mut shutdown).await
        }
        Commands::Config { json } => {
            commands::config::handle(&loaded, json)?;
            Ok(0)
        }
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }
}

/// 停止要求で打ち切られたコマンドは終了コード0
async fn interruptible(
    fut: impl std::future::Future<Output = anyhow::Result<()>>,
    shutdown: &mut tokio::sync::watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    match shutdown::or_shutdown(fut, shutdown).await {
        Some(result) => result.map(|()| 0),
        None => Ok(0),
    }
}
