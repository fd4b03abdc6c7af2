pub mod error;
pub mod model;
pub mod store;

pub use error::*;
pub use model::*;
pub use store::{ConfigStore, LoadedConfig};

use std::path::{Path, PathBuf};

/// 設定ファイルパスを直接指定する環境変数
pub const ENV_CONFIG_PATH: &str = "BUNDLEHUNT_CONFIG";

pub const CONFIG_FILE_NAME: &str = "config.json";

/// 設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 引数で明示されたパス (存在しなくてもよい。load 時に作成される)
/// 2. 環境変数 BUNDLEHUNT_CONFIG
/// 3. カレントディレクトリ: config.json
/// 4. ./.bundlehunt/config.json
/// 5. ~/.config/bundlehunt/config.json
///
/// どれも無ければ ./config.json を返す。
pub fn find_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    // 1. 明示指定
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    // 2. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
        if !config_path.is_empty() {
            return Ok(PathBuf::from(config_path));
        }
    }

    let current_dir = std::env::current_dir()?;

    // 3. カレントディレクトリ
    let local = current_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(local);
    }

    // 4. ./.bundlehunt/ ディレクトリ
    let project = current_dir.join(".bundlehunt").join(CONFIG_FILE_NAME);
    if project.exists() {
        return Ok(project);
    }

    // 5. グローバル設定
    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("bundlehunt").join(CONFIG_FILE_NAME);
        if global.exists() {
            return Ok(global);
        }
    }

    Ok(local)
}
