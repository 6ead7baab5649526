use std::path::PathBuf;

/// カタログファイルの既定パス
pub const DEFAULT_CATALOG_PATH: &str = "data/books.json";

/// カタログファイルを指定する環境変数
pub const CATALOG_PATH_ENV: &str = "LIBRARY_CATALOG";

/// 既定のログフィルタ（`RUST_LOG` 未設定時）
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
}

impl AppConfig {
    /// 優先順位: 第1引数 → `LIBRARY_CATALOG` → `data/books.json`
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(CATALOG_PATH_ENV).ok(),
        )
    }

    pub fn resolve(arg: Option<String>, env: Option<String>) -> Self {
        let catalog_path = arg
            .or(env)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));
        Self { catalog_path }
    }
}
