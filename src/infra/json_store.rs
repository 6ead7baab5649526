use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::backend::{CatalogBackend, LoadOutcome};
use crate::domain::model::book::Book;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるCatalogBackend実装。
/// 1 Catalog = 1 JSONファイル（蔵書オブジェクトのフラットな配列）。
pub struct JsonCatalogBackend {
    path: PathBuf,
}

impl JsonCatalogBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// インデント4スペース、非ASCIIはエスケープしない。
    fn to_json(books: &[Book]) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        books.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl CatalogBackend for JsonCatalogBackend {
    type Error = JsonStoreError;

    fn load(&self) -> Result<LoadOutcome, Self::Error> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::NotFound),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<Vec<Book>>(&content) {
            Ok(books) => Ok(LoadOutcome::Found(books)),
            Err(e) => Ok(LoadOutcome::Corrupt {
                reason: e.to_string(),
            }),
        }
    }

    /// 一時ファイルに書いてからrenameする。読み手には常に完全なスナップショットが見える。
    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = Self::to_json(books)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
