use crate::domain::backend::{CatalogBackend, LoadOutcome};
use crate::domain::model::book::Book;
use crate::domain::model::catalog::Catalog;
use crate::domain::model::id::BookId;

use super::error::AppError;
use super::outcome::Outcome;

/// Catalogに対するユースケース。
/// 起動時に一度だけ load し、以降は mutate → save（全件上書き）で操作する。
///
/// 内部で排他制御はしない。複数の呼び出し元から使う場合は外側で直列化すること。
pub struct CatalogRepository<B: CatalogBackend> {
    catalog: Catalog,
    backend: B,
}

impl<B: CatalogBackend> CatalogRepository<B> {
    /// バックエンドから全件を読み込んで構築する。
    /// ファイルが無い・壊れている場合は空のCatalogで開始する。
    pub fn open(backend: B) -> Result<Self, AppError> {
        let books = match backend
            .load()
            .map_err(|e| AppError::StorageRead(Box::new(e)))?
        {
            LoadOutcome::Found(books) => {
                tracing::info!(count = books.len(), "catalog loaded");
                books
            }
            LoadOutcome::NotFound => {
                tracing::info!("no catalog found, starting empty");
                Vec::new()
            }
            LoadOutcome::Corrupt { reason } => {
                tracing::warn!(%reason, "catalog data is corrupt, starting empty");
                Vec::new()
            }
        };
        Ok(Self {
            catalog: Catalog::from_books(books),
            backend,
        })
    }

    /// 蔵書を追加する。同じタイトル・著者があれば書き込みせずに Rejected を返す。
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> Result<Outcome, AppError> {
        let id = match self.catalog.add(title, author, year) {
            Ok(id) => id,
            Err(e) => return Ok(e.into()),
        };
        self.persist()?;
        tracing::info!(%id, title, author, year, "book added");
        Ok(Outcome::Added(id))
    }

    pub fn remove(&mut self, id: &BookId) -> Result<Outcome, AppError> {
        let removed = match self.catalog.remove(id) {
            Ok(book) => book,
            Err(e) => return Ok(e.into()),
        };
        self.persist()?;
        tracing::info!(%id, title = removed.title(), "book removed");
        Ok(Outcome::Removed(id.clone()))
    }

    /// 状態を更新する。現在と同じ値でも成功として保存し、StatusUnchanged を返す。
    pub fn update_status(&mut self, id: &BookId, new_status: &str) -> Result<Outcome, AppError> {
        let (previous, status) = match self.catalog.update_status(id, new_status) {
            Ok(transition) => transition,
            Err(e) => return Ok(e.into()),
        };
        self.persist()?;
        if previous == status {
            tracing::debug!(%id, %status, "status unchanged");
            return Ok(Outcome::StatusUnchanged {
                id: id.clone(),
                status,
            });
        }
        tracing::info!(%id, from = %previous, to = %status, "status changed");
        Ok(Outcome::StatusChanged {
            id: id.clone(),
            status,
        })
    }

    /// 検索結果は新しいリスト。Catalogの変更には追従しない。
    pub fn find(&self, query: &str) -> Vec<&Book> {
        self.catalog.find(query)
    }

    pub fn list(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.catalog.get(id)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- private ---

    /// 書き込み失敗時はメモリ上の変更を戻さない。呼び出し元に致命的エラーとして返す。
    fn persist(&self) -> Result<(), AppError> {
        self.backend.save(self.catalog.books()).map_err(|e| {
            tracing::error!(error = %e, "failed to persist catalog");
            AppError::StorageWrite(Box::new(e))
        })?;
        tracing::debug!(count = self.catalog.len(), "catalog persisted");
        Ok(())
    }
}
