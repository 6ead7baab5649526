//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use library_catalog::application::repository::CatalogRepository;
use library_catalog::domain::backend::{CatalogBackend, LoadOutcome};
use library_catalog::domain::model::book::Book;

// =============================================================================
// InMemoryBackend: テスト用バックエンド
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error: write refused")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリバックエンド。JSON文字列として保持する。
#[derive(Default)]
pub struct InMemoryBackend {
    content: RefCell<Option<String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意の内容（壊れたJSONを含む）を保存済みとして持つ。
    pub fn with_raw(content: &str) -> Self {
        let backend = Self::new();
        *backend.content.borrow_mut() = Some(content.to_string());
        backend
    }

    pub fn with_books(books: &[Book]) -> Self {
        let backend = Self::new();
        backend.save(books).unwrap();
        backend.writes.set(0);
        backend
    }

    pub fn raw(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl CatalogBackend for InMemoryBackend {
    type Error = InMemoryError;

    fn load(&self) -> Result<LoadOutcome, Self::Error> {
        match self.content.borrow().as_deref() {
            None => Ok(LoadOutcome::NotFound),
            Some(json) => match serde_json::from_str(json) {
                Ok(books) => Ok(LoadOutcome::Found(books)),
                Err(e) => Ok(LoadOutcome::Corrupt {
                    reason: e.to_string(),
                }),
            },
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if self.fail_writes.get() {
            return Err(InMemoryError);
        }
        let json = serde_json::to_string(books).unwrap();
        *self.content.borrow_mut() = Some(json);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// 空のCatalogを持つRepository。
pub fn empty_repo() -> CatalogRepository<InMemoryBackend> {
    CatalogRepository::open(InMemoryBackend::new()).unwrap()
}

/// 標準的なテスト用Catalog:
/// ```text
/// 1. Book One / Author One / 2000
/// 2. Book Two / Author Two / 2010
/// ```
pub fn standard_books() -> Vec<Book> {
    vec![
        Book::new("Book One", "Author One", 2000),
        Book::new("Book Two", "Author Two", 2010),
    ]
}

pub fn standard_repo() -> CatalogRepository<InMemoryBackend> {
    CatalogRepository::open(InMemoryBackend::with_books(&standard_books())).unwrap()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
