use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::BookId;
use super::status::BookStatus;
use crate::domain::error::DomainError;

/// 蔵書レコード。Catalogが所有し、Catalogを通じて操作する。
///
/// タイトル・著者の空チェックや出版年の範囲チェックは入力層の責務で、
/// ここでは行わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: i32,
    #[serde(default)]
    status: BookStatus,
}

impl Book {
    /// 新しいIDを採番し、状態は `Available` で作成する。
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self::with_parts(BookId::new(), title, author, year, BookStatus::default())
    }

    /// IDと状態を明示して作成する（読み込み・テスト用）。
    pub fn with_parts(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// 状態文字列を検証して更新する。不正値なら何も変更しない。
    pub fn update_status(&mut self, new_status: &str) -> Result<&Book, DomainError> {
        let status: BookStatus = new_status.parse()?;
        self.set_status(status);
        Ok(&*self)
    }

    pub fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }

    /// タイトル・著者の完全一致（大文字小文字を区別）
    pub fn same_work(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author == author
    }

    /// 検索語にマッチするか。`query_lower` は小文字化済みであること。
    pub(crate) fn matches(&self, query: &str, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.author.to_lowercase().contains(query_lower)
            || self.year.to_string().contains(query)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Title: {} | Author: {} | Year: {} | Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_defaults_to_available() {
        let book = Book::new("Book One", "Author One", 2000);
        assert_eq!(book.status(), BookStatus::Available);
        assert_eq!(book.title(), "Book One");
        assert_eq!(book.author(), "Author One");
        assert_eq!(book.year(), 2000);
    }

    #[test]
    fn new_books_get_distinct_ids() {
        let a = Book::new("A", "X", 2000);
        let b = Book::new("A", "X", 2000);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn with_parts_keeps_given_id_and_status() {
        let book = Book::with_parts(
            BookId::from("fixed"),
            "T",
            "A",
            1999,
            BookStatus::CheckedOut,
        );
        assert_eq!(book.id().as_str(), "fixed");
        assert_eq!(book.status(), BookStatus::CheckedOut);
    }

    #[test]
    fn update_status_valid() {
        let mut book = Book::new("T", "A", 2000);
        let updated = book.update_status("checked_out").unwrap();
        assert_eq!(updated.status(), BookStatus::CheckedOut);
        assert_eq!(book.status(), BookStatus::CheckedOut);
    }

    #[test]
    fn update_status_invalid_leaves_record_unchanged() {
        let mut book = Book::new("T", "A", 2000);
        let before = book.clone();
        let err = book.update_status("not_a_valid_status").unwrap_err();
        assert_eq!(err, DomainError::InvalidStatus("not_a_valid_status".into()));
        assert_eq!(book, before);
    }

    #[test]
    fn render_has_fixed_field_order() {
        let book = Book::with_parts(
            BookId::from("id-1"),
            "Book One",
            "Author One",
            2000,
            BookStatus::Available,
        );
        assert_eq!(
            book.to_string(),
            "ID: id-1 | Title: Book One | Author: Author One | Year: 2000 | Status: available"
        );
    }

    #[test]
    fn matches_is_case_insensitive_on_text_fields() {
        let book = Book::new("The Rust Book", "Steve Klabnik", 2018);
        assert!(book.matches("rust", "rust"));
        assert!(book.matches("KLAB", "klab"));
        assert!(book.matches("201", "201"));
        assert!(!book.matches("python", "python"));
    }

    #[test]
    fn deserialize_without_status_defaults_to_available() {
        let json = r#"{"id":"x","title":"T","author":"A","year":1900}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.status(), BookStatus::Available);
    }
}
