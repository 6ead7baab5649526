use super::book::Book;
use super::id::BookId;
use super::status::BookStatus;
use crate::domain::error::DomainError;

/// 集約ルート。蔵書の順序付きコレクションと一意性ルールを持つ。
/// I/Oは行わない。永続化はapplication層のCatalogRepositoryが担う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    /// 同じタイトル・著者の蔵書を返す。
    pub fn find_duplicate(&self, title: &str, author: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.same_work(title, author))
    }

    /// 蔵書を末尾に追加する。タイトル・著者が重複していれば何もしない。
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> Result<BookId, DomainError> {
        if self.find_duplicate(title, author).is_some() {
            return Err(DomainError::DuplicateRecord {
                title: title.to_string(),
                author: author.to_string(),
            });
        }
        let book = Book::new(title, author, year);
        let id = book.id().clone();
        self.books.push(book);
        Ok(id)
    }

    /// 最初に一致したIDの蔵書を取り除いて返す。
    pub fn remove(&mut self, id: &BookId) -> Result<Book, DomainError> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| DomainError::BookNotFound(id.clone()))?;
        Ok(self.books.remove(pos))
    }

    /// 状態を更新し、(更新前, 更新後) を返す。
    pub fn update_status(
        &mut self,
        id: &BookId,
        new_status: &str,
    ) -> Result<(BookStatus, BookStatus), DomainError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or_else(|| DomainError::BookNotFound(id.clone()))?;
        let previous = book.status();
        let current = book.update_status(new_status)?.status();
        Ok((previous, current))
    }

    /// タイトル・著者は部分一致（大文字小文字無視）、出版年は10進文字列の部分一致。
    pub fn find(&self, query: &str) -> Vec<&Book> {
        let query_lower = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.matches(query, &query_lower))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add("Book One", "Author One", 2000).unwrap();
        catalog.add("Book Two", "Author Two", 2010).unwrap();
        catalog
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut catalog = make_catalog();
        catalog.add("Book Three", "Author Three", 2020).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.books()[2].title(), "Book Three");
    }

    #[test]
    fn add_duplicate_is_rejected() {
        let mut catalog = make_catalog();
        let err = catalog.add("Book One", "Author One", 1999).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateRecord { .. }));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut catalog = make_catalog();
        assert!(catalog.add("book one", "Author One", 2000).is_ok());
        assert!(catalog.add("Book One", "Someone Else", 2000).is_ok());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn remove_existing() {
        let mut catalog = make_catalog();
        let id = catalog.books()[0].id().clone();
        let removed = catalog.remove(&id).unwrap();
        assert_eq!(removed.title(), "Book One");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(&id).is_none());
    }

    #[test]
    fn remove_unknown() {
        let mut catalog = make_catalog();
        let err = catalog.remove(&BookId::from("missing")).unwrap_err();
        assert_eq!(err, DomainError::BookNotFound(BookId::from("missing")));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn update_status_reports_transition() {
        let mut catalog = make_catalog();
        let id = catalog.books()[1].id().clone();
        let (before, after) = catalog.update_status(&id, "checked_out").unwrap();
        assert_eq!(before, BookStatus::Available);
        assert_eq!(after, BookStatus::CheckedOut);
        assert_eq!(catalog.get(&id).unwrap().status(), BookStatus::CheckedOut);
    }

    #[test]
    fn update_status_invalid_keeps_catalog() {
        let mut catalog = make_catalog();
        let snapshot = catalog.clone();
        let id = catalog.books()[0].id().clone();
        assert!(catalog.update_status(&id, "lost").is_err());
        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn find_by_title() {
        let catalog = make_catalog();
        let found = catalog.find("Book One");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title(), "Book One");
    }

    #[test]
    fn find_by_author_ignores_case() {
        let catalog = make_catalog();
        assert_eq!(catalog.find("author two").len(), 1);
    }

    #[test]
    fn find_by_year_substring() {
        let catalog = make_catalog();
        assert_eq!(catalog.find("2010").len(), 1);
        assert_eq!(catalog.find("20").len(), 2);
    }

    #[test]
    fn find_nonexistent() {
        let catalog = make_catalog();
        assert!(catalog.find("Nonexistent").is_empty());
    }
}
