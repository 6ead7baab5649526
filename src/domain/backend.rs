use super::model::book::Book;

/// バックエンドからの読み込み結果。
/// NotFound / Corrupt はどちらも致命的ではなく、空のCatalogとして扱われる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Found(Vec<Book>),
    NotFound,
    Corrupt { reason: String },
}

/// 永続化の抽象。Infra層が実装する。
/// 常にコレクション全体を読み書きする。
pub trait CatalogBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self) -> Result<LoadOutcome, Self::Error>;

    /// 与えられたコレクション全体で置き換える。部分書き込みは許されない。
    fn save(&self, books: &[Book]) -> Result<(), Self::Error>;
}
