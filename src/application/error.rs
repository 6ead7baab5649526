/// 致命的なエラー。回復可能な結果は `Outcome` で返す。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read catalog: {0}")]
    StorageRead(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to write catalog: {0}")]
    StorageWrite(#[source] Box<dyn std::error::Error + Send + Sync>),
}
