pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Occurs when the underlying report sink rejects a write.
    #[error("failed to write to the report sink: {0}")]
    Io(#[from] std::io::Error),
    /// Occurs when a captured body or error value cannot be serialized to JSON.
    #[error("failed to serialize report data to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
