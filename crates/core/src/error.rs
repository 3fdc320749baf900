#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Catalog list '{0}' is empty")]
    EmptyCatalog(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),
}
