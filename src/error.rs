use thiserror::Error;

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("tokenizer error: {0}")]
    Tokenizer(#[from] tantivy::TantivyError),
    #[error("query error: {0}")]
    Query(#[from] tantivy::query::QueryParserError),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
