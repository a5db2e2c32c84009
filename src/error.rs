use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixelTypeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corpus Error: {0}")]
    Corpus(String),

    #[error("Layout Error: {0}")]
    Layout(String),
}

pub type PtResult<T> = Result<T, PixelTypeError>;
