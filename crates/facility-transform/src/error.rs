use thiserror::Error;

/// Failures while writing records out to a byte sink.
///
/// Reading never fails: malformed input becomes defaults or an empty
/// collection.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, TransformError>;
