use std::path::PathBuf;

/// Everything that can abort a conversion run.
///
/// A malformed declaration fragment is not in here: the parser drops the
/// fragment and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input file \"{}\" not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("No extractable markup: {0}")]
    NoExtractableMarkup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Stylesheet error: {0}")]
    Stylesheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
