use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("recipe corpus is empty")]
    EmptyCorpus,

    #[error("recipe #{record} is missing required field `{field}`")]
    MissingField { record: usize, field: &'static str },

    #[error("recipe #{record} has no ingredient terms left after weighting")]
    DegenerateRecord { record: usize },

    #[error("{}: missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("unsupported corpus file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no corpus files found at {}", .0.display())]
    NoCorpusFiles(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors caused by caller input rather than by the corpus or the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidThreshold(_))
    }
}
