// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeywordTableError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate keyword `{keyword}` at line {line} (first defined at line {first_line})")]
    DuplicateKeyword {
        keyword: String,
        line: usize,
        first_line: usize,
    },

    #[error("invalid keyword `{keyword}`: {reason}")]
    InvalidKeyword { keyword: String, reason: &'static str },

    #[error("keyword set is empty; nothing to generate")]
    EmptyKeywordSet,

    /// Every signature candidate was tried without finding collision-free values.
    #[error("hash generation failed: gave up after {signatures_tried} signature candidates")]
    GiveUp { signatures_tried: usize },

    #[error("inconsistent keyword table: {0}")]
    InvalidTable(String),

    #[error("keyword table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl KeywordTableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = KeywordTableError> = std::result::Result<T, E>;
