use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("io error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write analytics state {path}")]
    Write {
        path: PathBuf,
        #[source]
        error: atomicwrites::Error<std::io::Error>,
    },
    #[error("invalid analytics state in {path}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
