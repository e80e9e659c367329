use std::path::PathBuf;

use uuid::Uuid;

use crate::model::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn project_not_found(id: Uuid) -> Self {
        StoreError::NotFound {
            kind: "project",
            id,
        }
    }

    pub fn task_not_found(id: Uuid) -> Self {
        StoreError::NotFound { kind: "task", id }
    }
}
