//! Grading table configuration.
//!
//! A grading file is a JSON array of
//! `{ "minimumScore", "tier", "label", "color" }` rows, highest threshold first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::engine::{GradeDescriptor, GradingPolicy, GradingPolicyError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("bad grading table in {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

/// Why a grading table's text could not become a [`GradingPolicy`].
#[derive(Debug, Error)]
pub enum TableError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] GradingPolicyError),
}

pub fn parse_grading_policy(json: &str) -> Result<GradingPolicy, TableError> {
    let table: Vec<GradeDescriptor> = serde_json::from_str(json)?;
    Ok(GradingPolicy::new(table)?)
}

pub fn load_grading_policy<P: AsRef<Path>>(path: P) -> Result<GradingPolicy, ConfigError> {
    let path = path.as_ref();

    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let policy = parse_grading_policy(&json).map_err(|source| ConfigError::Table {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), grades = policy.descriptors().len(), "loaded grading table");
    Ok(policy)
}
