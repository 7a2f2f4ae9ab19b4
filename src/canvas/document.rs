use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

use super::{item::QuizItem, result::ResultItem};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON array at the top level", .path.display())]
    NotArray { path: PathBuf },

    #[error("entry {index} in {} is malformed: {source}", .path.display())]
    Entry {
        path: PathBuf,
        index: usize,
        source: serde_json::Error,
    },
}

pub fn read_quiz(path: &Path) -> Result<Vec<QuizItem>, LoadError> {
    read_array(path)
}

pub fn read_results(path: &Path) -> Result<Vec<ResultItem>, LoadError> {
    read_array(path)
}

/// Parses a quiz export already in memory.
pub fn parse_quiz(json: &str) -> Result<Vec<QuizItem>, LoadError> {
    parse_array(json, Path::new("<quiz>"))
}

/// Parses a results export already in memory.
pub fn parse_results(json: &str) -> Result<Vec<ResultItem>, LoadError> {
    parse_array(json, Path::new("<results>"))
}

fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let body = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_array(&body, path)
}

// Entries are decoded one by one so a bad entry is reported by index.
fn parse_array<T: DeserializeOwned>(json: &str, path: &Path) -> Result<Vec<T>, LoadError> {
    let value: Value = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(entries) = value else {
        return Err(LoadError::NotArray {
            path: path.to_path_buf(),
        });
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|source| LoadError::Entry {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}
