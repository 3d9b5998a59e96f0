// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {dimension} range key '{key}'")]
    InvalidRangeKey { dimension: &'static str, key: String },

    #[error("unknown sort field '{field}' for {kind}")]
    InvalidSortField { kind: &'static str, field: String },

    #[error("invalid sort order '{0}', expected asc or desc")]
    InvalidSortOrder(String),

    #[error("invalid transaction type '{0}', expected income or expense")]
    InvalidKind(String),

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn range_key(dimension: &'static str, key: &str) -> Self {
        Error::InvalidRangeKey {
            dimension,
            key: key.to_string(),
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }
}
