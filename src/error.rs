// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for a11y-healthcheck

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HealthcheckError>;

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("Color parse error in variant \"{variant}\" token {token}: \"{value}\" ({reason})")]
    ColorParse {
        variant: String,
        token: String,
        value: String,
        reason: String,
    },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
