// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors raised while fetching or storing analysis data.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A document could not be parsed or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The source has no data for this analysis.
    #[error("no {kind} analysis for {uuid}")]
    NotFound {
        /// Analysis name.
        kind: String,
        /// Entity uuid.
        uuid: String,
    },
    /// Any other source failure.
    #[error("source error: {0}")]
    Source(String),
}
