//! Failures of a collection or aggregation pass. All of them abort the run.

use crate::config::{InputSize, ThreadCount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed file name {file:?}: {reason}")]
    MalformedFileName { file: String, reason: String },

    #[error(
        "malformed content in {file:?}: {line} line {:?} is not an integer timing",
        .value.as_deref().unwrap_or("<missing>")
    )]
    MalformedContent {
        file: String,
        line: &'static str,
        value: Option<String>,
    },

    #[error("{file:?} refers to an unconfigured {what} {value}")]
    UnknownConfiguration {
        file: String,
        what: &'static str,
        value: u32,
    },

    #[error("missing sequential baseline: {reason}")]
    MissingBaseline { reason: String },

    #[error("two sequential baselines for input size {size}: {first:?} and {second:?}")]
    DuplicateBaseline {
        size: InputSize,
        first: String,
        second: String,
    },

    #[error("cannot compute speedup for size {size} with {threads} threads: {reason}")]
    ZeroOrMissingDenominator {
        size: InputSize,
        threads: ThreadCount,
        reason: &'static str,
    },

    #[error("read {file:?}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
