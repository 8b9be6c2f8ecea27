//! Error types for the freshness checks

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that cannot be folded into a "needs update" answer
#[derive(Debug, Error)]
pub enum FreshnessError {
    /// The OS failed while a directory scan was already under way
    #[error("failed while scanning {}: {source}", crate::utils::display_path(.directory))]
    Scan {
        directory: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start compare workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, FreshnessError>;
