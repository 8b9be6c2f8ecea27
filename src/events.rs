//! Progress events emitted during the compare phase

/// Real-time progress updates while comparing patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareProgressEvent {
    /// Per-file checks are about to start.
    Started { total: usize },

    /// One more file has been checked.
    Progress { completed: usize, total: usize },

    /// All checks are done.
    Finished { stale: usize },
}
