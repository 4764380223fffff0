//! Task state definitions for tracking crawl progress
//!
//! Every unit of crawl work moves through a small state machine:
//! `Pending -> {Skipped | Fetching -> Writing -> {Done | Parsing ->
//! Recursing -> Done} | Failed}`. Skips are silent and normal; failures
//! are logged and contained to the task they occur in.

use std::fmt;

/// Represents the current state of a crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Task is queued and has not been gated yet
    Pending,

    /// Task was dropped by the gate: depth exhausted, off-host, or
    /// already visited
    Skipped,

    /// Task is obtaining its bytes (network fetch or cache read)
    Fetching,

    /// Task is persisting its bytes to the local store
    Writing,

    /// Task is extracting links from HTML content
    Parsing,

    /// Task is handing discovered links back for traversal
    Recursing,

    /// Task completed; its file is on disk
    Done,

    /// Task failed; its subtree is never expanded
    Failed,
}

impl TaskState {
    /// Returns true if this is a terminal state (no further processing)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Skipped | Self::Done | Self::Failed)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if this represents a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Fetching => "fetching",
            Self::Writing => "writing",
            Self::Parsing => "parsing",
            Self::Recursing => "recursing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
