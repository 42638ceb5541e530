//! Progress events emitted while a run is in flight

/// Event sent to an optional progress listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Run is starting
    Started { total: usize, batches: usize },
    /// One item failed; the run continues
    ItemFailed { id: u64, error: String },
    /// A whole batch has finished
    BatchCompleted {
        batch: usize,
        processed: usize,
        total: usize,
    },
}
