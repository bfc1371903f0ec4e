//! Scheduler error types.

/// Errors surfaced by [`Scheduler::update`](crate::Scheduler::update).
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A system returned an error; the rest of the frame was skipped.
    #[error("system `{system}` failed on frame {frame}: {source}")]
    SystemFailed {
        /// Name of the failing system.
        system: String,
        /// Frame number in which it failed.
        frame: u64,
        /// The error the system returned.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
