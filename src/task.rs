//! Task polling utilities
//!
//! Widgets spawn their async work on the tokio runtime and collect it from
//! the frame loop without blocking.

use futures::FutureExt;
use tokio::task::JoinHandle;

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, tokio::task::JoinError>),
}

/// Poll an optional task handle and return its result if finished.
///
/// The handle is taken out of `task` only once it has finished, so a
/// `Complete` result is yielded at most once per spawned task.
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    match task {
        None => return PollResult::NoTask,
        Some(handle) if !handle.is_finished() => return PollResult::Pending,
        Some(_) => {}
    }

    let Some(handle) = task.take() else {
        return PollResult::NoTask;
    };

    match handle.now_or_never() {
        Some(result) => PollResult::Complete(result),
        None => {
            // Shouldn't happen since we checked is_finished()
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}
