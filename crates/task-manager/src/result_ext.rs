//! Result extension trait for logging errors with context.

use std::fmt::Display;
use tracing::error;

/// Adds a `log` method to `Result` that records the error with context
/// and the caller's source location, then hands the result back unchanged.
pub trait ResultExt<T, E> {
    /// Log the error with context if this is an `Err` variant.
    ///
    /// ```ignore
    /// use task_manager::result_ext::ResultExt;
    ///
    /// bootstrap::run(&state).await.log("seeding initial data")?;
    /// ```
    fn log<S: ToString>(self, context: S) -> Result<T, E>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn log<S: ToString>(self, context: S) -> Result<T, E> {
        if let Err(ref e) = self {
            let caller_location = std::panic::Location::caller();
            error!(
                target: "task_manager",
                error = %e,
                file = %format!("{}:{}", caller_location.file(), caller_location.line()),
                context = %context.to_string(),
                "Operation failed"
            );
        }
        self
    }
}
