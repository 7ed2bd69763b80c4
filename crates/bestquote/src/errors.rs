//! Error handling and exit codes.

use bestquote_core::task::FetchError;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic fetch error (task failure, all sources failed).
    pub const ERROR_GENERIC: i32 = 1;
    /// The batch timed out.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// No tasks to run.
    pub const ERROR_EMPTY: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Cancelled by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}

/// Map a fetch error to the process exit code.
#[must_use]
pub fn exit_code(err: &FetchError) -> i32 {
    match err {
        FetchError::Task { .. } | FetchError::AllFailed(_) => exit_codes::ERROR_GENERIC,
        FetchError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
        FetchError::EmptyTaskSet => exit_codes::ERROR_EMPTY,
        FetchError::Config(_) => exit_codes::ERROR_CONFIG,
        FetchError::Cancelled => exit_codes::ERROR_CANCELED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(exit_code(&FetchError::Cancelled), 130);
        assert_eq!(exit_code(&FetchError::Timeout("deadline".into())), 2);
        assert_eq!(exit_code(&FetchError::EmptyTaskSet), 3);
        assert_eq!(exit_code(&FetchError::Config("bad".into())), 4);
        assert_eq!(exit_code(&FetchError::AllFailed(3)), 1);
    }
}
