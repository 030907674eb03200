//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError`, `ConfigError` and `ReportError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).
//! - Reports that completed with warnings still exit 0.

use graph_client::ClientError;
use license_config::ConfigError;
use license_report::ReportError;

/// Structured exit codes for license-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed, possibly with recoverable warnings.
    Success = 0,

    /// Unhandled or generic failure, including output write failures.
    GeneralError = 1,

    /// Token acquisition failed or the token was rejected.
    ///
    /// Scripts should check the app registration secret or token.
    AuthenticationFailed = 2,

    /// Network, timeout, TLS or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// A Graph resource was not found.
    NotFound = 4,

    /// Invalid configuration or input files, or no licensed users.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// The app registration lacks a required Graph permission.
    PermissionDenied = 6,

    /// Graph kept throttling after all retries.
    RateLimited = 7,

    /// Graph answered 502/503/504 after all retries.
    ServiceUnavailable = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[cfg_attr(not(test), allow(dead_code))]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::TokenExpired => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,

            ClientError::ConnectionRefused(_) => ExitCode::ConnectionError,
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::TlsError(_) => ExitCode::ConnectionError,

            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,

            ClientError::RateLimited(_) => ExitCode::RateLimited,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,

            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,
            ClientError::MaxRetriesExceeded(_) => ExitCode::ServiceUnavailable,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::ApiError { .. } => ExitCode::GeneralError,
            ClientError::PageLimitExceeded(_) => ExitCode::GeneralError,
        }
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::MissingInput { .. } => ExitCode::ValidationError,
            ReportError::Csv { .. } => ExitCode::ValidationError,
            ReportError::NoLicensedUsers => ExitCode::ValidationError,
            ReportError::Io { .. } => ExitCode::GeneralError,
            ReportError::Serialization(_) | ReportError::Encoding(_) => ExitCode::GeneralError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ValidationError
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(report_err) = cause.downcast_ref::<ReportError>() {
                return ExitCode::from(report_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;
    use std::time::Duration;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://graph.microsoft.com/v1.0/users".to_string(),
            message: "error".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::ServiceUnavailable.as_i32(), 8);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_is_retryable() {
        assert!(!ExitCode::AuthenticationFailed.is_retryable());
        assert!(ExitCode::ConnectionError.is_retryable());
        assert!(!ExitCode::ValidationError.is_retryable());
        assert!(ExitCode::RateLimited.is_retryable());
        assert!(ExitCode::ServiceUnavailable.is_retryable());
    }

    #[test]
    fn test_client_error_mapping() {
        assert_eq!(
            ExitCode::from(&ClientError::AuthFailed("invalid_client".to_string())),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(ExitCode::from(&api_error(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&api_error(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&api_error(404)), ExitCode::NotFound);
        assert_eq!(ExitCode::from(&api_error(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api_error(500)), ExitCode::GeneralError);
        assert_eq!(
            ExitCode::from(&ClientError::RateLimited(Some(Duration::from_secs(30)))),
            ExitCode::RateLimited
        );
        assert_eq!(
            ExitCode::from(&ClientError::ConnectionRefused("localhost:1".to_string())),
            ExitCode::ConnectionError
        );
    }

    #[test]
    fn test_report_error_mapping() {
        let missing = ReportError::MissingInput {
            path: PathBuf::from("SkuLookup.csv"),
        };
        assert_eq!(ExitCode::from(&missing), ExitCode::ValidationError);
        assert_eq!(
            ExitCode::from(&ReportError::NoLicensedUsers),
            ExitCode::ValidationError
        );
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = Err::<(), _>(api_error(403))
            .context("Failed to list licensed users")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::PermissionDenied);

        let err = Err::<(), _>(ConfigError::MissingAuth)
            .context("Failed to build configuration")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ValidationError);

        assert_eq!(anyhow::anyhow!("boom").exit_code(), ExitCode::GeneralError);
    }
}
