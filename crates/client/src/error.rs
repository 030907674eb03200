//! Error types for the Graph client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Graph client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Token acquisition failed or the configured credentials were rejected.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from Graph.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// No usable access token and none could be acquired.
    #[error("Access token expired, please re-authenticate")]
    TokenExpired,

    /// Invalid response format from Graph.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Throttled and the retry budget was exhausted.
    #[error("Rate limited: retry after {0:?}")]
    RateLimited(Option<Duration>),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// TLS/SSL error.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A paged collection kept returning `@odata.nextLink` past the safety limit.
    #[error("Pagination did not terminate after {0} pages")]
    PageLimitExceeded(usize),
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::RateLimited(_) | Self::MaxRetriesExceeded(_)
        )
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Graph signals throttling with 429 and transient overload with 503/504.
    /// Every other status fails immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthFailed(_) | Self::TokenExpired => true,
            Self::ApiError { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        let err = ClientError::RateLimited(Some(Duration::from_secs(1)));
        assert!(err.is_retryable());

        let err = ClientError::AuthFailed("test".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(ClientError::AuthFailed("test".to_string()).is_auth_error());
        assert!(ClientError::TokenExpired.is_auth_error());

        let unauthorized = ClientError::ApiError {
            status: 401,
            url: "https://graph.microsoft.com/v1.0/users".to_string(),
            message: "InvalidAuthenticationToken".to_string(),
            request_id: None,
        };
        assert!(unauthorized.is_auth_error());

        let forbidden = ClientError::ApiError {
            status: 403,
            url: "https://graph.microsoft.com/v1.0/users".to_string(),
            message: "Authorization_RequestDenied".to_string(),
            request_id: None,
        };
        assert!(!forbidden.is_auth_error());
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(ClientError::is_retryable_status(429));
        assert!(ClientError::is_retryable_status(503));
        assert!(ClientError::is_retryable_status(504));

        assert!(!ClientError::is_retryable_status(400));
        assert!(!ClientError::is_retryable_status(401));
        assert!(!ClientError::is_retryable_status(403));
        assert!(!ClientError::is_retryable_status(404));
        assert!(!ClientError::is_retryable_status(500));
        assert!(!ClientError::is_retryable_status(200));
    }

    #[test]
    fn test_api_error_display_includes_request_id() {
        let err = ClientError::ApiError {
            status: 403,
            url: "https://graph.microsoft.com/v1.0/subscribedSkus".to_string(),
            message: "Authorization_RequestDenied: Insufficient privileges".to_string(),
            request_id: Some("8d1e6c2a-0000-4000-8000-000000000000".to_string()),
        };

        let display = err.to_string();
        assert!(display.contains("403"));
        assert!(display.contains("Insufficient privileges"));
        assert!(display.contains("[Request ID: 8d1e6c2a-0000-4000-8000-000000000000]"));
        assert_eq!(err.status(), Some(403));
    }
}
