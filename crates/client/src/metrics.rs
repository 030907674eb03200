//! Metrics collection for Graph API calls.
//!
//! This module provides metrics collection for Graph requests, including:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Error categorization
//! - Group-name cache hits and misses
//!
//! # What this module does NOT handle:
//! - Metrics exposition (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "graph_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "graph_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "graph_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "graph_errors_total";

/// Metric name for group-name cache hit counter.
pub const METRIC_CACHE_HITS: &str = "graph_group_cache_hits_total";

/// Metric name for group-name cache miss counter.
pub const METRIC_CACHE_MISSES: &str = "graph_group_cache_misses_total";

/// Metric name for pages fetched while following `@odata.nextLink`.
pub const METRIC_PAGES_TOTAL: &str = "graph_pages_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Throttling (HTTP 429 after retries)
    Throttled,
    /// Token acquisition failures
    Auth,
    /// TLS/SSL errors
    Tls,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Throttled => "throttled",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Tls => "tls",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ConnectionRefused(_) => ErrorCategory::Transport,
            ClientError::TlsError(_) => ErrorCategory::Tls,
            ClientError::AuthFailed(_) | ClientError::TokenExpired => ErrorCategory::Auth,
            ClientError::RateLimited(_) | ClientError::MaxRetriesExceeded(_) => {
                ErrorCategory::Throttled
            }
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ErrorCategory::Transport
                } else {
                    ErrorCategory::Unknown
                }
            }
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Graph API calls.
///
/// Thin wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (1-based).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error from a ClientError.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a fetched page of a collection.
    pub fn record_page(&self, endpoint: &str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_PAGES_TOTAL, "endpoint" => endpoint.to_string()).increment(1);
    }

    /// Record a group-name cache hit.
    pub fn record_cache_hit(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_CACHE_HITS).increment(1);
    }

    /// Record a group-name cache miss.
    pub fn record_cache_miss(&self) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_CACHE_MISSES).increment(1);
    }
}
