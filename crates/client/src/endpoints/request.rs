//! Retry helper for HTTP requests against Graph and the token authority.
//!
//! Graph throttles with HTTP 429 and sheds load with 503/504, usually with a
//! `Retry-After` header. This module retries those responses, tags every
//! attempt with a fresh `client-request-id`, and turns failures into
//! [`ClientError::ApiError`] carrying Graph's `request-id`.

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{GraphErrorResponse, TokenErrorResponse};
use crate::tracing::inject_trace_context;

/// Upper bound on a single backoff sleep, whatever `Retry-After` says.
const MAX_BACKOFF_SECS: u64 = 120;

/// Sends an HTTP request, retrying throttled and unavailable responses.
///
/// - Retries 429/503/504 up to `max_retries` times.
/// - Waits for `Retry-After` seconds when present, else 2^attempt seconds.
/// - Returns `RateLimited` when a 429 outlasts the retry budget.
/// - Returns `ApiError` for any other non-success status.
///
/// `endpoint` and `method` only label metrics and logs.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let Some(attempt_builder) = builder.try_clone() else {
            debug!("Request builder cannot be cloned for retry");
            return Err(ClientError::MaxRetriesExceeded(attempt));
        };

        let client_request_id = Uuid::new_v4().to_string();
        let attempt_builder =
            inject_trace_context(attempt_builder.header("client-request-id", &client_request_id));

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
            if attempt > 0 {
                m.record_retry(endpoint, method, attempt);
            }
        }

        let started = Instant::now();
        let response = match attempt_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from(e);
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, started.elapsed(), None);
                    m.record_client_error(endpoint, method, &err);
                }
                return Err(err);
            }
        };

        let status = response.status();
        if let Some(m) = metrics {
            m.record_request_duration(endpoint, method, started.elapsed(), Some(status.as_u16()));
        }

        if status.is_success() {
            if attempt > 0 {
                debug!(attempt = attempt + 1, endpoint, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if ClientError::is_retryable_status(status.as_u16()) {
            let retry_after = parse_retry_after(&response);
            if attempt < max_retries {
                let backoff = retry_after
                    .unwrap_or_else(|| Duration::from_secs(2u64.pow(attempt as u32)))
                    .min(Duration::from_secs(MAX_BACKOFF_SECS));
                debug!(
                    attempt = attempt + 1,
                    max_attempts = max_retries + 1,
                    status = status.as_u16(),
                    backoff_secs = backoff.as_secs(),
                    endpoint,
                    "Throttled or unavailable, backing off"
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            warn!(
                attempts = attempt + 1,
                status = status.as_u16(),
                endpoint,
                "Retries exhausted"
            );
            if status == StatusCode::TOO_MANY_REQUESTS {
                let err = ClientError::RateLimited(retry_after);
                if let Some(m) = metrics {
                    m.record_client_error(endpoint, method, &err);
                }
                return Err(err);
            }
        }

        let err = api_error_from_response(response, &client_request_id).await;
        if let Some(m) = metrics {
            m.record_client_error(endpoint, method, &err);
        }
        return Err(err);
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn parse_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Build an `ApiError` from a failed response, preferring Graph's error envelope.
async fn api_error_from_response(response: Response, client_request_id: &str) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get("request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| Some(client_request_id.to_string()));
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    ClientError::ApiError {
        status,
        url,
        message: error_message_from_body(&body),
        request_id,
    }
}

/// Extract a readable message from a Graph or authority error body.
pub(crate) fn error_message_from_body(body: &str) -> String {
    if let Ok(graph) = serde_json::from_str::<GraphErrorResponse>(body) {
        return graph.summary();
    }
    if let Ok(token) = serde_json::from_str::<TokenErrorResponse>(body) {
        return match token.error_description {
            Some(description) => format!("{}: {}", token.error, description),
            None => token.error,
        };
    }
    body.to_string()
}
