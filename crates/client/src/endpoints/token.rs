//! OAuth2 client-credentials token acquisition.

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::endpoints::encode_path_segment;
use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::TokenResponse;
use license_config::constants::GRAPH_DEFAULT_SCOPE;

/// `.default` scope for the Graph root the client talks to.
///
/// Sovereign clouds use their own resource host, so the scope follows the
/// origin of `base_url` rather than being fixed to the public cloud.
pub fn default_scope_for(base_url: &str) -> String {
    match Url::parse(base_url) {
        Ok(url) if url.host_str().is_some() => {
            format!("{}/.default", url.origin().ascii_serialization())
        }
        _ => GRAPH_DEFAULT_SCOPE.to_string(),
    }
}

/// Request an access token with the client-credentials grant.
///
/// Returns the token response; a rejected credential maps to `AuthFailed`.
#[allow(clippy::too_many_arguments)]
pub async fn acquire_token(
    client: &Client,
    authority_url: &str,
    tenant_id: &str,
    client_id: &str,
    client_secret: &SecretString,
    scope: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<TokenResponse> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        authority_url,
        encode_path_segment(tenant_id)
    );

    debug!(tenant_id, client_id, scope, "Requesting access token");

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret.expose_secret()),
        ("scope", scope),
    ];

    let builder = client.post(&url).form(&form);
    let response = send_request_with_retry(
        builder,
        max_retries,
        "/oauth2/v2.0/token",
        "POST",
        metrics,
    )
    .await
    .map_err(|e| match e {
        ClientError::ApiError {
            status: 400 | 401,
            message,
            ..
        } => ClientError::AuthFailed(message),
        other => other,
    })?;

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse token response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope_public_cloud() {
        assert_eq!(
            default_scope_for("https://graph.microsoft.com/v1.0"),
            "https://graph.microsoft.com/.default"
        );
    }

    #[test]
    fn test_default_scope_sovereign_cloud() {
        assert_eq!(
            default_scope_for("https://graph.microsoft.us/v1.0"),
            "https://graph.microsoft.us/.default"
        );
    }

    #[test]
    fn test_default_scope_keeps_port() {
        assert_eq!(
            default_scope_for("http://127.0.0.1:8080/v1.0"),
            "http://127.0.0.1:8080/.default"
        );
    }

    #[test]
    fn test_default_scope_falls_back_for_garbage() {
        assert_eq!(default_scope_for("not a url"), GRAPH_DEFAULT_SCOPE);
    }
}
