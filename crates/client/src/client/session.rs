//! Client-level token helpers.
//!
//! Methods on [`GraphClient`] that drive the [`TokenManager`]: returning the
//! current bearer token and acquiring a new one when needed.
//!
//! # What this module does NOT handle:
//! - Token storage and expiry tracking (handled by [`TokenManager`] in `auth.rs`)
//! - The HTTP token request itself (handled by `endpoints::acquire_token`)
//!
//! # Invariants
//! - [`GraphClient::get_auth_token`] requires `&mut self` because it may acquire a token
//! - Static access tokens are returned as-is and never refreshed
//! - Client-credential tokens are refreshed proactively inside the expiry buffer

use crate::auth::AuthStrategy;
use crate::client::GraphClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl GraphClient {
    /// Get the current bearer token, acquiring one if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the authority rejects the credentials.
    /// Returns [`ClientError::TokenExpired`] if no usable token is available.
    pub(crate) async fn get_auth_token(&mut self) -> Result<String> {
        if self.token_manager.is_static_token()
            && let Some(token) = self.token_manager.get_bearer_token()
        {
            return Ok(token.to_string());
        }

        if self.token_manager.needs_token() {
            self.acquire_token().await?;
        }

        self.token_manager
            .get_bearer_token()
            .map(|s| s.to_string())
            .ok_or(ClientError::TokenExpired)
    }

    /// Whether the client uses a pre-acquired static token.
    pub fn is_static_token_auth(&self) -> bool {
        self.token_manager.is_static_token()
    }

    /// Request a new token with the client-credentials grant and store it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] for static-token auth or rejected credentials.
    pub async fn acquire_token(&mut self) -> Result<()> {
        let AuthStrategy::ClientCredentials {
            tenant_id,
            client_id,
            client_secret,
        } = self.token_manager.strategy()
        else {
            return Err(ClientError::AuthFailed(
                "Cannot acquire a token with a static access token".to_string(),
            ));
        };

        let response = endpoints::acquire_token(
            &self.http,
            &self.authority_url,
            tenant_id,
            client_id,
            client_secret,
            &self.scope,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await?;

        tracing::debug!(expires_in = ?response.expires_in, "Acquired access token");
        self.token_manager
            .set_access_token(response.access_token, response.expires_in);
        Ok(())
    }
}
