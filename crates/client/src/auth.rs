//! Authentication strategies and access token management.
//!
//! Responsibilities:
//! - Define the client-side authentication strategies.
//! - Hold the current bearer token and its expiry.
//! - Decide when a token must be (re)acquired.
//!
//! Does NOT handle:
//! - The OAuth2 token request itself (see `endpoints::token`).
//!
//! Invariants:
//! - Token values are stored as `SecretString` and never appear in `Debug` output.
//! - A static access token never expires from the manager's point of view.

use license_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;
use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

/// Strategy for authenticating with Microsoft Graph.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// OAuth2 client-credentials grant for an app registration.
    /// The client acquires and refreshes tokens itself.
    ClientCredentials {
        tenant_id: String,
        client_id: String,
        client_secret: SecretString,
    },
    /// Pre-acquired bearer token, used as-is.
    AccessToken { token: SecretString },
}

/// Manages the Graph bearer token with proactive renewal.
#[derive(Debug)]
pub struct TokenManager {
    auth_strategy: AuthStrategy,
    access_token: Option<AcquiredToken>,
    expiry_buffer_seconds: u64,
}

/// Token acquired from the authority, with expiry information.
#[derive(Debug, Clone)]
struct AcquiredToken {
    value: SecretString,
    expires_at: Option<Instant>,
}

impl AcquiredToken {
    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()).is_zero())
            .unwrap_or(false)
    }

    fn will_expire_within(&self, buffer: Duration) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()) < buffer)
            .unwrap_or(false)
    }
}

impl TokenManager {
    /// Create a new token manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            access_token: None,
            expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
        }
    }

    /// Set how long before expiry a token is considered stale.
    pub fn with_expiry_buffer(mut self, seconds: u64) -> Self {
        self.expiry_buffer_seconds = seconds;
        self
    }

    /// Get the current auth strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Whether the client uses a static token (no acquisition or refresh).
    pub fn is_static_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::AccessToken { .. })
    }

    /// Get the bearer token for API requests, if one is held.
    pub fn get_bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::AccessToken { token } => Some(token.expose_secret()),
            AuthStrategy::ClientCredentials { .. } => self
                .access_token
                .as_ref()
                .map(|t| t.value.expose_secret()),
        }
    }

    /// Store a token received from the authority.
    ///
    /// `expires_in_seconds` of `None` means the authority gave no lifetime.
    pub fn set_access_token(&mut self, token: String, expires_in_seconds: Option<u64>) {
        self.access_token = Some(AcquiredToken {
            value: SecretString::new(token.into()),
            expires_at: expires_in_seconds.map(|s| Instant::now() + Duration::from_secs(s)),
        });
    }

    /// Whether a token must be acquired before the next request.
    ///
    /// True when no token is held, it has expired, or it expires within the buffer.
    /// Always false for a static token.
    pub fn needs_token(&self) -> bool {
        if self.is_static_token() {
            return false;
        }
        let buffer = Duration::from_secs(self.expiry_buffer_seconds);
        self.access_token
            .as_ref()
            .map(|t| t.is_expired() || t.will_expire_within(buffer))
            .unwrap_or(true)
    }

    /// Drop the held token (force re-acquisition).
    pub fn clear_token(&mut self) {
        self.access_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_credentials() -> AuthStrategy {
        AuthStrategy::ClientCredentials {
            tenant_id: "contoso".to_string(),
            client_id: "app".to_string(),
            client_secret: SecretString::new("app-secret".to_string().into()),
        }
    }

    #[test]
    fn test_static_token_bypasses_acquisition() {
        let manager = TokenManager::new(AuthStrategy::AccessToken {
            token: SecretString::new("test-token".to_string().into()),
        });
        assert!(manager.is_static_token());
        assert_eq!(manager.get_bearer_token(), Some("test-token"));
        assert!(!manager.needs_token());
    }

    #[test]
    fn test_client_credentials_needs_token_until_set() {
        let mut manager = TokenManager::new(client_credentials());
        assert!(!manager.is_static_token());
        assert!(manager.get_bearer_token().is_none());
        assert!(manager.needs_token());

        manager.set_access_token("acquired".to_string(), Some(3600));
        assert_eq!(manager.get_bearer_token(), Some("acquired"));
        assert!(!manager.needs_token());

        manager.clear_token();
        assert!(manager.needs_token());
    }

    #[test]
    fn test_token_inside_buffer_needs_refresh() {
        let mut manager = TokenManager::new(client_credentials()).with_expiry_buffer(300);
        manager.set_access_token("short-lived".to_string(), Some(60));
        assert!(manager.needs_token());
    }

    #[test]
    fn test_token_without_lifetime_never_expires() {
        let mut manager = TokenManager::new(client_credentials());
        manager.set_access_token("forever".to_string(), None);
        assert!(!manager.needs_token());
    }

    #[test]
    fn test_secrets_not_exposed_in_debug() {
        let mut manager = TokenManager::new(client_credentials());
        manager.set_access_token("acquired-token-value".to_string(), Some(3600));

        let debug_output = format!("{:?}", manager);
        assert!(!debug_output.contains("app-secret"));
        assert!(!debug_output.contains("acquired-token-value"));
        assert!(debug_output.contains("ClientCredentials"));
    }
}
