//! Authentication types for Graph connection configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (client credentials, pre-acquired token).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - The OAuth2 token exchange itself (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes secrets for config file round-trips; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
pub(crate) mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Strategy for authenticating against Microsoft Graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// OAuth2 client-credentials grant for an app registration.
    /// The client acquires and refreshes access tokens itself.
    #[serde(rename = "client_credentials")]
    ClientCredentials {
        tenant_id: String,
        client_id: String,
        #[serde(with = "secret_string")]
        client_secret: SecretString,
    },
    /// A bearer token acquired out of band (e.g. `az account get-access-token`).
    /// It is used as-is and never refreshed.
    #[serde(rename = "access_token")]
    AccessToken {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

impl AuthStrategy {
    /// Tenant the strategy authenticates against, when known.
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            AuthStrategy::ClientCredentials { tenant_id, .. } => Some(tenant_id),
            AuthStrategy::AccessToken { .. } => None,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    #[serde(flatten)]
    pub strategy: AuthStrategy,
}
