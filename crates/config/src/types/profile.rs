//! Profile configuration types.
//!
//! Responsibilities:
//! - Define `ProfileConfig` for storing named tenant connection profiles.
//! - Support partial configuration (all fields optional) so env vars and CLI flags can fill gaps.
//!
//! Does NOT handle:
//! - Profile loading or merging (see `loader` module).
//!
//! Invariants:
//! - All fields are optional to allow partial profile definitions.
//! - ProfileConfig uses `#[serde(default)]` for backward compatibility.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

mod opt_secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret
            .as_ref()
            .map(|s| s.expose_secret().to_string())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|s| SecretString::new(s.into())))
    }
}

/// Named tenant profile stored in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Graph API root
    pub base_url: Option<String>,
    /// Token authority root
    pub authority_url: Option<String>,
    /// Directory (tenant) id or primary domain
    pub tenant_id: Option<String>,
    /// App registration (client) id
    pub client_id: Option<String>,
    /// App registration client secret
    #[serde(with = "opt_secret_string", skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<SecretString>,
    /// Pre-acquired bearer token
    #[serde(with = "opt_secret_string", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<SecretString>,
    /// Whether to skip TLS verification
    pub skip_verify: Option<bool>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Maximum number of retries for throttled requests
    pub max_retries: Option<usize>,
    /// Seconds before token expiry at which a fresh token is requested
    pub token_expiry_buffer_seconds: Option<u64>,
    /// `$top` for paged collections
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_partial_profile_deserializes() {
        let json = r#"{ "tenant_id": "contoso", "client_id": "app-id" }"#;
        let profile: ProfileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(profile.tenant_id.as_deref(), Some("contoso"));
        assert_eq!(profile.client_id.as_deref(), Some("app-id"));
        assert!(profile.client_secret.is_none());
        assert!(profile.base_url.is_none());
    }

    #[test]
    fn test_profile_secret_round_trip() {
        let original = ProfileConfig {
            tenant_id: Some("contoso".to_string()),
            client_secret: Some(SecretString::new("s3cr3t".to_string().into())),
            ..Default::default()
        };

        let json = serde_json::to_string(&original).unwrap();
        let back: ProfileConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.client_secret.as_ref().map(|s| s.expose_secret().to_string()),
            Some("s3cr3t".to_string())
        );
        assert!(back.access_token.is_none());
    }
}
