//! OAuth2 token endpoint models.

use serde::Deserialize;

/// Successful client-credentials token response.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Error body returned by the authority, e.g. `invalid_client`.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_debug_redacts_token() {
        let json = r#"{"token_type": "Bearer", "expires_in": 3599, "access_token": "eyJ0eXAi.secret"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.expires_in, Some(3599));

        let debug_output = format!("{:?}", token);
        assert!(!debug_output.contains("eyJ0eXAi.secret"));
    }

    #[test]
    fn test_token_error_response() {
        let json = r#"{"error": "invalid_client", "error_description": "AADSTS7000215: Invalid client secret provided."}"#;
        let err: TokenErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error, "invalid_client");
        assert!(err.error_description.unwrap().contains("AADSTS7000215"));
    }
}
