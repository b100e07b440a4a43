use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("token response has no string access_token")]
pub struct MissingAccessToken;

/// Token endpoint response, kept exactly as the provider sent it.
///
/// Only `access_token` is checked; every other field is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct TokenResponse {
    fields: Map<String, Value>,
}

impl TokenResponse {
    pub fn access_token(&self) -> &str {
        self.fields
            .get("access_token")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl TryFrom<Map<String, Value>> for TokenResponse {
    type Error = MissingAccessToken;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get("access_token") {
            Some(Value::String(_)) => Ok(Self { fields }),
            _ => Err(MissingAccessToken),
        }
    }
}

impl From<TokenResponse> for Map<String, Value> {
    fn from(token: TokenResponse) -> Self {
        token.fields
    }
}

/// Resource-owner password credentials sent to the token endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordGrant<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'static str,
    pub scope: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"access_token":"abc","expires_in":3600,"token_type":"Bearer","scope":"api1","id_token":"xyz"}"#)]
    #[case(r#"{"access_token":"abc","token_type":null,"expires_in":3600}"#)]
    #[case(r#"{"access_token":"abc","expires_in":3600.0}"#)]
    #[case(r#"{"access_token":"abc","expires_in":"3600","scope":["api1","offline_access"]}"#)]
    fn test_token_response_is_kept_verbatim(#[case] json: &str) {
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token(), "abc");

        let back = serde_json::to_value(&token).unwrap();
        let sent: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, sent);
    }

    #[test]
    fn test_token_response_exposes_fields() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":null}"#).unwrap();
        assert_eq!(token.get("token_type"), Some(&Value::Null));
        assert!(token.get("expires_in").is_none());
    }

    #[rstest]
    #[case(r#"{"token_type":"Bearer"}"#)]
    #[case(r#"{"access_token":null}"#)]
    #[case(r#"{"access_token":42}"#)]
    #[case(r#"["abc"]"#)]
    fn test_token_response_requires_string_access_token(#[case] json: &str) {
        assert!(serde_json::from_str::<TokenResponse>(json).is_err());
    }

    #[test]
    fn test_password_grant_field_names() {
        let grant = PasswordGrant {
            client_id: "ro.client",
            client_secret: "secret",
            grant_type: "password",
            scope: "api1",
            username: "alice",
            password: "hunter2",
        };
        let value = serde_json::to_value(&grant).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["client_id", "client_secret", "grant_type", "scope", "username", "password"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }
}
