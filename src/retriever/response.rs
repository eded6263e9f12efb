//! Locating the token inside a login response body.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::retriever::RetrieverError;

/// Vault's login response shape.
pub const DEFAULT_TOKEN_PATH: &str = "auth.client_token";

/// Dotted path to the token field, e.g. `auth.client_token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPath {
    segments: Vec<String>,
}

impl Default for TokenPath {
    fn default() -> Self {
        Self {
            segments: DEFAULT_TOKEN_PATH.split('.').map(str::to_string).collect(),
        }
    }
}

impl FromStr for TokenPath {
    type Err = RetrieverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.split('.').map(|seg| seg.trim().to_string()).collect();
        if segments.iter().any(String::is_empty) {
            return Err(RetrieverError::invalid_input(
                "token_path",
                format!("'{}' contains an empty segment", s),
            ));
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// A retrieved token plus whatever the service said about it.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub token: String,
    /// Sibling `policies` array of the token field, if any.
    pub policies: Option<Vec<String>>,
    /// Sibling `metadata` value of the token field, if any.
    pub metadata: Option<Value>,
}

/// Parses a raw response body. Anything that is not JSON yields `None`.
pub fn parse_body(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

/// Walks `path` through `body` and returns the token when it is a non-empty string.
pub fn extract_token(body: &Value, path: &TokenPath) -> Option<TokenInfo> {
    let (field, parents) = path.segments.split_last()?;

    let mut parent = body.as_object()?;
    for segment in parents {
        parent = parent.get(segment)?.as_object()?;
    }

    let token = parent.get(field)?.as_str()?;
    if token.is_empty() {
        return None;
    }

    Some(TokenInfo {
        token: token.to_string(),
        policies: policies(parent),
        metadata: parent.get("metadata").filter(|m| !m.is_null()).cloned(),
    })
}

fn policies(parent: &Map<String, Value>) -> Option<Vec<String>> {
    let list = parent.get("policies")?.as_array()?;
    Some(
        list.iter()
            .filter_map(|p| p.as_str().map(str::to_string))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_path_is_vault_client_token() {
        assert_eq!(TokenPath::default().to_string(), "auth.client_token");
        assert_eq!(
            "auth.client_token".parse::<TokenPath>().unwrap(),
            TokenPath::default()
        );
    }

    #[test]
    fn path_with_empty_segment_is_rejected() {
        for bad in ["", "auth.", ".client_token", "auth..client_token"] {
            let err = bad.parse::<TokenPath>().unwrap_err();
            assert!(
                matches!(err, RetrieverError::InvalidInput { ref name, .. } if name == "token_path"),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn whitespace_around_segments_is_trimmed() {
        let path: TokenPath = " auth. client_token ".parse().unwrap();
        assert_eq!(path, TokenPath::default());

        let body = json!({"auth": {"client_token": "abc123"}});
        assert_eq!(extract_token(&body, &path).unwrap().token, "abc123");

        assert!(" . ".parse::<TokenPath>().is_err());
    }

    #[test]
    fn extracts_client_token_with_policies_and_metadata() {
        let body = json!({
            "auth": {
                "client_token": "abc123",
                "policies": ["default", "ci"],
                "metadata": {"role": "deploy"}
            }
        });
        let info = extract_token(&body, &TokenPath::default()).unwrap();
        assert_eq!(info.token, "abc123");
        assert_eq!(
            info.policies,
            Some(vec!["default".to_string(), "ci".to_string()])
        );
        assert_eq!(info.metadata, Some(json!({"role": "deploy"})));
    }

    #[test]
    fn missing_or_empty_token_yields_none() {
        let path = TokenPath::default();
        assert!(extract_token(&json!({}), &path).is_none());
        assert!(extract_token(&json!({"auth": null}), &path).is_none());
        assert!(extract_token(&json!({"auth": {}}), &path).is_none());
        assert!(extract_token(&json!({"auth": {"client_token": ""}}), &path).is_none());
        assert!(extract_token(&json!({"auth": {"client_token": 42}}), &path).is_none());
        assert!(extract_token(&json!({"auth": "client_token"}), &path).is_none());
        assert!(extract_token(&json!([1, 2]), &path).is_none());
    }

    #[test]
    fn top_level_path_reads_root_fields() {
        let path: TokenPath = "SecretID".parse().unwrap();
        let body = json!({"SecretID": "nomad-secret", "Policies": ["readonly"]});
        let info = extract_token(&body, &path).unwrap();
        assert_eq!(info.token, "nomad-secret");
        assert_eq!(info.policies, None);
        assert_eq!(info.metadata, None);
    }

    #[test]
    fn non_json_body_does_not_parse() {
        assert!(parse_body("<html>bad gateway</html>").is_none());
        assert!(parse_body("").is_none());
        assert_eq!(parse_body("{}"), Some(json!({})));
    }
}
