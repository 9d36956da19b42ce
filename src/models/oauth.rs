use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query parameters on the OAuth return URL. Every field may be absent; a
/// plain page load with no query string yields all `None`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Body sent to the backend exchange endpoint. The authorization code is
/// the only payload field.
#[derive(Debug, Serialize)]
pub struct ExchangeRequest<'a> {
    pub code: &'a str,
}

/// Verdict returned by the backend exchange endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Cached user profile: the display name plus whatever else the backend
/// chose to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_response_keeps_extra_profile_fields() {
        let json = r#"{"success": true, "user": {"name": "Ada", "email": "ada@example.com"}}"#;
        let response: ExchangeResponse = serde_json::from_str(json).unwrap();

        assert!(response.success);
        let user = response.user.unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(
            user.extra.get("email").and_then(Value::as_str),
            Some("ada@example.com")
        );
    }

    #[test]
    fn exchange_response_missing_fields_defaults_to_failure() {
        let response: ExchangeResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert!(response.user.is_none());
    }

    #[test]
    fn user_without_name_is_rejected() {
        let json = r#"{"success": true, "user": {"email": "ada@example.com"}}"#;
        assert!(serde_json::from_str::<ExchangeResponse>(json).is_err());
    }
}
