use reqwest::Url;
use thiserror::Error;

use crate::auth::exchange::HttpExchanger;

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_SCOPE: &str = "openid email profile";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found: {1}")]
    Missing(&'static str, std::env::VarError),
    #[error("{0} is not a valid URL: {1}")]
    InvalidUrl(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_id: String,
    /// Where the provider sends the user back; embedded verbatim in the
    /// authorization URL, so it must match the registered redirect URI.
    pub redirect_url: String,
    pub scope: String,
    pub auth_url: Url,
    /// Backend endpoint that trades an authorization code for a login verdict.
    pub exchange_url: Url,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        let client_id = env::var("GOOGLE_CLIENT_ID")
            .map_err(|e| ConfigError::Missing("GOOGLE_CLIENT_ID", e))?;
        let redirect_url =
            env::var("REDIRECT_URL").map_err(|e| ConfigError::Missing("REDIRECT_URL", e))?;
        let exchange_url =
            env::var("EXCHANGE_URL").map_err(|e| ConfigError::Missing("EXCHANGE_URL", e))?;
        let auth_url =
            env::var("GOOGLE_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string());
        let scope = env::var("OAUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string());

        Ok(Self {
            client_id,
            redirect_url,
            scope,
            auth_url: parse_url("GOOGLE_AUTH_URL", &auth_url)?,
            exchange_url: parse_url("EXCHANGE_URL", &exchange_url)?,
        })
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl(name, e.to_string()))
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub exchanger: HttpExchanger,
}
