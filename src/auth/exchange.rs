use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::models::oauth::{ExchangeRequest, ExchangeResponse};

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("exchange request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("exchange endpoint returned HTTP {0}")]
    Status(StatusCode),
    #[error("malformed exchange response: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// Trades an authorization code for the backend's login verdict.
#[async_trait]
pub trait CodeExchanger {
    async fn exchange(&self, code: &str) -> Result<ExchangeResponse, ExchangeError>;
}

/// `CodeExchanger` that POSTs `{"code": ...}` as JSON to the backend
/// exchange endpoint. Any non-2xx status or unparseable body is a failure.
#[derive(Debug, Clone)]
pub struct HttpExchanger {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpExchanger {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl CodeExchanger for HttpExchanger {
    async fn exchange(&self, code: &str) -> Result<ExchangeResponse, ExchangeError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ExchangeRequest { code })
            .send()
            .await
            .map_err(ExchangeError::Transport)?;

        if !response.status().is_success() {
            return Err(ExchangeError::Status(response.status()));
        }

        response
            .json::<ExchangeResponse>()
            .await
            .map_err(ExchangeError::Malformed)
    }
}
