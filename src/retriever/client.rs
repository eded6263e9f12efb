//! HTTP side of the retriever: one POST, one parse, one lookup.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::interface::{Logger, TokenSource};
use crate::retriever::response::{extract_token, parse_body};
use crate::retriever::{RetrieverConfig, RetrieverError, TokenInfo};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const LEGACY_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Performs a single login round trip against the configured URL.
pub struct TokenRetriever {
    config: RetrieverConfig,
    payload: Map<String, Value>,
    client: Client,
    logger: Arc<dyn Logger>,
}

impl TokenRetriever {
    pub fn new(config: RetrieverConfig, logger: Arc<dyn Logger>) -> Result<Self, RetrieverError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RetrieverError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            payload: Map::new(),
            client,
            logger,
        })
    }

    /// Replaces the (by default empty) JSON object sent as the request body.
    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    fn content_type(&self) -> &'static str {
        if self.config.legacy_content_type {
            LEGACY_CONTENT_TYPE
        } else {
            JSON_CONTENT_TYPE
        }
    }

    /// Posts the payload and pulls the token out of the response.
    ///
    /// Transport failures come back as [`RetrieverError::Network`] carrying
    /// the client's error untouched. Any response without a usable token,
    /// including non-2xx and non-JSON ones, is [`RetrieverError::TokenNotFound`].
    pub async fn retrieve(&self) -> Result<TokenInfo, RetrieverError> {
        let service = self.config.service;
        let url = &self.config.url;
        let raw_url = &self.config.raw_url;

        self.logger
            .info(&format!("Starting {} token retrieval", service));

        let body = Value::Object(self.payload.clone()).to_string();

        self.logger
            .debug(&format!("Retrieving {} token from {}", service, raw_url));

        let response = match self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, self.content_type())
            .body(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                self.logger
                    .debug(&format!("Error making POST to {}: {}", service, err));
                return Err(RetrieverError::Network(err));
            }
        };

        let status = response.status();
        self.logger.info(&format!(
            "Received response from {} (HTTP {})",
            service,
            status.as_u16()
        ));

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                self.logger
                    .debug(&format!("Error reading {} response body: {}", service, err));
                return Err(RetrieverError::Network(err));
            }
        };

        if !status.is_success() {
            self.logger
                .debug(&format!("{} returned HTTP {}: {}", service, status, text));
        }

        let info = match parse_body(&text) {
            Some(json) => extract_token(&json, &self.config.token_path),
            None => {
                self.logger
                    .debug(&format!("{} response body is not valid JSON", service));
                None
            }
        };

        match info {
            Some(info) => {
                self.logger
                    .debug(&format!("{} token successfully retrieved", service));
                if let Some(policies) = &info.policies {
                    self.logger
                        .debug(&format!("Operating under policies: {:?}", policies));
                }
                if let Some(metadata) = &info.metadata {
                    self.logger.debug(&format!("Token metadata: {}", metadata));
                }
                Ok(info)
            }
            None => Err(RetrieverError::TokenNotFound {
                service: service.to_string(),
                url: raw_url.clone(),
            }),
        }
    }
}

#[async_trait]
impl TokenSource for TokenRetriever {
    async fn retrieve(&self) -> Result<TokenInfo, RetrieverError> {
        TokenRetriever::retrieve(self).await
    }
}
