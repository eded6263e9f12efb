//! Shared fixtures for retriever integration tests.
//!
//! Each test gets its own `wiremock` server standing in for the login
//! endpoint, so tests can run in parallel.

use std::sync::Arc;

use ci_token_retriever::test_utils::MemoryLogger;
use ci_token_retriever::{RetrieverConfig, TokenRetriever};
use reqwest::Url;
use wiremock::MockServer;

pub const LOGIN_PATH: &str = "/login";

pub struct LoginFixture {
    pub server: MockServer,
    pub logger: Arc<MemoryLogger>,
}

impl LoginFixture {
    pub async fn new() -> Self {
        LoginFixture {
            server: MockServer::start().await,
            logger: Arc::new(MemoryLogger::new()),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.server.uri(), LOGIN_PATH)
    }

    pub fn config(&self) -> RetrieverConfig {
        RetrieverConfig::new(Url::parse(&self.login_url()).unwrap())
    }

    pub fn retriever(&self, config: RetrieverConfig) -> TokenRetriever {
        TokenRetriever::new(config, self.logger.clone()).unwrap()
    }
}
