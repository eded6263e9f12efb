//! Token retrieval against a Vault or Nomad login endpoint.
//!
//! The flow is strictly linear: resolve inputs, POST the payload, parse the
//! body, look up the token field. There are no retries.
//!
//! ## Testing strategy:
//! - Pure parts (config resolution, token extraction) are unit tested in place
//! - The HTTP round trip is covered in `tests/` against a `wiremock` server

pub mod client;
pub mod config;
pub mod error;
pub mod response;

use std::sync::Arc;

pub use client::TokenRetriever;
pub use config::{RetrieverConfig, ServiceKind};
pub use error::RetrieverError;
pub use response::{extract_token, TokenInfo, TokenPath};

use crate::interface::{InputProvider, Logger};

/// Resolves the config from `inputs`, performs the login, and returns the token.
pub async fn retrieve_token(
    inputs: &dyn InputProvider,
    logger: Arc<dyn Logger>,
) -> Result<String, RetrieverError> {
    let config = RetrieverConfig::from_inputs(inputs)?;
    let retriever = TokenRetriever::new(config, logger)?;
    Ok(retriever.retrieve().await?.token)
}
