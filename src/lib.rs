//! ci-token-retriever - log in to Vault or Nomad from a CI job
//!
//! The crate performs one login request against a configurable URL and
//! extracts the client token from the JSON response.
//!
//! ## Architecture
//!
//! - `interface` module - injected collaborators (inputs, logger, token source)
//! - `retriever` module - config resolution, the HTTP round trip, token extraction
//! - `output` module - masking and publishing the token as a step output
//! - `cli` module - command-line entry point wiring the above together
//! - `test_utils` module - in-memory logger for tests (`testing` feature)
//!
//! Nothing reads process-wide state directly except the `cli` module, which
//! resolves inputs from flags and `INPUT_*` variables and hands them down.

pub mod cli;
pub mod interface;
pub mod output;
pub mod retriever;
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use interface::{InputProvider, Logger, TokenSource};
pub use retriever::{retrieve_token, RetrieverConfig, RetrieverError, TokenInfo, TokenRetriever};

/// Initialize logging for tests
#[cfg(test)]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
