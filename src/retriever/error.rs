use std::io;

#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    /// The HTTP call itself failed. Display and source are the client's own.
    #[error(transparent)]
    Network(reqwest::Error),

    #[error("Unable to retrieve token from {service} at url {url}.")]
    TokenNotFound { service: String, url: String },

    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    #[error("Invalid input '{name}': {reason}")]
    InvalidInput { name: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Failed to publish output: {0}")]
    Output(#[from] io::Error),
}

impl RetrieverError {
    pub(crate) fn invalid_input(name: &str, reason: impl Into<String>) -> Self {
        RetrieverError::InvalidInput {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the underlying network error, if this is one.
    pub fn as_network(&self) -> Option<&reqwest::Error> {
        match self {
            RetrieverError::Network(err) => Some(err),
            _ => None,
        }
    }
}
