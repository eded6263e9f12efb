//! Run configuration resolved from named inputs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::interface::{read_input, require_input, InputProvider};
use crate::retriever::{RetrieverError, TokenPath};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which service the URL points at. Only used to label logs and errors;
/// the response shape is governed by [`TokenPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceKind {
    Vault,
    #[default]
    Nomad,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Vault => write!(f, "Vault"),
            ServiceKind::Nomad => write!(f, "Nomad"),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = RetrieverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vault" => Ok(ServiceKind::Vault),
            "nomad" => Ok(ServiceKind::Nomad),
            other => Err(RetrieverError::invalid_input(
                "service",
                format!("unknown service '{}', expected 'vault' or 'nomad'", other),
            )),
        }
    }
}

/// Everything a single retrieval needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieverConfig {
    pub url: Url,
    /// The URL as supplied, before parsing normalised it. Used in messages.
    pub raw_url: String,
    pub service: ServiceKind,
    pub token_path: TokenPath,
    pub timeout: Duration,
    /// Send the historical form-urlencoded content type with the JSON body.
    pub legacy_content_type: bool,
}

impl RetrieverConfig {
    pub fn new(url: Url) -> Self {
        Self {
            raw_url: url.to_string(),
            url,
            service: ServiceKind::default(),
            token_path: TokenPath::default(),
            timeout: DEFAULT_TIMEOUT,
            legacy_content_type: false,
        }
    }

    pub fn with_service(mut self, service: ServiceKind) -> Self {
        self.service = service;
        self
    }

    pub fn with_token_path(mut self, token_path: TokenPath) -> Self {
        self.token_path = token_path;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_legacy_content_type(mut self, legacy: bool) -> Self {
        self.legacy_content_type = legacy;
        self
    }

    /// Resolves the config from `url`, `service`, `token_path`, `timeout`
    /// and `legacy_content_type`. Only `url` is required.
    pub fn from_inputs(inputs: &dyn InputProvider) -> Result<Self, RetrieverError> {
        let raw_url = require_input(inputs, "url")?;
        let url = Url::parse(&raw_url)
            .map_err(|e| RetrieverError::invalid_input("url", format!("'{}': {}", raw_url, e)))?;

        let mut config = RetrieverConfig::new(url);
        config.raw_url = raw_url;

        if let Some(service) = read_input(inputs, "service") {
            config.service = service.parse()?;
        }
        if let Some(path) = read_input(inputs, "token_path") {
            config.token_path = path.parse()?;
        }
        if let Some(timeout) = read_input(inputs, "timeout") {
            config.timeout = parse_timeout(&timeout)?;
        }
        if let Some(legacy) = read_input(inputs, "legacy_content_type") {
            config.legacy_content_type = parse_bool("legacy_content_type", &legacy)?;
        }

        Ok(config)
    }
}

fn parse_timeout(value: &str) -> Result<Duration, RetrieverError> {
    match value.parse::<u64>() {
        Ok(0) => Err(RetrieverError::invalid_input(
            "timeout",
            "must be greater than zero",
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(RetrieverError::invalid_input(
            "timeout",
            format!("'{}' is not a number of seconds: {}", value, e),
        )),
    }
}

/// YAML 1.2 core schema booleans, as accepted by `core.getBooleanInput`.
pub(crate) fn parse_bool(name: &str, value: &str) -> Result<bool, RetrieverError> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(RetrieverError::invalid_input(
            name,
            format!(
                "'{}' is not a YAML 1.2 core schema boolean, use true or false",
                other
            ),
        )),
    }
}
