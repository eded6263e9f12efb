//! Collaborators injected into the retriever instead of being read as globals.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::retriever::{RetrieverError, TokenInfo};

/// Source of named string inputs, in the spirit of `core.getInput`.
pub trait InputProvider {
    /// Returns the raw value for `name`, or `None` when it was not supplied.
    fn get_input(&self, name: &str) -> Option<String>;
}

impl InputProvider for HashMap<String, String> {
    fn get_input(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Looks up `name` with Actions semantics: surrounding whitespace is trimmed
/// and a blank value counts as not supplied.
pub fn read_input(inputs: &dyn InputProvider, name: &str) -> Option<String> {
    inputs
        .get_input(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`read_input`] but fails when the input is absent.
pub fn require_input(inputs: &dyn InputProvider, name: &str) -> Result<String, RetrieverError> {
    read_input(inputs, name).ok_or_else(|| RetrieverError::MissingInput(name.to_string()))
}

/// Sink for the retriever's diagnostic lines.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Writes GitHub workflow-command lines: info as plain text, debug as `::debug::`.
/// Debug lines are only shown by the runner when step debugging is enabled.
pub struct ActionsLogger<W: Write + Send> {
    out: Mutex<W>,
}

impl ActionsLogger<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ActionsLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            // A broken log stream must not fail the run.
            let _ = writeln!(out, "{}", line);
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Logger for ActionsLogger<W> {
    fn info(&self, message: &str) {
        self.write_line(message);
    }

    fn debug(&self, message: &str) {
        self.write_line(&format!("::debug::{}", escape_data(message)));
    }
}

/// Escapes a workflow-command payload the way `@actions/core` does.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Anything that can produce a login token. The CLI only depends on this.
#[async_trait]
pub trait TokenSource {
    async fn retrieve(&self) -> Result<TokenInfo, RetrieverError>;
}
