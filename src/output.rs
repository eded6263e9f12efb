//! Publishing the token to later workflow steps.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::warn;
use uuid::Uuid;

use crate::interface::escape_data;
use crate::retriever::RetrieverError;

pub const DEFAULT_OUTPUT_NAME: &str = "token";

/// Step outputs, written to the file named by `GITHUB_OUTPUT`.
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    output_file: Option<PathBuf>,
}

impl ActionOutput {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    pub fn from_env() -> Self {
        Self::new(
            env::var_os("GITHUB_OUTPUT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        )
    }

    /// Workflow command asking the runner to redact `value` from the log.
    pub fn mask(&self, value: &str) -> String {
        format!("::add-mask::{}", escape_data(value))
    }

    /// Appends `name` using the heredoc form, which is safe for any value
    /// that does not contain the random delimiter.
    pub fn set_output(&self, name: &str, value: &str) -> Result<(), RetrieverError> {
        let Some(path) = &self.output_file else {
            warn!("GITHUB_OUTPUT is not set; output '{}' was not published", name);
            return Ok(());
        };

        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        if name.contains(&delimiter) || value.contains(&delimiter) {
            return Err(RetrieverError::Output(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output '{}' contains the delimiter", name),
            )));
        }

        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn mask_escapes_newlines() {
        let out = ActionOutput::default();
        assert_eq!(out.mask("abc"), "::add-mask::abc");
        assert_eq!(out.mask("a\nb"), "::add-mask::a%0Ab");
    }

    #[test]
    fn set_output_appends_heredoc_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        fs::write(&path, "existing=1\n").unwrap();

        let out = ActionOutput::new(Some(path.clone()));
        out.set_output("token", "tok-1").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "existing=1");
        let delimiter = lines[1].strip_prefix("token<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(lines[2], "tok-1");
        assert_eq!(lines[3], delimiter);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn set_output_without_file_is_a_no_op() {
        crate::init_logging();
        let out = ActionOutput::new(None);
        assert!(out.set_output("token", "tok-1").is_ok());
    }

    #[test]
    fn set_output_reports_unwritable_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = ActionOutput::new(Some(dir.path().join("missing").join("output")));
        let err = out.set_output("token", "tok-1").unwrap_err();
        assert!(matches!(err, RetrieverError::Output(_)));
    }

    #[test]
    #[serial_test::serial]
    fn from_env_reads_github_output() {
        env::set_var("GITHUB_OUTPUT", "/tmp/gh-output");
        assert_eq!(
            ActionOutput::from_env().output_file,
            Some(PathBuf::from("/tmp/gh-output"))
        );
        env::set_var("GITHUB_OUTPUT", "");
        assert_eq!(ActionOutput::from_env().output_file, None);
        env::remove_var("GITHUB_OUTPUT");
        assert_eq!(ActionOutput::from_env().output_file, None);
    }
}
