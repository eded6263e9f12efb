use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::interface::{read_input, ActionsLogger, InputProvider, Logger, TokenSource, TracingLogger};
use crate::output::{ActionOutput, DEFAULT_OUTPUT_NAME};
use crate::retriever::{RetrieverConfig, RetrieverError, TokenRetriever};

/// Every flag falls back to the `INPUT_*` variable the Actions runner sets
/// for the matching `with:` key.
#[derive(Parser, Debug, Default)]
#[command(
    name = "ci-token-retriever",
    about = "Log in to Vault or Nomad and publish the client token as a step output",
    version
)]
pub struct Cli {
    /// Login endpoint to POST to.
    #[arg(long, env = "INPUT_URL")]
    pub url: Option<String>,

    /// Target service: vault or nomad.
    #[arg(long, env = "INPUT_SERVICE")]
    pub service: Option<String>,

    /// Dotted path of the token in the response body.
    #[arg(long, env = "INPUT_TOKEN_PATH")]
    pub token_path: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "INPUT_TIMEOUT")]
    pub timeout: Option<String>,

    /// Send `application/x-www-form-urlencoded` instead of `application/json`.
    #[arg(long, env = "INPUT_LEGACY_CONTENT_TYPE")]
    pub legacy_content_type: Option<String>,

    /// Name of the step output that receives the token.
    #[arg(long, env = "INPUT_OUTPUT_NAME")]
    pub output_name: Option<String>,

    #[arg(long, env = "GITHUB_ACTIONS", hide = true)]
    pub github_actions: Option<String>,
}

impl InputProvider for Cli {
    fn get_input(&self, name: &str) -> Option<String> {
        match name {
            "url" => self.url.clone(),
            "service" => self.service.clone(),
            "token_path" => self.token_path.clone(),
            "timeout" => self.timeout.clone(),
            "legacy_content_type" => self.legacy_content_type.clone(),
            "output_name" => self.output_name.clone(),
            _ => None,
        }
    }
}

impl Cli {
    fn running_in_actions(&self) -> bool {
        self.github_actions.as_deref() == Some("true")
    }

    fn logger(&self) -> Arc<dyn Logger> {
        if self.running_in_actions() {
            Arc::new(ActionsLogger::stdout())
        } else {
            Arc::new(TracingLogger)
        }
    }
}

/// Retrieves a token from `source`, masks it, then sets it as output `output_name`.
/// The mask line goes to `stdout` before anything else can echo the token.
pub async fn publish(
    source: &dyn TokenSource,
    output: &ActionOutput,
    output_name: &str,
    stdout: &mut dyn Write,
) -> Result<(), RetrieverError> {
    let info = source.retrieve().await?;
    writeln!(stdout, "{}", output.mask(&info.token))?;
    output.set_output(output_name, &info.token)?;
    Ok(())
}

pub async fn run_cli(cli: Cli) -> Result<()> {
    let config = RetrieverConfig::from_inputs(&cli)?;
    let output_name =
        read_input(&cli, "output_name").unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string());

    let retriever = TokenRetriever::new(config, cli.logger())?;
    let output = ActionOutput::from_env();

    publish(&retriever, &output, &output_name, &mut io::stdout()).await?;
    info!("Token published as output '{}'", output_name);
    Ok(())
}
