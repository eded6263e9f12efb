use clap::Parser;
use ci_token_retriever::cli::{run_cli, Cli};
use ci_token_retriever::interface::escape_data;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run_cli(cli).await {
        error!("Token retrieval failed: {:#}", err);
        println!("::error::{}", escape_data(&format!("{:#}", err)));
        std::process::exit(1);
    }
}
