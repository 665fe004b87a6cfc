use anyhow::Context;
use clap::{Parser, Subcommand};
use fitcoach::{dispatch, BackendConfig, Endpoint, HttpBackend, Orchestrator};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitcoach", version, about = "Fitness coaching flows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    /// TOML file with a [backend] table; FITCOACH_* variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one endpoint on a JSON payload and print the JSON response.
    Run {
        endpoint: String,
        /// Read the payload from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// List the available endpoints.
    Endpoints,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_payload(input: Option<&PathBuf>) -> anyhow::Result<Value> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read payload from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&text).context("payload is not valid JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Endpoints => {
            for endpoint in Endpoint::ALL {
                println!("{}", endpoint);
            }
        }
        Commands::Run { endpoint, input } => {
            let endpoint: Endpoint = endpoint.parse()?;
            let payload = read_payload(input.as_ref())?;

            let config = BackendConfig::load(cli.config.as_deref())?;
            if !config.has_credential() {
                warn!("No backend credential configured; answering from fallback rules");
            }
            info!(provider = %config.provider, model = config.model(), "Backend configured");

            let orchestrator = Orchestrator::new(HttpBackend::new(config)?);
            let response = dispatch(&orchestrator, endpoint, &payload).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
