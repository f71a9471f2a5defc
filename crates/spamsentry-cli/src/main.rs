mod display;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use spamsentry_ai::artifact::{DEFAULT_CLASSIFIER_FILE, DEFAULT_VECTORIZER_FILE};
use spamsentry_ai::{ArtifactPaths, InferenceService};
use spamsentry_core::Message;
use spamsentry_web::{ApiClient, AppState, ClassifyResponse, PageOptions, ServerConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "spamsentry_cli=info,spamsentry_ai=info,spamsentry_web=info,tower_http=info";

/// Exit status when the message is blank.
const EXIT_NO_INPUT: u8 = 2;

#[derive(Parser)]
#[command(name = "spamsentry", version, about = "Classify messages as spam or ham")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ArtifactArgs {
    /// Fitted vectorizer artifact (JSON)
    #[arg(long, env = "SPAMSENTRY_VECTORIZER", default_value = DEFAULT_VECTORIZER_FILE)]
    vectorizer: PathBuf,

    /// Trained classifier artifact (JSON)
    #[arg(long, env = "SPAMSENTRY_MODEL", default_value = DEFAULT_CLASSIFIER_FILE)]
    model: PathBuf,
}

impl ArtifactArgs {
    fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.vectorizer, &self.model)
    }

    fn load(&self) -> anyhow::Result<InferenceService> {
        InferenceService::load(&self.paths()).with_context(|| {
            format!(
                "loading artifacts {} and {}",
                self.vectorizer.display(),
                self.model.display()
            )
        })
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the classification page and JSON API
    Serve {
        #[command(flatten)]
        artifacts: ArtifactArgs,

        #[arg(long, env = "SPAMSENTRY_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(long, env = "SPAMSENTRY_PORT", default_value_t = 8501)]
        port: u16,

        /// Cosmetic pause before the page shows a result
        #[arg(long, env = "SPAMSENTRY_ANALYZE_DELAY_MS", default_value_t = 0)]
        analyze_delay_ms: u64,
    },
    /// Classify one message locally
    Classify {
        message: String,

        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify one message with a running server
    Check {
        message: String,

        #[arg(long, env = "SPAMSENTRY_SERVER", default_value = "http://127.0.0.1:8501")]
        server: String,
    },
    /// Show what the artifacts contain
    Inspect {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            artifacts,
            host,
            port,
            analyze_delay_ms,
        } => {
            tracing::info!("spamsentry v{}", env!("CARGO_PKG_VERSION"));
            let service = match artifacts.load() {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %format!("{e:#}"), "cannot start: artifacts failed to load");
                    return Err(e);
                }
            };
            let options = PageOptions {
                analyze_delay: Duration::from_millis(analyze_delay_ms),
            };
            let state = AppState::new(Arc::new(service), options);
            let config = ServerConfig { host, port };
            spamsentry_web::serve(&config, state)
                .await
                .with_context(|| format!("serving on {}", config.bind_addr()))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Classify {
            message,
            artifacts,
            json,
        } => {
            let Some(message) = Message::new(message) else {
                display::print_no_input();
                return Ok(ExitCode::from(EXIT_NO_INPUT));
            };
            let service = artifacts.load()?;
            let verdict = service.verdict(&message).context("classifying message")?;
            if json {
                let resp = ClassifyResponse::from(verdict);
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                display::print_verdict(&verdict);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { message, server } => {
            if Message::new(message.as_str()).is_none() {
                display::print_no_input();
                return Ok(ExitCode::from(EXIT_NO_INPUT));
            }
            let client = ApiClient::new(server);
            let resp = client
                .classify(&message)
                .await
                .context("classifying message with server")?;
            display::print_remote_verdict(&resp);
            Ok(ExitCode::SUCCESS)
        }
        Command::Inspect { artifacts } => {
            let service = artifacts.load()?;
            display::print_summary_card(&service.summary());
            Ok(ExitCode::SUCCESS)
        }
    }
}
