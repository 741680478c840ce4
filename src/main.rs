//! Remote service config checker.
//!
//! Loads a configuration the same way the proxy does at startup, reports
//! the detected platform, and lists every validation problem.
//!
//! ```text
//! config file ──┐
//! policy secret ┼─▶ load_config ─▶ platform + validation ─▶ exit status
//! analytics key ┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use remote_service_config::config::{load_config, ConfigError, ConfigSources};
use remote_service_config::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "remote-service-config")]
#[command(about = "Load and validate a remote service proxy configuration", long_about = None)]
struct Cli {
    /// Plain config file or manifest stream.
    #[arg(short, long, env = "REMOTE_SERVICE_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    /// Directory holding the policy secret files.
    #[arg(long, env = "REMOTE_SERVICE_POLICY_SECRET")]
    policy_secret: Option<PathBuf>,

    /// Analytics service account file, or a directory containing it.
    #[arg(long, env = "REMOTE_SERVICE_ANALYTICS_SECRET")]
    analytics_secret: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "remote_service_config=info")]
    log_level: String,

    /// Print the effective configuration (secrets omitted).
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut sources = ConfigSources::new(&cli.config);
    sources.policy_secret_dir = cli.policy_secret;
    sources.analytics_credentials = cli.analytics_secret;

    let config = match load_config(&sources) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            tracing::error!(count = errors.len(), "configuration is invalid");
            for error in &errors {
                eprintln!("{error}");
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(platform = %config.platform(), "configuration is valid");

    if cli.print {
        match serde_yaml::to_string(&config) {
            Ok(yaml) => print!("{yaml}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to render configuration");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
