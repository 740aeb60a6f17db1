//! Spin CLI
//!
//! Command-line interface for the Gate API of a continuous-delivery
//! control plane.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use clap::builder::FalseyValueParser;
use commands::{Commands, handle_command};
use config::Config;
use output::OutputFormat;
use std::ffi::OsString;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spin")]
#[command(about = "Spinnaker CLI for the Gate API", long_about = None)]
struct Cli {
    /// Gate endpoint
    #[arg(
        long,
        global = true,
        env = "SPIN_GATE_ENDPOINT",
        default_value = "http://localhost:8084"
    )]
    gate_endpoint: String,

    /// Username for basic auth
    #[arg(long, global = true, env = "SPIN_USERNAME")]
    username: Option<String>,

    /// Password for basic auth
    #[arg(long, global = true, env = "SPIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Bearer token, used instead of basic auth when set
    #[arg(long, global = true, env = "SPIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, global = true, env = "SPIN_INSECURE", value_parser = FalseyValueParser::new())]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SPIN_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Headers sent with every request (e.g., X-Team=platform,X-Env=prod)
    #[arg(
        long,
        global = true,
        env = "SPIN_DEFAULT_HEADERS",
        value_delimiter = ',',
        value_parser = parse_key_val
    )]
    default_headers: Vec<(String, String)>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        env = "SPIN_OUTPUT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output: OutputFormat,

    /// Disable colored output (also set by a non-empty NO_COLOR)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            gate_endpoint: self.gate_endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            token: self.token.clone(),
            insecure: self.insecure,
            timeout: Duration::from_secs(self.timeout),
            default_headers: self.default_headers.clone(),
            output: self.output,
            no_color: self.no_color || no_color_requested(std::env::var_os("NO_COLOR")),
        }
    }
}

/// `NO_COLOR` disables color whenever it is set to anything non-empty
fn no_color_requested(value: Option<OsString>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].trim().to_string(), s[pos + 1..].trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spin_cli=warn,spin_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = cli.config();
    config.validate()?;

    if config.no_color {
        colored::control::set_override(false);
    }

    handle_command(cli.command, &config).await
}
