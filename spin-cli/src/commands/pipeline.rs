//! Pipeline command handlers
//!
//! Handles pipeline-related CLI commands. Listing fetches the pipeline
//! configurations of one application from Gate and prints them untouched.

use anyhow::Result;
use clap::Subcommand;
use spin_client::{ApplicationApi, ClientError, GateClient, StatusCode};
use thiserror::Error;

use crate::config::Config;
use crate::output::{OutputFormat, Printer, Render};

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List the pipelines for the provided application
    #[command(visible_alias = "ls")]
    List {
        /// Application to list pipelines from
        #[arg(short, long, default_value = "", hide_default_value = true)]
        application: String,
    },
}

/// Ways listing pipelines can fail
#[derive(Debug, Error)]
pub enum ListPipelinesError {
    /// The Gate client could not be constructed
    #[error(transparent)]
    Config(ClientError),

    /// A required option was empty
    #[error("required parameter '{0}' not set")]
    MissingParameter(&'static str),

    /// The request produced no usable response
    #[error(transparent)]
    Transport(ClientError),

    /// Gate answered with something other than 200 OK
    #[error(
        "Encountered an error listing pipelines for application {application}, status code: {status}"
    )]
    Status { application: String, status: u16 },

    /// The payload could not be written out
    #[error(transparent)]
    Render(anyhow::Error),
}

/// Handle pipeline commands
///
/// # Arguments
/// * `command` - The pipeline command to execute
/// * `config` - The CLI configuration
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    match command {
        PipelineCommands::List { application } => {
            tracing::debug!(application = %application, "Listing pipelines");
            let mut printer = Printer::stdout();
            list_pipelines(
                || GateClient::connect(&config.connection()),
                &application,
                config.output,
                &mut printer,
            )
            .await?;
            Ok(())
        }
    }
}

/// List the pipeline configurations of an application
///
/// Opens a session with `connect`, makes a single request and hands the
/// payload to `renderer` only when Gate answers `200 OK`. Nothing is
/// rendered on any failure path and nothing is retried.
pub async fn list_pipelines<C, F, R>(
    connect: F,
    application: &str,
    format: OutputFormat,
    renderer: &mut R,
) -> Result<(), ListPipelinesError>
where
    C: ApplicationApi,
    F: FnOnce() -> spin_client::Result<C>,
    R: Render + ?Sized,
{
    let client = connect().map_err(ListPipelinesError::Config)?;

    if application.is_empty() {
        return Err(ListPipelinesError::MissingParameter("application"));
    }

    let response = client
        .get_pipeline_configs_for_application(application)
        .await
        .map_err(ListPipelinesError::Transport)?;

    if response.status != StatusCode::OK {
        return Err(ListPipelinesError::Status {
            application: application.to_string(),
            status: response.status.as_u16(),
        });
    }

    renderer
        .render(&response.payload, format)
        .map_err(ListPipelinesError::Render)
}
