//! splitscreen - MCP server for split-screen window control.
//!
//! Main entry point for the stdio server and the one-shot CLI commands.

mod cli;
mod protocol;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use splitscreen_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use splitscreen_core::Kernel;
use splitscreen_protocols::tool::ToolContext;
use splitscreen_tools_reminder::ReminderToolsExtension;
use splitscreen_tools_window::WindowToolsExtension;

use crate::cli::{Cli, Commands};
use crate::server::McpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(ConfigLoader::default_path);
    let (config, found) = match &config_path {
        Some(path) => ConfigLoader::load_or_default(path)?,
        None => (Config::default(), false),
    };

    let _guard = init_tracing(&config.logging)?;

    if found {
        info!("Loaded config from {:?}", config_path);
    } else {
        warn!("Config file not found at {:?}, using defaults", config_path);
    }

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}", warning);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Config {}", err);
        }
        return Err(format!("invalid configuration ({} errors)", validation.errors.len()).into());
    }

    let work_dir = match cli.work_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let kernel = Arc::new(build_kernel(&config, work_dir).await?);

    let outcome = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(kernel.clone(), &config).await,
        Commands::Control { action } => {
            run_tool(&kernel, "window_control", serde_json::json!({ "action": action }), cli.json)
                .await
        }
        Commands::Status => {
            run_tool(&kernel, "window_permission_status", serde_json::json!({}), cli.json).await
        }
        Commands::Targets => {
            run_tool(&kernel, "window_list_targets", serde_json::json!({}), cli.json).await
        }
    };

    kernel.stop().await;
    outcome
}

/// Initialize tracing: stderr console output plus an optional daily log file.
///
/// stdout carries JSON-RPC, so nothing is ever logged there.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let (file_layer, guard) = match &logging.dir {
        Some(dir) => {
            let log_dir = PathBuf::from(ConfigLoader::expand_path(dir));
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("splitscreen")
                .filename_suffix("log")
                .max_log_files(14)
                .build(&log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn build_kernel(config: &Config, work_dir: PathBuf) -> Result<Kernel, Box<dyn std::error::Error>> {
    let kernel = Kernel::new(work_dir);

    kernel
        .load_extension(
            Box::new(WindowToolsExtension::new()),
            serde_json::to_value(&config.window)?,
        )
        .await?;
    kernel
        .load_extension(
            Box::new(ReminderToolsExtension::new()),
            serde_json::to_value(&config.reminder)?,
        )
        .await?;

    info!(tools = kernel.tool_registry().len(), "Kernel ready");
    Ok(kernel)
}

async fn serve(kernel: Arc<Kernel>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = McpServer::new(kernel, &config.server);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = server.run(stdin, stdout) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }
    Ok(())
}

async fn run_tool(
    kernel: &Kernel,
    tool_id: &str,
    params: Value,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = ToolContext::new("cli", kernel.work_dir().clone());
    let result = kernel.call_tool(tool_id, params, ctx).await?;

    match (&result.structured_output, json) {
        (Some(output), true) => println!("{}", serde_json::to_string_pretty(output)?),
        _ => println!("{}", result.content),
    }

    if let Some(err) = result.error {
        return Err(err.into());
    }
    Ok(())
}
