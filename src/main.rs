use anyhow::{Context, Result};
use clap::Parser;
use customer_console::cli::args::{Cli, Commands};
use customer_console::cli::shell::run_shell;
use customer_console::core::config::Config;
use customer_console::core::tracing_init::init_tracing;
use customer_console::handlers::actions::CustomerConsole;
use std::io::Write;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load and validate configuration
    let mut config = Config::load(cli.config.as_deref()).context(format!(
        "Failed to load configuration from '{}'",
        cli.config
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| customer_console::core::config::DEFAULT_CONFIG_PATH.to_string())
    ))?;

    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate().context("Invalid configuration")?;

    // Initialize tracing/logging
    init_tracing(&config.logging);

    // One action at a time on a single thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(cli.command, config))
}

async fn async_main(command: Commands, config: Config) -> Result<ExitCode> {
    info!(
        base_url = %config.backend.base_url,
        resource_path = %config.backend.resource_path,
        require_fields = config.form.require_fields,
        allow_unspecified_active = config.form.allow_unspecified_active,
        payload = ?config.form.payload,
        "Customer console starting"
    );

    let mut console = CustomerConsole::from_config(&config)
        .context("Failed to create customers client")?;

    let Some(action) = command.action() else {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        run_shell(&mut console, stdin, &mut stdout).await?;
        return Ok(ExitCode::SUCCESS);
    };

    command.fill(console.form_mut());
    let outcome = console.run(action).await;

    let mut stdout = std::io::stdout();
    write!(stdout, "{}", console.screen())?;
    stdout.flush()?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!(error = ?e, "Exiting with failure status");
            Ok(ExitCode::FAILURE)
        }
    }
}
