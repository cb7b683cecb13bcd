//! AI Calling Agent API entry point.
//!
//! Binary name: `callagent`
//!
//! Parses CLI arguments, initializes tracing, loads settings, then either
//! starts the HTTP gateway or runs one of the inspection commands.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use callagent_infra::config::apply_cli_overrides;
use callagent_observe::tracing_setup::{
    filter_for_verbosity, init_tracing, shutdown_tracing, LogOptions,
};

use cli::{Cli, Commands, ConfigArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or settings
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "callagent", &mut std::io::stdout());
        return Ok(());
    }

    let options = LogOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: cli.json,
        enable_otel: cli.otel,
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { config, host, port } => serve(&config, host, port, cli.quiet).await,
        Commands::Config { config } => cli::config::show_config(&config, cli.json).await,
        Commands::Routes { config } => cli::routes::list_routes(&config, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

async fn serve(
    args: &ConfigArgs,
    host: Option<String>,
    port: Option<u16>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut settings = cli::config::load(args).await?;
    apply_cli_overrides(&mut settings, host, port);

    // Assemble before binding: a rejected policy or mount never sees traffic.
    let router = http::gateway::build_router(&settings).context("Failed to assemble gateway")?;

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    tracing::info!(
        addr = %local,
        service = %settings.service.name,
        version = %settings.service.version,
        "Listening"
    );
    if !quiet {
        println!(
            "  {} {} listening on {}",
            console::style("⚡").bold(),
            settings.service.name,
            console::style(format!("http://{local}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
