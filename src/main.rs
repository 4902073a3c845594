use betfoot::cli::{self, Cli, Commands};
use betfoot::config::{AppConfig, LoggingConfig};
use betfoot::error::Result;
use betfoot::services::ApiServer;
use betfoot::strategy::Analyzer;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_from(&cli.config)?;

    match cli.command {
        Some(Commands::Analyze { text }) => {
            init_logging_simple();
            let analyzer = Analyzer::from_config(&config)?;
            cli::run_analyze(&analyzer, text.as_deref())?;
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            init_logging(&config.logging);
            run_server(config).await?;
        }
        None => {
            init_logging(&config.logging);
            run_server(config).await?;
        }
    }

    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let analyzer = Arc::new(Analyzer::from_config(&config)?);
    let server = ApiServer::new(analyzer, config.server.clone());

    info!(
        bankroll = %config.ledger.initial_bankroll,
        min_edge_pct = %config.staking.min_edge_pct,
        "betfoot starting"
    );

    tokio::select! {
        res = server.run() => res?,
        _ = shutdown_signal() => info!("Shutdown signal received"),
    }

    info!("Shutdown complete");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},betfoot=debug", logging.level)));

    // Daily rotating file log only when a directory is configured
    let file_layer = std::env::var("BETFOOT_LOG_DIR").ok().and_then(|log_dir| {
        if let Err(e) = log_dir_writable(&log_dir) {
            eprintln!("Warning: Could not write to log directory {log_dir} ({e}), file logging disabled");
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(&log_dir, "betfoot.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the guard alive for the life of the process
        Box::leak(Box::new(guard));
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
    });

    let (json_layer, console_layer) = if logging.json {
        (Some(tracing_subscriber::fmt::layer().json().with_target(true)), None)
    } else {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// `rolling::daily` panics when it cannot create its file, so check first
fn log_dir_writable(log_dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let test_path = std::path::Path::new(log_dir).join(".betfoot_write_test");
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&test_path)?;
    let _ = std::fs::remove_file(&test_path);
    Ok(())
}

fn init_logging_simple() {
    // Minimal logging for CLI commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
