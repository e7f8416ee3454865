use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;

/// opoprep-web - marketing site and member dashboard
#[derive(Parser)]
#[command(name = "opoprep-web")]
#[command(about = "Exam-preparation site and member dashboard", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = opoprep_web::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    opoprep_web::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Check => {
            tracing::info!("Configuration OK");
            Ok(())
        }
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: opoprep_web::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    tracing::info!(backend = %config.backend.base_url, "Starting opoprep-web server...");

    let app = opoprep_web::create_app(config)?.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
