/// BlockAction Server - minimal user account service
use anyhow::Context;
use blockaction_server::{
    config::ServerConfig, cors_layer, create_router, services::SignupInput, state::AppState,
};
use blockaction_storage::SqliteIdentityStore;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blockaction-server")]
#[command(about = "BlockAction user account service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Listen port, overrides the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply database migrations
    Migrate {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Create a new user
    AddUser {
        /// Login account
        #[arg(short, long)]
        account: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blockaction_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            serve(config, port).await?;
        }
        Commands::Migrate { config } => {
            migrate(config).await?;
        }
        Commands::AddUser {
            account,
            password,
            name,
            config,
        } => {
            add_user(config, account, password, name).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteIdentityStore> {
    let pool = blockaction_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    blockaction_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    Ok(SqliteIdentityStore::new(pool))
}

async fn serve(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting BlockAction server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = open_store(&config).await?;
    let app_state = AppState::build(&config, Arc::new(store))?;
    let app = create_router(app_state, cors_layer(&config.cors)?);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("invalid host {}", config.server.host))?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn migrate(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?;
    let pool = blockaction_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    blockaction_storage::run_migrations(&pool).await?;

    tracing::info!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn add_user(
    config_path: Option<PathBuf>,
    account: String,
    password: String,
    user_name: String,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config).await?;
    let app_state = AppState::build(&config, Arc::new(store))?;

    let account = app_state
        .accounts
        .signup(&SignupInput {
            account,
            password,
            user_name,
        })
        .await?;

    println!("Created user {}", account);
    Ok(())
}
