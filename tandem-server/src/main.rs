use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tandem::config::ConfigBuilder;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use tandem_server::chat::ChatClient;
use tandem_server::cli::CliArgs;
use tandem_server::config::ServerConfig;
use tandem_server::create_router;
use tandem_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = if let Some(ref level) = cli_args.log_level {
        tracing_subscriber::EnvFilter::new(level)
            .add_directive("surrealdb_core=warn".parse().unwrap())
            .add_directive("surrealdb=warn".parse().unwrap())
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("surrealdb_core=warn".parse().unwrap())
            .add_directive("surrealdb=warn".parse().unwrap())
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Tandem server v{}", tandem::VERSION);

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    // Initialize the social system with the selected storage backend
    let tandem_config = match &server_config.data_dir {
        Some(data_dir) => {
            info!("Using persistent storage at {}", data_dir.display());
            ConfigBuilder::new().with_data_dir(data_dir).build()?
        }
        None => {
            info!("No data directory configured, using in-memory storage");
            ConfigBuilder::new().with_memory_storage().build()?
        }
    };

    let social = tandem::init(tandem_config).await?;
    info!("Tandem social manager initialized");

    // Create application state
    let mut app_state = AppState::new(social, server_config.clone());

    // Initialize the chat provider client if configured
    match ChatClient::from_config(&server_config.chat)? {
        Some(chat) => {
            info!("Chat provider client initialized");
            app_state.set_chat_client(chat);
        }
        None => {
            info!("Chat provider not configured, chat token endpoint disabled");
        }
    }

    let app_state = Arc::new(app_state);

    // Create the router with all API endpoints
    let app = create_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    if server_config.allow_signup {
        info!("User signup is enabled");
    } else {
        info!("User signup is disabled");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
