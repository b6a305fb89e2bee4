use std::net::SocketAddr;
use std::sync::Arc;

use payment_gateway::api::{self, AppState};
use payment_gateway::config::Config;
use payment_gateway::payments::acquirer::HttpBankClient;
use payment_gateway::payments::service::PaymentService;
use payment_gateway::store::PaymentStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting payment gateway");
    tracing::info!("Environment: {}", config.server.environment);
    tracing::info!("Acquirer endpoint: {}", config.acquirer.base_url);

    let bank = Arc::new(HttpBankClient::new(config.acquirer.clone()));
    let store = Arc::new(PaymentStore::new());
    let service = Arc::new(PaymentService::new(bank, store));

    let state = AppState {
        service,
        environment: config.server.environment.clone(),
    };
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
