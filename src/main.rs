use std::sync::Arc;

use tokio::net::TcpListener;

use auction_house::adapters::http::{create_router, CatalogHandlers, OfferHandlers};
use auction_house::adapters::websocket::{
    AuctionEventBridge, Broadcaster, TopicRegistry, WebSocketState,
};
use auction_house::adapters::{
    PostgresItemRepository, PostgresOfferRepository, PostgresUserRepository,
};
use auction_house::application::handlers::catalog::{ItemCatalog, UserDirectory};
use auction_house::application::handlers::offer::{
    CreateOfferHandler, DeleteOfferHandler, OfferQueries,
};
use auction_house::config::AppConfig;
use auction_house::ports::{OfferNotifier, OfferRepository};
use auction_house::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    telemetry::init_tracing(&config.server).map_err(|e| e.to_string())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Auction house starting"
    );

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let registry = Arc::new(TopicRegistry::new());
    let broadcaster = Arc::new(Broadcaster::new(registry.clone()));
    let notifier: Arc<dyn OfferNotifier> = AuctionEventBridge::new_shared(broadcaster);
    let repository: Arc<dyn OfferRepository> = Arc::new(PostgresOfferRepository::new(pool.clone()));

    let catalog = CatalogHandlers::new(
        UserDirectory::new(Arc::new(PostgresUserRepository::new(pool.clone()))),
        ItemCatalog::new(Arc::new(PostgresItemRepository::new(pool))),
    );

    let offers = OfferHandlers::new(
        Arc::new(CreateOfferHandler::new(repository.clone(), notifier.clone())),
        Arc::new(DeleteOfferHandler::new(repository.clone(), notifier)),
        OfferQueries::new(repository),
    );
    let ws_state = WebSocketState::new(registry, config.live.clone());
    let app = create_router(catalog, offers, ws_state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
