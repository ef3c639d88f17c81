use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_catalog::api::router;
use course_catalog::config::Config;
use course_catalog::ids::UuidGenerator;
use course_catalog::services::CatalogService;
use course_catalog::state::AppState;
use course_catalog::store::{CollectionClient, HttpCollectionClient, MemoryCollectionClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_catalog=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new_from_env()?;

    let store: Arc<dyn CollectionClient> = if config.uses_memory_store() {
        info!("using in-memory document store");
        Arc::new(MemoryCollectionClient::new())
    } else {
        info!("using document store at {}", config.database_url);
        Arc::new(HttpCollectionClient::new(&config.database_url)?)
    };

    let service = CatalogService::new(store, Arc::new(UuidGenerator));
    let app = router(AppState::new(service));

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
