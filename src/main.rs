mod config;
mod db;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use config::{ChatConfig, StoreBackend};
use store::{ChatStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ChatConfig::from_env().expect("invalid configuration");

    let store: Arc<dyn ChatStore> = match &config.backend {
        StoreBackend::Postgres { database_url } => {
            let pool = db::init_pool(database_url)
                .await
                .expect("database init failed");
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; state is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let port = config.port;
    let state = state::AppState::new(store, config);

    // Spawn background idle sweep.
    let _sweep = services::presence::spawn_sweep_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "parlor listening");
    axum::serve(listener, app).await.expect("server failed");
}
