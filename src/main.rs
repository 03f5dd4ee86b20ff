use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use votaciones::{
    AppState,
    api::ApiClient,
    config::{Config, SessionBackend},
    router::create_router,
    session::{MemorySessionStore, RedisSessionStore, SessionStore},
};

#[tokio::main]
async fn main() {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    if config.development_mode {
        tracing::warn!("Development mode: local callers bypass the address allow-list");
    }

    let sessions: Arc<dyn SessionStore> = match (&config.session_backend, &config.redis_url) {
        (SessionBackend::Redis, Some(url)) => {
            let client = redis::Client::open(url.as_str()).expect("Failed to create Redis client");
            tracing::info!("Sessions stored in Redis");
            Arc::new(RedisSessionStore::new(client))
        }
        _ => {
            tracing::info!("Sessions stored in memory");
            Arc::new(MemorySessionStore::new())
        }
    };

    let api = ApiClient::from_config(&config).expect("Failed to build the API client");

    let state = AppState {
        config: Arc::new(config),
        api,
        sessions,
    };

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );

    let app = create_router(state);

    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
