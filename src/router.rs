use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    AppState,
    middleware::{DENIED_PATH, IpFilter, ip_filter, log_errors, require_admin, require_member},
    routes,
};

/// Every page and endpoint with the request filter in front of them.
pub fn create_router(state: AppState) -> Router {
    // open to anyone who passes the request filter
    let public_routes = Router::new()
        .route("/", get(routes::auth::login_page).post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route(DENIED_PATH, get(routes::denied::denied))
        .route("/api/health", get(routes::health::health));

    let member_routes = Router::new()
        .route(
            "/votar",
            get(routes::vote::vote_page).post(routes::vote::cast_vote),
        )
        .route_layer(from_fn_with_state(state.clone(), require_member));

    let admin_routes = Router::new()
        .route("/admin/estadisticas", get(routes::stats::stats_page))
        .route(
            "/admin/estadisticas/reporte",
            get(routes::stats::download_report),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let filter = Arc::new(IpFilter::from_config(&state.config));

    let router = Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .merge(admin_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(from_fn(log_errors))
        .layer(from_fn_with_state(filter, ip_filter))
        .layer(TraceLayer::new_for_http());

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
