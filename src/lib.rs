use std::sync::Arc;

use api::ApiClient;
use config::Config;
use session::SessionStore;

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod report;
pub mod router;
pub mod session;
pub mod utils;
pub mod views;

pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub sessions: Arc<dyn SessionStore>,
}
