use crate::api::ApiClient;
use crate::config::Config;
use crate::router::RouteTable;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub routes: Arc<RouteTable>,
    pub config: Arc<Config>,
}
