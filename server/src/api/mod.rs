pub mod extract;
pub mod graph;
pub mod links;
pub mod nodes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::Database;

/// Application state shared across handlers
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

/// Generic acknowledgment returned by updates: `{"data": "success"}`
#[derive(Debug, Serialize)]
pub struct Ack {
    data: &'static str,
}

impl Ack {
    pub fn success() -> Self {
        Self { data: "success" }
    }
}

/// Build the full router over the given state.
///
/// Cross-origin requests are only allowed in development.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = if state.config.is_development() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(graph::export_graph))
        .route("/nodes", get(nodes::list_nodes).post(nodes::create_node))
        .route(
            "/nodes/:id",
            get(nodes::get_node).put(nodes::update_node).delete(nodes::delete_node),
        )
        .route("/nodes/:id/links", get(nodes::get_node_links))
        .route("/links", get(links::list_links).post(links::create_link))
        .route(
            "/links/:id",
            get(links::get_link).put(links::update_link).delete(links::delete_link),
        )
        .route("/health", get(|| async { "OK" }))
        .layer(middleware::from_fn(crate::middleware::log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
