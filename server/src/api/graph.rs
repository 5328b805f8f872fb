use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use log::debug;

use crate::api::AppState;
use crate::db::operations::{LinkOps, NodeOps};
use crate::errors::ServerError;
use crate::graph;

/// Render the whole workflow as a plain-text flowchart.
///
/// Nodes and links are read inside one transaction, so a link never
/// refers to a node missing from the same document.
pub async fn export_graph(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let mut tx = state.db.pool().begin().await?;
    let nodes = NodeOps::list(&mut *tx).await?;
    let links = LinkOps::list(&mut *tx).await?;
    tx.commit().await?;

    debug!("Exporting graph with {} nodes and {} links", nodes.len(), links.len());
    let document = graph::render(&nodes, &links);

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], document))
}
