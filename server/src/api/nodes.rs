//! Handlers for `/nodes`

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use log::info;

use crate::api::extract::{JsonBody, PathParam};
use crate::api::{Ack, AppState};
use crate::db::models::{NewNode, NodeUpdate};
use crate::db::operations::{LinkOps, NodeOps};
use crate::errors::ServerError;

pub async fn list_nodes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let nodes = NodeOps::list(state.db.pool()).await?;
    Ok(Json(nodes))
}

/// Create a node from `{"name": ...}`
pub async fn create_node(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewNode>,
) -> Result<impl IntoResponse, ServerError> {
    let name = req.validated_name()?;
    let node = NodeOps::create(state.db.pool(), name).await?;
    Ok((StatusCode::CREATED, Json(node)))
}

pub async fn get_node(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let node = NodeOps::find_by_id(state.db.pool(), id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Node {} not found", id)))?;
    Ok(Json(node))
}

/// Overwrite the given fields. Reports success even when no node has `id`.
pub async fn update_node(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<NodeUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    req.validate()?;
    NodeOps::update(state.db.pool(), id, &req).await?;
    Ok((StatusCode::ACCEPTED, Json(Ack::success())))
}

pub async fn delete_node(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ServerError> {
    NodeOps::delete(state.db.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Incoming and outgoing links of one node
pub async fn get_node_links(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let pool = state.db.pool();
    if NodeOps::find_by_id(pool, id).await?.is_none() {
        info!("Links requested for unknown node {}", id);
        return Err(ServerError::NotFound(format!("Node {} not found", id)));
    }

    let links = LinkOps::find_by_node(pool, id).await?;
    Ok(Json(links))
}
