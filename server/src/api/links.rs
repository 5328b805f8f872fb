//! Handlers for `/links`

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::extract::{JsonBody, PathParam};
use crate::api::{Ack, AppState};
use crate::db::models::{LinkUpdate, NewLink};
use crate::db::operations::LinkOps;
use crate::errors::ServerError;

pub async fn list_links(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let links = LinkOps::list(state.db.pool()).await?;
    Ok(Json(links))
}

/// Create a link from `{"fromId": .., "toId": ..}`. Both ids must name
/// existing nodes; self-loops and duplicates are accepted.
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewLink>,
) -> Result<impl IntoResponse, ServerError> {
    let (from_id, to_id) = req.endpoints()?;
    let link = LinkOps::create(state.db.pool(), from_id, to_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn get_link(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let link = LinkOps::find_by_id(state.db.pool(), id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Link {} not found", id)))?;
    Ok(Json(link))
}

pub async fn update_link(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<LinkUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    LinkOps::update(state.db.pool(), id, &req).await?;
    Ok((StatusCode::ACCEPTED, Json(Ack::success())))
}

pub async fn delete_link(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, ServerError> {
    LinkOps::delete(state.db.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
