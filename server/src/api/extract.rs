//! Extractors that report malformed input as `ServerError::Validation`

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ServerError;

/// JSON request body; deserialization failures become a 400 `validation_error`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; unparsable ids become a 400 `validation_error`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServerError))]
pub struct PathParam<T>(pub T);
