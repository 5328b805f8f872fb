//! Flowchart Server
//!
//! REST API over workflow steps (nodes) and the directed links between
//! them, with a plain-text flowchart export at `/`.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod graph;
pub mod middleware;

pub use api::{router, AppState};
pub use config::Config;
pub use db::Database;
pub use errors::ServerError;
