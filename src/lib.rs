//! Flowchart: command-line client for the flowchart server
//!
//! This library exposes the typed HTTP client and the CLI definition used by
//! the `flowchart` binary.

pub mod cli;
pub mod client;
