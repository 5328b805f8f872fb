//! Command-line interface definition and argument parsing
//!
//! This module uses clap to define and parse command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Server used when neither `--server` nor `FLOWCHART_SERVER_URL` is set
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Command-line arguments for flowchart
#[derive(Parser, Debug)]
#[command(
    name = "flowchart",
    about = "Manage workflow steps and the links between them",
    version
)]
pub struct Cli {
    /// Base URL of the flowchart server (overrides FLOWCHART_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with workflow steps
    #[command(subcommand)]
    Nodes(NodeCommand),

    /// Work with links between steps
    #[command(subcommand)]
    Links(LinkCommand),

    /// Print the workflow as a flowchart document
    Graph {
        /// Write the document to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NodeCommand {
    /// List all nodes
    List,
    /// Create a node
    Add { name: String },
    /// Show one node
    Show { id: i64 },
    /// Rename a node
    Rename { id: i64, name: String },
    /// Delete a node together with its links
    Rm { id: i64 },
    /// Show the links arriving at and leaving a node
    Links { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum LinkCommand {
    /// List all links
    List,
    /// Link two existing nodes
    Add { from: i64, to: i64 },
    /// Show one link
    Show { id: i64 },
    /// Move one or both ends of a link
    Set {
        id: i64,
        #[arg(long)]
        from: Option<i64>,
        #[arg(long)]
        to: Option<i64>,
    },
    /// Delete a link
    Rm { id: i64 },
}

impl Cli {
    /// Resolve the server URL: flag, then environment, then default
    pub fn server_url(&self) -> String {
        self.server
            .clone()
            .or_else(|| std::env::var("FLOWCHART_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from(["flowchart", "links", "set", "4", "--to", "7"]).unwrap();
        match cli.command {
            Commands::Links(LinkCommand::Set { id, from, to }) => {
                assert_eq!((id, from, to), (4, None, Some(7)));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["flowchart", "nodes", "add", "Code review"]).unwrap();
        assert!(matches!(cli.command, Commands::Nodes(NodeCommand::Add { ref name }) if name == "Code review"));
    }

    #[test]
    fn server_flag_wins() {
        let cli = Cli::try_parse_from(["flowchart", "graph", "--server", "http://example:9000"]).unwrap();
        assert_eq!(cli.server_url(), "http://example:9000");
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(Cli::try_parse_from(["flowchart", "nodes", "show", "abc"]).is_err());
    }
}
