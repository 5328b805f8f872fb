//! flowchart - command-line client
//!
//! Talks to a running flowchart server to manage nodes and links, and
//! prints the workflow as a flowchart document.

use anyhow::{bail, Context, Result};
use clap::Parser;

use flowchart::cli::{Cli, Commands, LinkCommand, NodeCommand};
use flowchart::client::{ApiClient, Link, Node};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.server_url())?;

    match cli.command {
        Commands::Nodes(command) => run_node_command(&client, command).await,
        Commands::Links(command) => run_link_command(&client, command).await,
        Commands::Graph { output } => {
            let document = client.graph().await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, document)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", document),
            }
            Ok(())
        }
    }
}

async fn run_node_command(client: &ApiClient, command: NodeCommand) -> Result<()> {
    match command {
        NodeCommand::List => {
            for node in client.list_nodes().await? {
                print_node(&node);
            }
        }
        NodeCommand::Add { name } => {
            let node = client.create_node(&name).await?;
            print_node(&node);
        }
        NodeCommand::Show { id } => match client.get_node(id).await? {
            Some(node) => print_node(&node),
            None => bail!("Node {} not found", id),
        },
        NodeCommand::Rename { id, name } => {
            client.rename_node(id, &name).await?;
            println!("Renamed node {}", id);
        }
        NodeCommand::Rm { id } => {
            client.delete_node(id).await?;
            println!("Deleted node {}", id);
        }
        NodeCommand::Links { id } => match client.node_links(id).await? {
            Some(links) => {
                println!("previous:");
                for link in &links.previous {
                    print_link(link);
                }
                println!("next:");
                for link in &links.next {
                    print_link(link);
                }
            }
            None => bail!("Node {} not found", id),
        },
    }
    Ok(())
}

async fn run_link_command(client: &ApiClient, command: LinkCommand) -> Result<()> {
    match command {
        LinkCommand::List => {
            for link in client.list_links().await? {
                print_link(&link);
            }
        }
        LinkCommand::Add { from, to } => {
            let link = client.create_link(from, to).await?;
            print_link(&link);
        }
        LinkCommand::Show { id } => match client.get_link(id).await? {
            Some(link) => print_link(&link),
            None => bail!("Link {} not found", id),
        },
        LinkCommand::Set { id, from, to } => {
            if from.is_none() && to.is_none() {
                bail!("Nothing to change: pass --from and/or --to");
            }
            client.update_link(id, from, to).await?;
            println!("Updated link {}", id);
        }
        LinkCommand::Rm { id } => {
            client.delete_link(id).await?;
            println!("Deleted link {}", id);
        }
    }
    Ok(())
}

fn print_node(node: &Node) {
    println!("{:>6}  {}  (updated {})", node.id, node.name, node.updated_at.format("%Y-%m-%d %H:%M:%S"));
}

fn print_link(link: &Link) {
    println!("{:>6}  {} --> {}", link.id, link.from_id, link.to_id);
}
