//! Flowchart rendering
//!
//! Turns the stored nodes and links into a Mermaid-style top-down graph
//! description, one statement per line.

use std::fmt::Write;

use crate::db::models::{Link, Node};

/// First line of every document: a top-down directed graph
pub const HEADER: &str = "graph TD;";

/// Render nodes then links, in the order given.
pub fn render(nodes: &[Node], links: &[Link]) -> String {
    let mut document = String::with_capacity(16 * (nodes.len() + links.len() + 1));
    document.push_str(HEADER);
    document.push('\n');

    // Writing to a String cannot fail
    for node in nodes {
        let _ = writeln!(document, "{}[{}];", node.id, node.name);
    }
    for link in links {
        let _ = writeln!(document, "{} --> {};", link.from_id, link.to_id);
    }

    document
}
