//! HTTP client for the flowchart server
//!
//! Thin typed wrapper over the REST endpoints. Lookups by id return
//! `Ok(None)` on 404; any other non-success status becomes an error carrying
//! the server's message.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// A workflow step as returned by the server
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A directed link between two nodes
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming (`previous`) and outgoing (`next`) links of a node
#[derive(Deserialize, Debug)]
pub struct NodeLinks {
    pub previous: Vec<Link>,
    pub next: Vec<Link>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    from_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_id: Option<i64>,
}

/// Client for one server instance
pub struct ApiClient {
    server_url: String,
    http_client: Client,
}

impl ApiClient {
    /// Create a new client for `server_url` (e.g. `http://127.0.0.1:8080`)
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub async fn list_nodes(&self) -> Result<Vec<Node>> {
        let response = self.send(self.http_client.get(self.url("/nodes"))).await?;
        response.json().await.context("Invalid node list")
    }

    pub async fn create_node(&self, name: &str) -> Result<Node> {
        let request = self.http_client.post(self.url("/nodes")).json(&json!({ "name": name }));
        let response = self.send(request).await?;
        response.json().await.context("Invalid node")
    }

    pub async fn get_node(&self, id: i64) -> Result<Option<Node>> {
        let request = self.http_client.get(self.url(&format!("/nodes/{}", id)));
        match self.send_optional(request).await? {
            Some(response) => Ok(Some(response.json().await.context("Invalid node")?)),
            None => Ok(None),
        }
    }

    pub async fn rename_node(&self, id: i64, name: &str) -> Result<()> {
        let request = self
            .http_client
            .put(self.url(&format!("/nodes/{}", id)))
            .json(&json!({ "name": name }));
        self.send(request).await?;
        Ok(())
    }

    pub async fn delete_node(&self, id: i64) -> Result<()> {
        self.send(self.http_client.delete(self.url(&format!("/nodes/{}", id)))).await?;
        Ok(())
    }

    pub async fn node_links(&self, id: i64) -> Result<Option<NodeLinks>> {
        let request = self.http_client.get(self.url(&format!("/nodes/{}/links", id)));
        match self.send_optional(request).await? {
            Some(response) => Ok(Some(response.json().await.context("Invalid node links")?)),
            None => Ok(None),
        }
    }

    pub async fn list_links(&self) -> Result<Vec<Link>> {
        let response = self.send(self.http_client.get(self.url("/links"))).await?;
        response.json().await.context("Invalid link list")
    }

    pub async fn create_link(&self, from_id: i64, to_id: i64) -> Result<Link> {
        let body = LinkBody { from_id: Some(from_id), to_id: Some(to_id) };
        let response = self.send(self.http_client.post(self.url("/links")).json(&body)).await?;
        response.json().await.context("Invalid link")
    }

    pub async fn get_link(&self, id: i64) -> Result<Option<Link>> {
        let request = self.http_client.get(self.url(&format!("/links/{}", id)));
        match self.send_optional(request).await? {
            Some(response) => Ok(Some(response.json().await.context("Invalid link")?)),
            None => Ok(None),
        }
    }

    pub async fn update_link(&self, id: i64, from_id: Option<i64>, to_id: Option<i64>) -> Result<()> {
        let body = LinkBody { from_id, to_id };
        let request = self.http_client.put(self.url(&format!("/links/{}", id))).json(&body);
        self.send(request).await?;
        Ok(())
    }

    pub async fn delete_link(&self, id: i64) -> Result<()> {
        self.send(self.http_client.delete(self.url(&format!("/links/{}", id)))).await?;
        Ok(())
    }

    /// Fetch the plain-text flowchart document
    pub async fn graph(&self) -> Result<String> {
        let response = self.send(self.http_client.get(self.url("/"))).await?;
        response.text().await.context("Invalid graph document")
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", self.server_url))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("Server returned {}: {}", status, error_message(&body));
    }

    async fn send_optional(&self, request: reqwest::RequestBuilder) -> Result<Option<Response>> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", self.server_url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            status => {
                let body = response.text().await.unwrap_or_default();
                bail!("Server returned {}: {}", status, error_message(&body));
            }
        }
    }
}

/// Pull a readable message out of either error body shape the server uses
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    if let Some(message) = value.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
            .collect();
        return messages.join("; ");
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const NODE_JSON: &str = r#"{"id":1,"name":"Draft","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;
    const LINK_JSON: &str = r#"{"id":3,"fromId":1,"toId":2,"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;

    #[tokio::test]
    async fn create_node_posts_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/nodes")
            .match_body(Matcher::Json(json!({ "name": "Draft" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(NODE_JSON)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let node = client.create_node("Draft").await.unwrap();

        assert_eq!(node.id, 1);
        assert_eq!(node.name, "Draft");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_node_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nodes/9")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors":["Node 9 not found"]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        assert!(client.get_node(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn foreign_key_error_carries_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/links")
            .match_body(Matcher::Json(json!({ "fromId": 1, "toId": 99 })))
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"foreign_key_error","message":"Foreign key violation: FOREIGN KEY constraint failed","status_code":409}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let err = client.create_link(1, 99).await.unwrap_err().to_string();

        assert!(err.contains("409"), "{}", err);
        assert!(err.contains("FOREIGN KEY constraint failed"), "{}", err);
    }

    #[tokio::test]
    async fn update_link_sends_only_given_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/links/3")
            .match_body(Matcher::Json(json!({ "toId": 5 })))
            .with_status(202)
            .with_body(r#"{"data":"success"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(format!("{}/", server.url())).unwrap();
        client.update_link(3, None, Some(5)).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn lists_and_graph() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/links")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", LINK_JSON))
            .create_async()
            .await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_body("graph TD;\n1[A];\n")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let links = client.list_links().await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from_id, links[0].to_id), (1, 2));
        assert_eq!(client.graph().await.unwrap(), "graph TD;\n1[A];\n");
    }

    #[test]
    fn error_message_handles_both_shapes() {
        assert_eq!(error_message(r#"{"errors":["Node 1 not found"]}"#), "Node 1 not found");
        assert_eq!(error_message(r#"{"message":"Validation error: name is required"}"#), "Validation error: name is required");
        assert_eq!(error_message("plain failure"), "plain failure");
    }
}
