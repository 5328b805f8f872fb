use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::ServerError;

/// A workflow step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A directed connection from one node to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /nodes`
#[derive(Debug, Default, Deserialize)]
pub struct NewNode {
    pub name: Option<String>,
}

impl NewNode {
    /// Returns the name to insert, rejecting a missing or blank one
    pub fn validated_name(&self) -> Result<&str, ServerError> {
        match self.name.as_deref() {
            Some(name) => validate_name(name),
            None => Err(ServerError::Validation("name is required".to_string())),
        }
    }
}

/// Request body for `PUT /nodes/:id`; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct NodeUpdate {
    pub name: Option<String>,
}

impl NodeUpdate {
    pub fn validate(&self) -> Result<(), ServerError> {
        if let Some(name) = self.name.as_deref() {
            validate_name(name)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<&str, ServerError> {
    if name.trim().is_empty() {
        return Err(ServerError::Validation("name must not be empty".to_string()));
    }
    Ok(name)
}

/// Request body for `POST /links`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub from_id: Option<i64>,
    pub to_id: Option<i64>,
}

impl NewLink {
    /// Returns `(from_id, to_id)`, rejecting missing endpoints
    pub fn endpoints(&self) -> Result<(i64, i64), ServerError> {
        match (self.from_id, self.to_id) {
            (Some(from_id), Some(to_id)) => Ok((from_id, to_id)),
            (None, _) => Err(ServerError::Validation("fromId is required".to_string())),
            (_, None) => Err(ServerError::Validation("toId is required".to_string())),
        }
    }
}

/// Request body for `PUT /links/:id`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUpdate {
    pub from_id: Option<i64>,
    pub to_id: Option<i64>,
}

/// Links touching a node, split by direction
#[derive(Debug, Serialize)]
pub struct NodeLinks {
    /// Links arriving at the node (`toId == id`)
    pub previous: Vec<Link>,
    /// Links leaving the node (`fromId == id`)
    pub next: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(NewNode { name: None }.validated_name().is_err());
        assert!(NewNode { name: Some("   ".into()) }.validated_name().is_err());
        assert_eq!(NewNode { name: Some("Review".into()) }.validated_name().unwrap(), "Review");

        assert!(NodeUpdate { name: Some(String::new()) }.validate().is_err());
        assert!(NodeUpdate { name: None }.validate().is_ok());
    }

    #[test]
    fn link_bodies_use_camel_case() {
        let body: NewLink = serde_json::from_str(r#"{"fromId": 1, "toId": 2}"#).unwrap();
        assert_eq!(body.endpoints().unwrap(), (1, 2));

        let body: NewLink = serde_json::from_str(r#"{"toId": 2}"#).unwrap();
        assert!(matches!(body.endpoints(), Err(ServerError::Validation(_))));
    }

    #[test]
    fn node_serializes_timestamps_in_camel_case() {
        let now = Utc::now();
        let node = Node { id: 1, name: "A".into(), created_at: now, updated_at: now };
        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
