use chrono::Utc;
use sqlx::{Executor, Sqlite};
use log::{info, error, warn};

use crate::db::models::{Link, LinkUpdate, Node, NodeLinks, NodeUpdate};
use crate::errors::ServerError;

/// Operations for Node model
pub struct NodeOps;

impl NodeOps {
    /// List every node, ordered by id
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Node>, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let nodes = sqlx::query_as::<_, Node>("SELECT * FROM nodes ORDER BY id")
            .fetch_all(executor)
            .await
            .map_err(|e| {
                error!("Database error listing nodes: {}", e);
                ServerError::from(e)
            })?;

        Ok(nodes)
    }

    /// Find a node by ID
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Node>, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let node = sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                error!("Database error finding node by ID: {}", e);
                ServerError::from(e)
            })?;

        Ok(node)
    }

    /// Create a new node
    pub async fn create<'e, E>(executor: E, name: &str) -> Result<Node, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();

        let node = sqlx::query_as::<_, Node>(
            r#"
            INSERT INTO nodes (name, created_at, updated_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            error!("Database error creating node: {}", e);
            ServerError::from(e)
        })?;

        info!("Created node {} ({})", node.id, node.name);
        Ok(node)
    }

    /// Overwrite the provided fields; returns the number of rows touched
    pub async fn update<'e, E>(executor: E, id: i64, update: &NodeUpdate) -> Result<u64, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE nodes
            SET name = COALESCE(?, name), updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(update.name.as_deref())
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            error!("Database error updating node: {}", e);
            ServerError::from(e)
        })?;

        let rows = result.rows_affected();
        if rows == 0 {
            warn!("Update matched no node with id {}", id);
        } else {
            info!("Updated node {}", id);
        }
        Ok(rows)
    }

    /// Delete a node; its links go with it through the foreign key cascade
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM nodes WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                error!("Database error deleting node: {}", e);
                ServerError::from(e)
            })?;

        let rows = result.rows_affected();
        if rows == 0 {
            warn!("Delete matched no node with id {}", id);
        } else {
            info!("Deleted node {}", id);
        }
        Ok(rows)
    }
}

/// Operations for Link model
pub struct LinkOps;

impl LinkOps {
    /// List every link, ordered by id
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Link>, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let links = sqlx::query_as::<_, Link>("SELECT * FROM links ORDER BY id")
            .fetch_all(executor)
            .await
            .map_err(|e| {
                error!("Database error listing links: {}", e);
                ServerError::from(e)
            })?;

        Ok(links)
    }

    /// Find a link by ID
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Link>, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let link = sqlx::query_as::<_, Link>("SELECT * FROM links WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                error!("Database error finding link by ID: {}", e);
                ServerError::from(e)
            })?;

        Ok(link)
    }

    /// Links arriving at (`previous`) and leaving (`next`) a node
    pub async fn find_by_node<'e, E>(executor: E, node_id: i64) -> Result<NodeLinks, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let links = sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE from_id = ?1 OR to_id = ?1 ORDER BY id"
        )
        .bind(node_id)
        .fetch_all(executor)
        .await
        .map_err(|e| {
            error!("Database error finding links for node: {}", e);
            ServerError::from(e)
        })?;

        // A self-loop shows up in both lists
        let previous = links.iter().filter(|l| l.to_id == node_id).cloned().collect();
        let next = links.into_iter().filter(|l| l.from_id == node_id).collect();

        Ok(NodeLinks { previous, next })
    }

    /// Create a new link; the store rejects endpoints that are not existing nodes
    pub async fn create<'e, E>(executor: E, from_id: i64, to_id: i64) -> Result<Link, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();

        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (from_id, to_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#
        )
        .bind(from_id)
        .bind(to_id)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            error!("Database error creating link {} -> {}: {}", from_id, to_id, e);
            ServerError::from(e)
        })?;

        info!("Created link {} ({} -> {})", link.id, link.from_id, link.to_id);
        Ok(link)
    }

    /// Overwrite the provided endpoints; returns the number of rows touched
    pub async fn update<'e, E>(executor: E, id: i64, update: &LinkUpdate) -> Result<u64, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET from_id = COALESCE(?, from_id), to_id = COALESCE(?, to_id), updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(update.from_id)
        .bind(update.to_id)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            error!("Database error updating link: {}", e);
            ServerError::from(e)
        })?;

        let rows = result.rows_affected();
        if rows == 0 {
            warn!("Update matched no link with id {}", id);
        } else {
            info!("Updated link {}", id);
        }
        Ok(rows)
    }

    /// Delete a link
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, ServerError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                error!("Database error deleting link: {}", e);
                ServerError::from(e)
            })?;

        let rows = result.rows_affected();
        if rows == 0 {
            warn!("Delete matched no link with id {}", id);
        } else {
            info!("Deleted link {}", id);
        }
        Ok(rows)
    }
}
