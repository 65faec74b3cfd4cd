//! # Client Repository
//!
//! Persistence for clients. The sale core only ever checks existence; the
//! fuller profile belongs to the external CRUD layer.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::StoreResult;
use mostrador_core::Client;

const CLIENT_COLUMNS: &str = "id, name, email, is_active, created_at";

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Inserts a new client.
    pub async fn insert(&self, client: &Client) -> StoreResult<()> {
        debug!(id = %client.id, name = %client.name, "Inserting client");

        sqlx::query(
            "INSERT INTO clients (id, name, email, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(client.is_active)
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a client by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Client>> {
        let mut conn = self.pool.acquire().await?;
        fetch_client(&mut conn, id).await
    }

    /// Lists active clients, sorted by name.
    pub async fn list_active(&self, limit: u32) -> StoreResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE is_active = 1 ORDER BY name LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }
}

/// Fetches a client on an open connection (usable inside a transaction).
pub(crate) async fn fetch_client(
    conn: &mut SqliteConnection,
    id: &str,
) -> StoreResult<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(&format!(
        "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(client)
}
