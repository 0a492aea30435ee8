//! # Client Repository
//!
//! Database operations for the client roster.
//!
//! ## Key Operations
//! - Generic CRUD through the engine
//! - Natural-key lookup by national id (unique)
//! - Partial-name search (LIKE, case-insensitive for ASCII)

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::engine::{Entity, Repository, SqlParam};
use ventas_core::Client;

impl Entity for Client {
    const TABLE: &'static str = "clients";
    const ID_COLUMN: &'static str = "id";

    const INSERT_SQL: &'static str = "INSERT INTO clients \
         (full_name, national_id, phone, email) \
         VALUES (?, ?, ?, ?)";

    const UPDATE_SQL: &'static str = "UPDATE clients SET \
         full_name = ?, national_id = ?, phone = ?, email = ? \
         WHERE id = ?";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    fn insert_params(&self) -> Vec<SqlParam> {
        vec![
            self.full_name.clone().into(),
            self.national_id.clone().into(),
            self.phone.clone().into(),
            self.email.clone().into(),
        ]
    }

    fn update_params(&self) -> Vec<SqlParam> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

/// Repository for client database operations.
///
/// Callers that want to reject a duplicate national id with a friendly
/// message call [`ClientRepository::find_by_national_id`] first; that check
/// is advisory only and the UNIQUE constraint remains the authority.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    repo: Repository<Client>,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository {
            repo: Repository::new(pool),
        }
    }

    /// Gets a client by its ID. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        self.repo.find_by_id(id).await
    }

    /// Lists every client.
    pub async fn find_all(&self) -> DbResult<Vec<Client>> {
        self.repo.find_all().await
    }

    /// Inserts a client and returns it with the generated identity.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - national id already on the roster
    pub async fn save(&self, client: Client) -> DbResult<Client> {
        self.repo.save(client).await
    }

    /// Full-row update by identity.
    pub async fn update(&self, client: &Client) -> DbResult<()> {
        self.repo.update(client).await
    }

    /// Deletes a client by identity; missing ids are not an error.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.repo.delete(id).await
    }

    /// Looks up a client by national id (the natural key).
    pub async fn find_by_national_id(&self, national_id: &str) -> DbResult<Option<Client>> {
        debug!(national_id = %national_id, "Looking up client by national id");

        self.repo
            .query_one(
                "SELECT * FROM clients WHERE national_id = ?",
                &[national_id.into()],
            )
            .await
    }

    /// Partial-name search, ordered by name.
    pub async fn search_by_name(&self, name: &str) -> DbResult<Vec<Client>> {
        let pattern = format!("%{}%", name.trim());

        self.repo
            .query(
                "SELECT * FROM clients WHERE full_name LIKE ? ORDER BY full_name",
                &[pattern.into()],
            )
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
