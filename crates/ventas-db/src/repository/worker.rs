//! # Worker Repository
//!
//! Database operations for workers.
//!
//! ## Key Operations
//! - Generic CRUD through the engine
//! - Natural-key lookup by national id (unique)
//! - Role-existence check backing the one-time owner bootstrap upstream

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::engine::{Entity, Repository, SqlParam};
use ventas_core::{Role, Worker};

impl Entity for Worker {
    const TABLE: &'static str = "workers";
    const ID_COLUMN: &'static str = "id";

    const INSERT_SQL: &'static str = "INSERT INTO workers \
         (full_name, national_id, role, font_spec, background_color, secret) \
         VALUES (?, ?, ?, ?, ?, ?)";

    const UPDATE_SQL: &'static str = "UPDATE workers SET \
         full_name = ?, national_id = ?, role = ?, font_spec = ?, \
         background_color = ?, secret = ? \
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
            self.role.into(),
            self.font_spec.clone().into(),
            self.background_color.clone().into(),
            self.secret.clone().into(),
        ]
    }

    fn update_params(&self) -> Vec<SqlParam> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

/// Repository for worker database operations.
#[derive(Debug, Clone)]
pub struct WorkerRepository {
    repo: Repository<Worker>,
}

impl WorkerRepository {
    /// Creates a new WorkerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WorkerRepository {
            repo: Repository::new(pool),
        }
    }

    /// Gets a worker by its ID. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Worker>> {
        self.repo.find_by_id(id).await
    }

    /// Lists every worker.
    pub async fn find_all(&self) -> DbResult<Vec<Worker>> {
        self.repo.find_all().await
    }

    /// Inserts a worker and returns it with the generated identity.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - national id already registered
    pub async fn save(&self, worker: Worker) -> DbResult<Worker> {
        self.repo.save(worker).await
    }

    /// Full-row update by identity (UI preferences included).
    pub async fn update(&self, worker: &Worker) -> DbResult<()> {
        self.repo.update(worker).await
    }

    /// Deletes a worker by identity; missing ids are not an error.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.repo.delete(id).await
    }

    /// Looks up a worker by national id (the natural key; used at login).
    pub async fn find_by_national_id(&self, national_id: &str) -> DbResult<Option<Worker>> {
        debug!(national_id = %national_id, "Looking up worker by national id");

        self.repo
            .query_one(
                "SELECT * FROM workers WHERE national_id = ?",
                &[national_id.into()],
            )
            .await
    }

    /// Partial-name search, ordered by name.
    pub async fn search_by_name(&self, name: &str) -> DbResult<Vec<Worker>> {
        let pattern = format!("%{}%", name.trim());

        self.repo
            .query(
                "SELECT * FROM workers WHERE full_name LIKE ? ORDER BY full_name",
                &[pattern.into()],
            )
            .await
    }

    /// Whether any worker holds the owner role.
    ///
    /// Bootstrap logic upstream calls this once at startup to decide
    /// whether to launch the create-owner flow.
    pub async fn owner_exists(&self) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workers WHERE role = ?")
            .bind(Role::Owner.as_str())
            .fetch_one(self.repo.pool())
            .await?;

        Ok(count > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::testutil::fresh_db;

    #[tokio::test]
    async fn test_round_trip_preserves_role_and_prefs() {
        let db = fresh_db().await;
        let repo = db.workers();

        let mut worker = Worker::new("Luis Paz", "W-100", Role::Supervisor, "s3cr3t");
        worker.font_spec = Some("Sans,Plain,12".to_string());
        worker.background_color = Some("#aabbcc".to_string());

        let saved = repo.save(worker.clone()).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(found.role, Role::Supervisor);
        assert_eq!(found.font_spec, worker.font_spec);
        assert_eq!(found.background_color, worker.background_color);
        assert_eq!(found.secret, "s3cr3t");
    }

    #[tokio::test]
    async fn test_duplicate_national_id_rejected() {
        let db = fresh_db().await;
        let repo = db.workers();

        repo.save(Worker::new("Luis Paz", "W-100", Role::Staff, "x"))
            .await
            .unwrap();

        let err = repo
            .save(Worker::new("Otro Paz", "W-100", Role::Staff, "y"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_owner_exists_flips_on_first_owner() {
        let db = fresh_db().await;
        let repo = db.workers();

        assert!(!repo.owner_exists().await.unwrap());

        repo.save(Worker::new("Luis Paz", "W-100", Role::Staff, "x"))
            .await
            .unwrap();
        assert!(!repo.owner_exists().await.unwrap());

        repo.save(Worker::new("Dora Sol", "W-200", Role::Owner, "y"))
            .await
            .unwrap();
        assert!(repo.owner_exists().await.unwrap());
    }
}
