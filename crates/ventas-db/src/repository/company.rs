//! # Company Repository
//!
//! Database operations for companies, the multi-tenancy boundary.
//!
//! ## Key Operations
//! - Generic CRUD through the engine
//! - Natural-key lookup by (name, tax_id)
//! - Most-recent row (default company when none is explicitly selected)

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::engine::{Entity, Repository, SqlParam};
use ventas_core::Company;

impl Entity for Company {
    const TABLE: &'static str = "companies";
    const ID_COLUMN: &'static str = "id";

    const INSERT_SQL: &'static str = "INSERT INTO companies \
         (name, tax_id, email, location, logo_path) \
         VALUES (?, ?, ?, ?, ?)";

    const UPDATE_SQL: &'static str = "UPDATE companies SET \
         name = ?, tax_id = ?, email = ?, location = ?, logo_path = ? \
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
            self.name.clone().into(),
            self.tax_id.clone().into(),
            self.email.clone().into(),
            self.location.clone().into(),
            self.logo_path.clone().into(),
        ]
    }

    fn update_params(&self) -> Vec<SqlParam> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

/// Repository for company database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CompanyRepository::new(pool);
/// let company = repo.save(Company::new("Abarrotes La Luz", "ALZ-900101")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    repo: Repository<Company>,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CompanyRepository {
            repo: Repository::new(pool),
        }
    }

    /// Gets a company by its ID. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Company>> {
        self.repo.find_by_id(id).await
    }

    /// Lists every company.
    pub async fn find_all(&self) -> DbResult<Vec<Company>> {
        self.repo.find_all().await
    }

    /// Inserts a company and returns it with the generated identity.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - (name, tax_id) pair already exists
    pub async fn save(&self, company: Company) -> DbResult<Company> {
        self.repo.save(company).await
    }

    /// Full-row update by identity.
    pub async fn update(&self, company: &Company) -> DbResult<()> {
        self.repo.update(company).await
    }

    /// Deletes a company by identity; missing ids are not an error.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.repo.delete(id).await
    }

    /// Looks up a company by its natural key, the (name, tax_id) pair.
    pub async fn find_by_name_and_tax_id(
        &self,
        name: &str,
        tax_id: &str,
    ) -> DbResult<Option<Company>> {
        debug!(name = %name, tax_id = %tax_id, "Looking up company by natural key");

        self.repo
            .query_one(
                "SELECT * FROM companies WHERE name = ? AND tax_id = ?",
                &[name.into(), tax_id.into()],
            )
            .await
    }

    /// Returns the most recently created company.
    ///
    /// Used to pick a default company when none is explicitly selected.
    pub async fn find_latest(&self) -> DbResult<Option<Company>> {
        self.repo
            .query_one("SELECT * FROM companies ORDER BY id DESC LIMIT 1", &[])
            .await
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
    async fn test_round_trip() {
        let db = fresh_db().await;
        let repo = db.companies();

        let mut company = Company::new("Abarrotes La Luz", "ALZ-900101");
        company.email = Some("contacto@laluz.example".to_string());

        let saved = repo.save(company.clone()).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(found.name, company.name);
        assert_eq!(found.tax_id, company.tax_id);
        assert_eq!(found.email, company.email);
        assert_eq!(found.logo_path, None);
    }

    #[tokio::test]
    async fn test_duplicate_name_tax_id_pair_rejected() {
        let db = fresh_db().await;
        let repo = db.companies();

        repo.save(Company::new("Abarrotes La Luz", "ALZ-900101"))
            .await
            .unwrap();

        let err = repo
            .save(Company::new("Abarrotes La Luz", "ALZ-900101"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Same name under a different tax id is a different company.
        repo.save(Company::new("Abarrotes La Luz", "ALZ-990202"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_by_natural_key() {
        let db = fresh_db().await;
        let repo = db.companies();

        let saved = repo
            .save(Company::new("Abarrotes La Luz", "ALZ-900101"))
            .await
            .unwrap();

        let found = repo
            .find_by_name_and_tax_id("Abarrotes La Luz", "ALZ-900101")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, saved.id);

        let missing = repo
            .find_by_name_and_tax_id("Abarrotes La Luz", "OTRO-1")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_latest_picks_newest() {
        let db = fresh_db().await;
        let repo = db.companies();

        assert!(repo.find_latest().await.unwrap().is_none());

        repo.save(Company::new("Primera", "T-1")).await.unwrap();
        let second = repo.save(Company::new("Segunda", "T-2")).await.unwrap();

        let latest = repo.find_latest().await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert_eq!(latest.name, "Segunda");
    }
}
