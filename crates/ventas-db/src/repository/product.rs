//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Soft Deactivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Why Products Are Never Deleted                       │
//! │                                                                         │
//! │  deactivate(id) ──► UPDATE products SET is_active = 0                  │
//! │                                                                         │
//! │  • Historical order lines keep referencing the product                 │
//! │  • Active-only finders stop offering it for new sales                  │
//! │  • find_all / find_by_id still see it (reports, reactivation)          │
//! │                                                                         │
//! │  Every active-only query appends the same `is_active = 1` predicate.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::engine::{Entity, Repository, SqlParam};
use ventas_core::Product;

impl Entity for Product {
    const TABLE: &'static str = "products";
    const ID_COLUMN: &'static str = "id";

    const INSERT_SQL: &'static str = "INSERT INTO products \
         (name, price_cents, is_active) \
         VALUES (?, ?, ?)";

    const UPDATE_SQL: &'static str = "UPDATE products SET \
         name = ?, price_cents = ?, is_active = ? \
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
            self.price_cents.into(),
            self.is_active.into(),
        ]
    }

    fn update_params(&self) -> Vec<SqlParam> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let active = repo.find_active().await?;
/// repo.deactivate(old_product_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    repo: Repository<Product>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository {
            repo: Repository::new(pool),
        }
    }

    /// Gets a product by its ID, active or not. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        self.repo.find_by_id(id).await
    }

    /// Lists every product, deactivated ones included.
    pub async fn find_all(&self) -> DbResult<Vec<Product>> {
        self.repo.find_all().await
    }

    /// Inserts a product and returns it with the generated identity.
    pub async fn save(&self, product: Product) -> DbResult<Product> {
        self.repo.save(product).await
    }

    /// Full-row update by identity.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        self.repo.update(product).await
    }

    /// Lists products currently offered for sale, ordered by name.
    pub async fn find_active(&self) -> DbResult<Vec<Product>> {
        self.repo
            .query(
                "SELECT * FROM products WHERE is_active = 1 ORDER BY name",
                &[],
            )
            .await
    }

    /// Partial-name search restricted to active products.
    pub async fn search_active_by_name(&self, name: &str) -> DbResult<Vec<Product>> {
        let pattern = format!("%{}%", name.trim());

        self.repo
            .query(
                "SELECT * FROM products \
                 WHERE is_active = 1 AND name LIKE ? \
                 ORDER BY name",
                &[pattern.into()],
            )
            .await
    }

    /// Soft-deletes a product by clearing its active flag.
    ///
    /// ## Why Soft Delete?
    /// Historical order lines still reference this product, and it can be
    /// reactivated by a later update.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no product with that id
    pub async fn deactivate(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deactivating product");

        let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(self.repo.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("products", id.to_string()));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
                .fetch_one(self.repo.pool())
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fresh_db;
    use ventas_core::Money;

    #[tokio::test]
    async fn test_new_products_default_active() {
        let db = fresh_db().await;
        let repo = db.products();

        let saved = repo
            .save(Product::new("Arroz 1kg", Money::from_cents(250)))
            .await
            .unwrap();

        assert!(saved.is_active);
        assert_eq!(repo.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deactivation_hides_from_active_finders_only() {
        let db = fresh_db().await;
        let repo = db.products();

        let rice = repo
            .save(Product::new("Arroz 1kg", Money::from_cents(250)))
            .await
            .unwrap();
        repo.save(Product::new("Frijol 1kg", Money::from_cents(380)))
            .await
            .unwrap();

        repo.deactivate(rice.id).await.unwrap();

        // Gone from active-only finders...
        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Frijol 1kg");
        assert!(repo.search_active_by_name("arroz").await.unwrap().is_empty());

        // ...but still visible to the unrestricted paths.
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
        let found = repo.find_by_id(rice.id).await.unwrap().unwrap();
        assert!(!found.is_active);
    }

    #[tokio::test]
    async fn test_deactivate_missing_product_is_not_found() {
        let db = fresh_db().await;
        let err = db.products().deactivate(9999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_active_by_name() {
        let db = fresh_db().await;
        let repo = db.products();

        repo.save(Product::new("Arroz 1kg", Money::from_cents(250)))
            .await
            .unwrap();
        repo.save(Product::new("Arroz 5kg", Money::from_cents(1100)))
            .await
            .unwrap();
        repo.save(Product::new("Frijol 1kg", Money::from_cents(380)))
            .await
            .unwrap();

        let hits = repo.search_active_by_name("arroz").await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_reactivation_via_update() {
        let db = fresh_db().await;
        let repo = db.products();

        let saved = repo
            .save(Product::new("Arroz 1kg", Money::from_cents(250)))
            .await
            .unwrap();
        repo.deactivate(saved.id).await.unwrap();

        let mut revived = repo.find_by_id(saved.id).await.unwrap().unwrap();
        revived.is_active = true;
        repo.update(&revived).await.unwrap();

        assert_eq!(repo.find_active().await.unwrap().len(), 1);
    }
}
