//! # Order Line Repository
//!
//! Database operations for order lines and the top-seller aggregation.
//!
//! ## Line Uniqueness
//! A product appears at most once per order: UNIQUE(order_id, product_id)
//! is the authority. The flow upstream checks
//! [`OrderLineRepository::find_by_order_and_product`] first and updates the
//! existing line's quantity instead of inserting a duplicate; a direct
//! duplicate insert fails with a constraint violation.
//!
//! ## Top Sellers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Top-Seller Aggregation                                 │
//! │                                                                         │
//! │  order_lines ──JOIN──► orders (company scope, date range)              │
//! │       │                                                                 │
//! │       └──────JOIN──► products (name, unit price)                       │
//! │                                                                         │
//! │  GROUP BY product:  SUM(quantity), SUM(quantity × price_cents)         │
//! │  ORDER BY units DESC, optional LIMIT                                   │
//! │                                                                         │
//! │  A plain grouped aggregate recomputed per call; at this scale there    │
//! │  is nothing to maintain incrementally.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::query::{QueryBuilder, TopSellersFilter};
use crate::repository::engine::{bind_param_as, Entity, Repository, SqlParam};
use ventas_core::{OrderLine, ProductSales};

impl Entity for OrderLine {
    const TABLE: &'static str = "order_lines";
    const ID_COLUMN: &'static str = "id";

    const INSERT_SQL: &'static str = "INSERT INTO order_lines \
         (order_id, product_id, quantity) \
         VALUES (?, ?, ?)";

    const UPDATE_SQL: &'static str = "UPDATE order_lines SET \
         order_id = ?, product_id = ?, quantity = ? \
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
            self.order_id.into(),
            self.product_id.into(),
            self.quantity.into(),
        ]
    }

    fn update_params(&self) -> Vec<SqlParam> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

/// Base SELECT for the top-seller ranking.
const TOP_SELLERS_BASE: &str = "SELECT p.id AS product_id, p.name AS name, \
     SUM(l.quantity) AS units_sold, \
     SUM(l.quantity * p.price_cents) AS revenue_cents \
     FROM order_lines l \
     JOIN orders o ON o.id = l.order_id \
     JOIN products p ON p.id = l.product_id";

/// Repository for order line database operations.
#[derive(Debug, Clone)]
pub struct OrderLineRepository {
    repo: Repository<OrderLine>,
}

impl OrderLineRepository {
    /// Creates a new OrderLineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderLineRepository {
            repo: Repository::new(pool),
        }
    }

    /// Gets a line by its ID. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<OrderLine>> {
        self.repo.find_by_id(id).await
    }

    /// Lists every line (diagnostics; prefer the per-order finder).
    pub async fn find_all(&self) -> DbResult<Vec<OrderLine>> {
        self.repo.find_all().await
    }

    /// Inserts a line and returns it with the generated identity.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the order already carries this product
    /// * `DbError::ForeignKeyViolation` - order or product does not exist
    pub async fn save(&self, line: OrderLine) -> DbResult<OrderLine> {
        self.repo.save(line).await
    }

    /// Full-row update by identity (quantity edits go through here).
    pub async fn update(&self, line: &OrderLine) -> DbResult<()> {
        self.repo.update(line).await
    }

    /// Deletes a line by identity; missing ids are not an error.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.repo.delete(id).await
    }

    /// Lists the lines of one order.
    pub async fn find_by_order(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        self.repo
            .query(
                "SELECT * FROM order_lines WHERE order_id = ? ORDER BY id",
                &[order_id.into()],
            )
            .await
    }

    /// Finds the line an order carries for one product, if any.
    ///
    /// The add-product flow calls this before inserting so repeated
    /// selection updates the existing line instead of duplicating it.
    pub async fn find_by_order_and_product(
        &self,
        order_id: i64,
        product_id: i64,
    ) -> DbResult<Option<OrderLine>> {
        self.repo
            .query_one(
                "SELECT * FROM order_lines WHERE order_id = ? AND product_id = ?",
                &[order_id.into(), product_id.into()],
            )
            .await
    }

    /// Bulk-clears every line of one order.
    ///
    /// There is no cascade from orders; editing flows clear and re-add
    /// lines explicitly. Clearing an order with no lines is not an error.
    pub async fn delete_by_order(&self, order_id: i64) -> DbResult<u64> {
        debug!(order_id = order_id, "Bulk-clearing order lines");

        let result = sqlx::query("DELETE FROM order_lines WHERE order_id = ?")
            .bind(order_id)
            .execute(self.repo.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Top-selling-product ranking for one company.
    ///
    /// Per product: SUM(quantity) and SUM(quantity × unit price) across
    /// all matching lines, ordered by units sold descending. The optional
    /// date bounds are inclusive; the optional limit truncates the
    /// ranking and binds as the final parameter.
    pub async fn top_sellers(&self, filter: &TopSellersFilter) -> DbResult<Vec<ProductSales>> {
        debug!(company_id = filter.company_id, "Ranking top sellers");

        let (sql, params) = QueryBuilder::new(TOP_SELLERS_BASE, "o.company_id", filter.company_id)
            .and_date_from("o.order_date", filter.date_from)
            .and_date_to("o.order_date", filter.date_to)
            .group_by("p.id, p.name")
            .order_by("units_sold DESC, p.id")
            .limit(filter.limit)
            .build();

        let mut query = sqlx::query_as::<_, ProductSales>(&sql);
        for param in &params {
            query = bind_param_as(query, param);
        }

        let rows = query.fetch_all(self.repo.pool()).await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::testutil::{date, fresh_db, Fixture};
    use ventas_core::Order;

    async fn seed_order(db: &crate::pool::Database, fx: &Fixture, day: u32) -> Order {
        db.orders()
            .save(Order::new(
                fx.worker.id,
                fx.client.id,
                fx.company.id,
                date(2024, 1, day),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_product_on_order_rejected() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let order = seed_order(&db, &fx, 10).await;

        let repo = db.order_lines();
        repo.save(OrderLine::new(order.id, fx.product.id, 2))
            .await
            .unwrap();

        let err = repo
            .save(OrderLine::new(order.id, fx.product.id, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // The same product on a different order is fine.
        let other = seed_order(&db, &fx, 11).await;
        repo.save(OrderLine::new(other.id, fx.product.id, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_repeated_selection_updates_quantity() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let order = seed_order(&db, &fx, 10).await;

        let repo = db.order_lines();
        repo.save(OrderLine::new(order.id, fx.product.id, 2))
            .await
            .unwrap();

        // The flow upstream: look up the existing line, bump its quantity.
        let mut line = repo
            .find_by_order_and_product(order.id, fx.product.id)
            .await
            .unwrap()
            .unwrap();
        line.quantity += 3;
        repo.update(&line).await.unwrap();

        let lines = repo.find_by_order(order.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_delete_by_order_clears_only_that_order() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let first = seed_order(&db, &fx, 10).await;
        let second = seed_order(&db, &fx, 11).await;

        let repo = db.order_lines();
        repo.save(OrderLine::new(first.id, fx.product.id, 2))
            .await
            .unwrap();
        repo.save(OrderLine::new(first.id, fx.other_product.id, 1))
            .await
            .unwrap();
        repo.save(OrderLine::new(second.id, fx.product.id, 4))
            .await
            .unwrap();

        let removed = repo.delete_by_order(first.id).await.unwrap();
        assert_eq!(removed, 2);

        assert!(repo.find_by_order(first.id).await.unwrap().is_empty());
        assert_eq!(repo.find_by_order(second.id).await.unwrap().len(), 1);

        // The order header itself is untouched (no cascade either way).
        assert!(db.orders().find_by_id(first.id).await.unwrap().is_some());

        // Clearing again is a no-op, not an error.
        assert_eq!(repo.delete_by_order(first.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deactivated_product_keeps_historical_lines() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let order = seed_order(&db, &fx, 10).await;

        db.order_lines()
            .save(OrderLine::new(order.id, fx.product.id, 2))
            .await
            .unwrap();

        db.products().deactivate(fx.product.id).await.unwrap();

        let lines = db.order_lines().find_by_order(order.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, fx.product.id);
    }

    #[tokio::test]
    async fn test_top_sellers_ranking_and_revenue() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let first = seed_order(&db, &fx, 10).await;
        let second = seed_order(&db, &fx, 15).await;

        // product: 250 cents, other_product: 380 cents (see Fixture).
        let repo = db.order_lines();
        repo.save(OrderLine::new(first.id, fx.product.id, 2))
            .await
            .unwrap();
        repo.save(OrderLine::new(second.id, fx.product.id, 3))
            .await
            .unwrap();
        repo.save(OrderLine::new(first.id, fx.other_product.id, 4))
            .await
            .unwrap();

        let ranking = repo
            .top_sellers(&TopSellersFilter::for_company(fx.company.id))
            .await
            .unwrap();

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].product_id, fx.product.id);
        assert_eq!(ranking[0].units_sold, 5);
        assert_eq!(ranking[0].revenue_cents, 5 * 250);
        assert_eq!(ranking[1].product_id, fx.other_product.id);
        assert_eq!(ranking[1].units_sold, 4);
        assert_eq!(ranking[1].revenue_cents, 4 * 380);
    }

    #[tokio::test]
    async fn test_top_sellers_limit_truncates() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let order = seed_order(&db, &fx, 10).await;

        let repo = db.order_lines();
        repo.save(OrderLine::new(order.id, fx.product.id, 5))
            .await
            .unwrap();
        repo.save(OrderLine::new(order.id, fx.other_product.id, 1))
            .await
            .unwrap();

        let filter = TopSellersFilter {
            company_id: fx.company.id,
            limit: Some(1),
            ..TopSellersFilter::default()
        };
        let ranking = repo.top_sellers(&filter).await.unwrap();

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].product_id, fx.product.id);
    }

    #[tokio::test]
    async fn test_top_sellers_date_scoped() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;
        let january = seed_order(&db, &fx, 10).await;
        let later = db
            .orders()
            .save(Order::new(
                fx.worker.id,
                fx.client.id,
                fx.company.id,
                date(2024, 3, 1),
            ))
            .await
            .unwrap();

        let repo = db.order_lines();
        repo.save(OrderLine::new(january.id, fx.product.id, 2))
            .await
            .unwrap();
        repo.save(OrderLine::new(later.id, fx.product.id, 7))
            .await
            .unwrap();

        let filter = TopSellersFilter {
            company_id: fx.company.id,
            date_from: Some(date(2024, 1, 1)),
            date_to: Some(date(2024, 1, 31)),
            ..TopSellersFilter::default()
        };
        let ranking = repo.top_sellers(&filter).await.unwrap();

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].units_sold, 2);
    }

    #[tokio::test]
    async fn test_top_sellers_empty_when_no_sales() {
        let db = fresh_db().await;
        let fx = Fixture::seed(&db).await;

        let ranking = db
            .order_lines()
            .top_sellers(&TopSellersFilter::for_company(fx.company.id))
            .await
            .unwrap();
        assert!(ranking.is_empty());
    }
}
