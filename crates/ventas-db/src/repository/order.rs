//! # Order Repository
//!
//! Database operations for sale headers.
//!
//! ## Multi-Step Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               create_with_lines: One Transaction                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT order header ──► generated id                                │
//! │    INSERT line 1 (order_id = generated id)                             │
//! │    INSERT line 2 ...                                                   │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT rolls the whole sequence back: the store    │
//! │  never holds an order with a partial set of lines.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sales Search
//! All advanced searches are scoped to one company id and built through
//! the dynamic query builder: optional exact order id, partial client and
//! worker names, inclusive date bounds. Results come back most recent
//! first.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::query::{QueryBuilder, SalesFilter};
use crate::repository::engine::{Entity, Repository, SqlParam};
use ventas_core::{Order, OrderLine};

impl Entity for Order {
    const TABLE: &'static str = "orders";
    const ID_COLUMN: &'static str = "id";

    const INSERT_SQL: &'static str = "INSERT INTO orders \
         (worker_id, client_id, company_id, order_date) \
         VALUES (?, ?, ?, ?)";

    const UPDATE_SQL: &'static str = "UPDATE orders SET \
         worker_id = ?, client_id = ?, company_id = ?, order_date = ? \
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
            self.worker_id.into(),
            self.client_id.into(),
            self.company_id.into(),
            self.date.into(),
        ]
    }

    fn update_params(&self) -> Vec<SqlParam> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

/// Base SELECT for sales searches; the joins exist so the optional name
/// predicates can reach client and worker names. Only order columns are
/// projected, so rows map through the one Order row mapping.
const SEARCH_BASE: &str = "SELECT o.id, o.worker_id, o.client_id, o.company_id, o.order_date \
     FROM orders o \
     JOIN clients c ON c.id = o.client_id \
     JOIN workers w ON w.id = o.worker_id";

/// Repository for order (sale header) database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    repo: Repository<Order>,
    lines: Repository<OrderLine>,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository {
            repo: Repository::new(pool.clone()),
            lines: Repository::new(pool),
        }
    }

    /// Gets an order by its ID. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        self.repo.find_by_id(id).await
    }

    /// Lists every order.
    pub async fn find_all(&self) -> DbResult<Vec<Order>> {
        self.repo.find_all().await
    }

    /// Inserts a bare order header and returns it with the generated
    /// identity. Prefer [`OrderRepository::create_with_lines`] when the
    /// lines are known up front.
    pub async fn save(&self, order: Order) -> DbResult<Order> {
        self.repo.save(order).await
    }

    /// Full-row update by identity.
    pub async fn update(&self, order: &Order) -> DbResult<()> {
        self.repo.update(order).await
    }

    /// Deletes an order header by identity; missing ids are not an error.
    ///
    /// Lines are NOT cascaded; clear them explicitly via
    /// [`super::order_line::OrderLineRepository::delete_by_order`] first.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.repo.delete(id).await
    }

    /// Inserts an order and all of its lines in one transaction.
    ///
    /// The generated order identity is propagated into every line before
    /// it is inserted; callers may therefore pass lines built against the
    /// unsaved header. Any failure (constraint violation, connectivity)
    /// rolls the entire sequence back.
    pub async fn create_with_lines(
        &self,
        order: Order,
        lines: Vec<OrderLine>,
    ) -> DbResult<(Order, Vec<OrderLine>)> {
        debug!(line_count = lines.len(), "Creating order with lines");

        let mut tx = self
            .repo
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let order = self.repo.save_with(&mut *tx, order).await?;

        let mut saved_lines = Vec::with_capacity(lines.len());
        for mut line in lines {
            line.order_id = order.id;
            saved_lines.push(self.lines.save_with(&mut *tx, line).await?);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok((order, saved_lines))
    }

    /// Lists a client's orders, most recent first.
    pub async fn find_by_client(&self, client_id: i64) -> DbResult<Vec<Order>> {
        self.repo
            .query(
                "SELECT * FROM orders WHERE client_id = ? ORDER BY order_date DESC, id DESC",
                &[client_id.into()],
            )
            .await
    }

    /// Lists a worker's orders, most recent first.
    pub async fn find_by_worker(&self, worker_id: i64) -> DbResult<Vec<Order>> {
        self.repo
            .query(
                "SELECT * FROM orders WHERE worker_id = ? ORDER BY order_date DESC, id DESC",
                &[worker_id.into()],
            )
            .await
    }

    /// Multi-criteria sales search.
    ///
    /// Optional filters compose with AND; with none supplied every order
    /// for the filter's company comes back. Date bounds are inclusive.
    /// Ordered by date descending (most recent first).
    pub async fn search(&self, filter: &SalesFilter) -> DbResult<Vec<Order>> {
        debug!(company_id = filter.company_id, "Searching sales");

        let (sql, params) = QueryBuilder::new(SEARCH_BASE, "o.company_id", filter.company_id)
            .and_eq("o.id", filter.order_id)
            .and_like("c.full_name", filter.client_name.as_deref())
            .and_like("w.full_name", filter.worker_name.as_deref())
            .and_date_from("o.order_date", filter.date_from)
            .and_date_to("o.order_date", filter.date_to)
            .order_by("o.order_date DESC, o.id DESC")
            .build();

        self.repo.query(&sql, &params).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
