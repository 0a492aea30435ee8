//! # ventas-db: Database Layer for Ventas
//!
//! This crate provides database access for the Ventas sales manager.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ventas Data Flow                                │
//! │                                                                         │
//! │  Application code (register a sale, search history)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ventas-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (order.rs...) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ OrderRepo     │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ ProductRepo   │    │              │  │   │
//! │  │   │ Management    │    │ ClientRepo... │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                        ┌───────▼───────┐                      │   │
//! │  │   ┌───────────────┐    │  Repository<T>│                      │   │
//! │  │   │ QueryBuilder  │───►│   (engine.rs) │                      │   │
//! │  │   │  (query.rs)   │    │ generic CRUD  │                      │   │
//! │  │   └───────────────┘    └───────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                      ./ventas.db                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`query`] - Dynamic filter-to-SQL builder for searches and rankings
//! - [`repository`] - Generic CRUD engine and the concrete repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ventas_db::{Database, DbConfig, SalesFilter};
//!
//! let db = Database::new(DbConfig::new("./ventas.db")).await?;
//!
//! let active = db.products().find_active().await?;
//! let january = db
//!     .orders()
//!     .search(&SalesFilter {
//!         company_id,
//!         date_from: Some(from),
//!         date_to: Some(to),
//!         ..SalesFilter::default()
//!     })
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repository;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use query::{QueryBuilder, SalesFilter, TopSellersFilter};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::company::CompanyRepository;
pub use repository::engine::{Entity, Repository, SqlParam};
pub use repository::order::OrderRepository;
pub use repository::order_line::OrderLineRepository;
pub use repository::product::ProductRepository;
pub use repository::worker::WorkerRepository;
