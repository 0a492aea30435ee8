//! # Repository Module
//!
//! Repository implementations for Ventas.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The generic engine owns CRUD; concrete repositories own identity.     │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.clients().find_by_national_id("V-123")                     │
//! │       ▼                                                                 │
//! │  ClientRepository ── supplies Entity strategy + finders                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository<Client> ── generic engine (engine.rs)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! │                                                                         │
//! │  Finders never introduce new binding logic; they hand SQL text and     │
//! │  SqlParam lists to the engine's query/query_one escape hatches.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CompanyRepository`](company::CompanyRepository) - companies (tenant scope)
//! - [`ClientRepository`](client::ClientRepository) - client roster
//! - [`WorkerRepository`](worker::WorkerRepository) - workers and roles
//! - [`ProductRepository`](product::ProductRepository) - catalog, soft delete
//! - [`OrderRepository`](order::OrderRepository) - sale headers, searches
//! - [`OrderLineRepository`](order_line::OrderLineRepository) - lines, top sellers

pub mod client;
pub mod company;
pub mod engine;
pub mod order;
pub mod order_line;
pub mod product;
pub mod worker;
