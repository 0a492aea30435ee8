//! # ventas-core: Pure Domain Logic for Ventas
//!
//! This crate holds the domain model for the Ventas sales/inventory system.
//! Everything here is pure: no database, no network, no file access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas Data Flow                                 │
//! │                                                                         │
//! │  Presentation layer (forms, dialogs, reports)                          │
//! │       │ validated primitives (strings, integers, dates)                │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ ventas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Company  │  │   Money   │  │   rules   │                  │   │
//! │  │   │  Order …  │  │  (cents)  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ventas-db (SQLite repositories, query builder)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Company, Client, Worker, Product, Order, OrderLine)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use ventas_core::{Money, Product};
//!
//! let product = Product::new("Arroz 1kg", Money::from_cents(250));
//! assert!(!product.is_persisted()); // identity assigned by the store on insert
//! assert!(product.is_active);       // products start active
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ventas_core::Money` instead of
// `use ventas_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel identity for entities that have not been persisted yet.
///
/// ## Why a sentinel?
/// The store assigns every entity an integer surrogate key on insert.
/// Freshly constructed entities carry this value until `save` returns the
/// persisted copy with the real identity attached.
pub const UNSAVED_ID: i64 = -1;

/// Maximum quantity of a single product on one order line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_LINE_QUANTITY: i64 = 9999;
