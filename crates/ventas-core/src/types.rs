//! # Domain Types
//!
//! Core domain entities for the Ventas system.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Entities                                 │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │ Company  │     │  Client  │     │  Worker  │                        │
//! │  │ name     │     │ national │     │ national │                        │
//! │  │ tax_id   │     │ _id (UQ) │     │ _id (UQ) │                        │
//! │  └────┬─────┘     └────┬─────┘     └────┬─────┘                        │
//! │       │ N:1            │ N:1            │ N:1                           │
//! │       └────────────────┼────────────────┘                               │
//! │                        ▼                                                │
//! │                  ┌──────────┐ 1:N  ┌───────────┐  N:1  ┌──────────┐    │
//! │                  │  Order   │─────►│ OrderLine │──────►│ Product  │    │
//! │                  │  date    │      │ quantity  │       │ price    │    │
//! │                  └──────────┘      │ UQ(order, │       │ active   │    │
//! │                                    │  product) │       └──────────┘    │
//! │                                    └───────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Every entity has an `id: i64` surrogate key assigned by the store on
//! insert. [`UNSAVED_ID`](crate::UNSAVED_ID) (-1) marks "not yet persisted".
//! Constructors always produce unsaved entities; the persistence layer
//! returns the saved copy with the real identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::UNSAVED_ID;

// =============================================================================
// Role
// =============================================================================

/// The role a worker holds within the business.
///
/// ## Closed Set
/// Exactly one of owner/supervisor/staff; persisted as lowercase text.
/// Bootstrap logic upstream guarantees at least one worker eventually holds
/// `Owner` (the repository exposes an existence check to support it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Business owner; full access.
    Owner,
    /// Supervisor; manages workers and reports.
    Supervisor,
    /// Regular staff; registers sales.
    Staff,
}

impl Role {
    /// Returns the persisted text form of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Supervisor => "supervisor",
            Role::Staff => "staff",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

// =============================================================================
// Company
// =============================================================================

/// A company the business sells on behalf of (the multi-tenancy boundary).
///
/// Every advanced search is scoped to one company id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Company {
    /// Surrogate key; [`UNSAVED_ID`](crate::UNSAVED_ID) until persisted.
    pub id: i64,

    /// Display name. (name, tax_id) is unique.
    pub name: String,

    /// Fiscal identifier. (name, tax_id) is unique.
    pub tax_id: String,

    /// Contact email, if known.
    pub email: Option<String>,

    /// Physical location, if known.
    pub location: Option<String>,

    /// Path to the company logo used on printed reports.
    pub logo_path: Option<String>,
}

impl Company {
    /// Creates an unsaved company with the required fields.
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Company {
            id: UNSAVED_ID,
            name: name.into(),
            tax_id: tax_id.into(),
            email: None,
            location: None,
            logo_path: None,
        }
    }

    /// Whether the store has assigned this entity an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client on the roster sales are registered against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    /// Surrogate key; [`UNSAVED_ID`](crate::UNSAVED_ID) until persisted.
    pub id: i64,

    /// Full display name.
    pub full_name: String,

    /// Natural key; unique across all clients.
    pub national_id: String,

    /// Contact phone, if known.
    pub phone: Option<String>,

    /// Contact email, if known.
    pub email: Option<String>,
}

impl Client {
    /// Creates an unsaved client with the required fields.
    pub fn new(full_name: impl Into<String>, national_id: impl Into<String>) -> Self {
        Client {
            id: UNSAVED_ID,
            full_name: full_name.into(),
            national_id: national_id.into(),
            phone: None,
            email: None,
        }
    }

    /// Whether the store has assigned this entity an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Worker
// =============================================================================

/// A worker who authenticates and registers sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Worker {
    /// Surrogate key; [`UNSAVED_ID`](crate::UNSAVED_ID) until persisted.
    pub id: i64,

    /// Full display name.
    pub full_name: String,

    /// Natural key; unique across all workers.
    pub national_id: String,

    /// Role within the business (closed set).
    pub role: Role,

    /// UI preference: font specification ("family,style,size").
    pub font_spec: Option<String>,

    /// UI preference: background color for this worker's session.
    pub background_color: Option<String>,

    /// Credential secret checked at login. Hashing happens upstream;
    /// the persistence layer stores it opaquely.
    pub secret: String,
}

impl Worker {
    /// Creates an unsaved worker with the required fields.
    pub fn new(
        full_name: impl Into<String>,
        national_id: impl Into<String>,
        role: Role,
        secret: impl Into<String>,
    ) -> Self {
        Worker {
            id: UNSAVED_ID,
            full_name: full_name.into(),
            national_id: national_id.into(),
            role,
            font_spec: None,
            background_color: None,
            secret: secret.into(),
        }
    }

    /// Whether the store has assigned this entity an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Products are never hard-deleted: deactivation removes them from
/// active-only finders while historical order lines keep referencing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Surrogate key; [`UNSAVED_ID`](crate::UNSAVED_ID) until persisted.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price in cents (non-negative).
    pub price_cents: i64,

    /// Whether the product is offered for sale (soft delete flag).
    pub is_active: bool,
}

impl Product {
    /// Creates an unsaved, active product.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Product {
            id: UNSAVED_ID,
            name: name.into(),
            price_cents: price.cents(),
            is_active: true,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the store has assigned this entity an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Order
// =============================================================================

/// A sale header referencing one worker, one client and one company.
///
/// No monetary total is stored; it is derived from the order's lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Surrogate key; [`UNSAVED_ID`](crate::UNSAVED_ID) until persisted.
    pub id: i64,

    /// Worker who registered the sale.
    pub worker_id: i64,

    /// Client the sale was made to.
    pub client_id: i64,

    /// Company the sale belongs to (multi-tenancy scope).
    pub company_id: i64,

    /// Calendar date of the sale (persisted as sortable YYYY-MM-DD text).
    #[cfg_attr(feature = "sqlx", sqlx(rename = "order_date"))]
    pub date: NaiveDate,
}

impl Order {
    /// Creates an unsaved order header.
    pub fn new(worker_id: i64, client_id: i64, company_id: i64, date: NaiveDate) -> Self {
        Order {
            id: UNSAVED_ID,
            worker_id,
            client_id,
            company_id,
            date,
        }
    }

    /// Whether the store has assigned this entity an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item on an order: one product, one positive quantity.
///
/// A product appears at most once per order (UNIQUE(order_id, product_id));
/// selecting the same product again must update the existing line upstream,
/// not insert a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    /// Surrogate key; [`UNSAVED_ID`](crate::UNSAVED_ID) until persisted.
    pub id: i64,

    /// Order this line belongs to.
    pub order_id: i64,

    /// Product sold on this line.
    pub product_id: i64,

    /// Units sold; always positive.
    pub quantity: i64,
}

impl OrderLine {
    /// Creates an unsaved order line.
    pub fn new(order_id: i64, product_id: i64, quantity: i64) -> Self {
        OrderLine {
            id: UNSAVED_ID,
            order_id,
            product_id,
            quantity,
        }
    }

    /// Whether the store has assigned this entity an identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

// =============================================================================
// Product Sales (aggregation row)
// =============================================================================

/// One row of the top-seller aggregation: per-product totals across all
/// matching order lines, joined through orders and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSales {
    /// Product the totals belong to.
    pub product_id: i64,

    /// Product name at query time.
    pub name: String,

    /// SUM(quantity) across matching lines.
    pub units_sold: i64,

    /// SUM(quantity × unit price) across matching lines, in cents.
    pub revenue_cents: i64,
}

impl ProductSales {
    /// Returns the revenue as a Money type.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
