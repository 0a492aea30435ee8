//! # Validation Module
//!
//! Input validation utilities for Ventas.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (forms, dialogs)                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (national_id, (name, tax_id), (order,product)) │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ventas_core::validation::{validate_national_id, validate_quantity};
//!
//! validate_national_id("V-12345678").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Canonical sortable date format used everywhere dates are persisted.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (company, client, worker, product).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use ventas_core::validation::validate_name;
///
/// assert!(validate_name("Ana Ruiz").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a national identity document number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 30 characters
/// - Only letters, digits and hyphens
pub fn validate_national_id(national_id: &str) -> ValidationResult<()> {
    let national_id = national_id.trim();

    if national_id.is_empty() {
        return Err(ValidationError::Required {
            field: "national_id".to_string(),
        });
    }

    if national_id.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "national_id".to_string(),
            max: 30,
        });
    }

    if !national_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "national_id".to_string(),
            reason: "must contain only letters, numbers and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a company fiscal identifier.
///
/// Same character rules as national ids; companies are identified by the
/// (name, tax_id) pair.
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    let tax_id = tax_id.trim();

    if tax_id.is_empty() {
        return Err(ValidationError::Required {
            field: "tax_id".to_string(),
        });
    }

    if tax_id.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "tax_id".to_string(),
            max: 30,
        });
    }

    if !tax_id.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "tax_id".to_string(),
            reason: "must contain only letters, numbers and hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (9999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use ventas_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a date in the canonical sortable form (YYYY-MM-DD).
///
/// The persistence layer stores dates as this text so lexicographic and
/// chronological ordering coincide; anything upstream hands us must parse.
///
/// ## Example
/// ```rust
/// use ventas_core::validation::validate_date;
///
/// assert!(validate_date("2024-01-10").is_ok());
/// assert!(validate_date("10/01/2024").is_err());
/// ```
pub fn validate_date(date: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "must be YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
