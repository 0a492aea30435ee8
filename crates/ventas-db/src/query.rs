//! # Dynamic Query Builder
//!
//! Assembles a SQL statement and its ordered parameter list from a set of
//! optional filter values. Null/empty means "not applied".
//!
//! ## Why Text And Params Travel Together
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Incremental Predicate Assembly                            │
//! │                                                                         │
//! │  SalesFilter { company_id: 1, worker_name: "Luis",                     │
//! │                date_from: 2024-01-01, .. }                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QueryBuilder::new(base, "o.company_id", 1)                            │
//! │    .and_like("w.full_name", Some("Luis"))   ── "%Luis%"                │
//! │    .and_date_from("o.order_date", Some(..)) ── "2024-01-01"            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "… WHERE o.company_id = ? AND w.full_name LIKE ?                      │
//! │     AND o.order_date >= ?"                                             │
//! │  [Int(1), Text("%Luis%"), Text("2024-01-01")]                          │
//! │                                                                         │
//! │  Each clause pushes its placeholder AND its value in the same call,    │
//! │  so text and parameter list can never drift out of position as         │
//! │  filters are added or removed.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LIKE Collation
//! Partial-text predicates run under SQLite's default `LIKE`, which is
//! case-insensitive for ASCII. That choice is pinned by tests in the
//! client repository rather than inherited silently.

use chrono::NaiveDate;

use crate::repository::engine::SqlParam;

// =============================================================================
// Filters
// =============================================================================

/// Optional criteria for the multi-criteria sales search.
///
/// `company_id` is mandatory (the multi-tenancy boundary); everything else
/// is applied only when present. Blank text counts as absent.
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    /// Scope every search to this company. Mandatory.
    pub company_id: i64,
    /// Exact order id, when the user is chasing one sale.
    pub order_id: Option<i64>,
    /// Partial client name match.
    pub client_name: Option<String>,
    /// Partial worker name match.
    pub worker_name: Option<String>,
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
}

impl SalesFilter {
    /// Filter scoped to one company with no optional criteria.
    pub fn for_company(company_id: i64) -> Self {
        SalesFilter {
            company_id,
            ..SalesFilter::default()
        }
    }
}

/// Criteria for the top-selling-product ranking.
#[derive(Debug, Clone, Default)]
pub struct TopSellersFilter {
    /// Scope the ranking to this company. Mandatory.
    pub company_id: i64,
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
    /// Truncate the ranking; absent returns all grouped products.
    pub limit: Option<i64>,
}

impl TopSellersFilter {
    /// Ranking scoped to one company with no optional criteria.
    pub fn for_company(company_id: i64) -> Self {
        TopSellersFilter {
            company_id,
            ..TopSellersFilter::default()
        }
    }
}

// =============================================================================
// Query Builder
// =============================================================================

/// Accumulates SQL text and positional parameters in lockstep.
///
/// Construction seeds the one mandatory predicate (company scope); each
/// subsequent call appends its clause only when its input is present.
/// Callers append predicates first, then GROUP BY / ORDER BY / LIMIT, in
/// that order - the same fixed order every call site uses, so a given
/// filter always produces the same statement text.
#[derive(Debug)]
pub struct QueryBuilder {
    sql: String,
    params: Vec<SqlParam>,
}

impl QueryBuilder {
    /// Starts from a base SELECT and scopes it to one company.
    pub fn new(base: impl Into<String>, company_column: &str, company_id: i64) -> Self {
        let mut sql = base.into();
        sql.push_str(" WHERE ");
        sql.push_str(company_column);
        sql.push_str(" = ?");

        QueryBuilder {
            sql,
            params: vec![SqlParam::Int(company_id)],
        }
    }

    /// Appends `column = ?` when a value is supplied.
    pub fn and_eq(mut self, column: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.sql.push_str(" AND ");
            self.sql.push_str(column);
            self.sql.push_str(" = ?");
            self.params.push(SqlParam::Int(value));
        }
        self
    }

    /// Appends `column LIKE ?` with the value wrapped in wildcards on both
    /// sides. Skipped when the text is absent or blank after trimming.
    pub fn and_like(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            let value = value.trim();
            if !value.is_empty() {
                self.sql.push_str(" AND ");
                self.sql.push_str(column);
                self.sql.push_str(" LIKE ?");
                self.params.push(SqlParam::Text(format!("%{value}%")));
            }
        }
        self
    }

    /// Appends `column >= ?` when a lower bound is supplied (inclusive).
    pub fn and_date_from(mut self, column: &str, value: Option<NaiveDate>) -> Self {
        if let Some(value) = value {
            self.sql.push_str(" AND ");
            self.sql.push_str(column);
            self.sql.push_str(" >= ?");
            self.params.push(value.into());
        }
        self
    }

    /// Appends `column <= ?` when an upper bound is supplied (inclusive).
    pub fn and_date_to(mut self, column: &str, value: Option<NaiveDate>) -> Self {
        if let Some(value) = value {
            self.sql.push_str(" AND ");
            self.sql.push_str(column);
            self.sql.push_str(" <= ?");
            self.params.push(value.into());
        }
        self
    }

    /// Appends a GROUP BY clause (no parameters).
    pub fn group_by(mut self, clause: &str) -> Self {
        self.sql.push_str(" GROUP BY ");
        self.sql.push_str(clause);
        self
    }

    /// Appends an ORDER BY clause (no parameters).
    pub fn order_by(mut self, clause: &str) -> Self {
        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(clause);
        self
    }

    /// Appends `LIMIT ?` when a cap is supplied. Must be the last call
    /// that binds a parameter.
    pub fn limit(mut self, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.sql.push_str(" LIMIT ?");
            self.params.push(SqlParam::Int(value));
        }
        self
    }

    /// Yields the statement text and its parameters, in bound order.
    pub fn build(self) -> (String, Vec<SqlParam>) {
        (self.sql, self.params)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_company_scope() {
        let (sql, params) = QueryBuilder::new("SELECT * FROM orders", "company_id", 1).build();

        assert_eq!(sql, "SELECT * FROM orders WHERE company_id = ?");
        assert_eq!(params, vec![SqlParam::Int(1)]);
    }

    #[test]
    fn test_absent_filters_add_nothing() {
        let (sql, params) = QueryBuilder::new("SELECT * FROM orders o", "o.company_id", 1)
            .and_eq("o.id", None)
            .and_like("c.full_name", None)
            .and_date_from("o.order_date", None)
            .and_date_to("o.order_date", None)
            .limit(None)
            .build();

        assert_eq!(sql, "SELECT * FROM orders o WHERE o.company_id = ?");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_like_wraps_wildcards_and_skips_blank() {
        let (sql, params) = QueryBuilder::new("SELECT * FROM clients", "company_id", 1)
            .and_like("full_name", Some("Ana"))
            .and_like("email", Some("   "))
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM clients WHERE company_id = ? AND full_name LIKE ?"
        );
        assert_eq!(params[1], SqlParam::Text("%Ana%".to_string()));
    }

    #[test]
    fn test_like_trims_before_wrapping() {
        let (_, params) = QueryBuilder::new("SELECT 1", "company_id", 1)
            .and_like("full_name", Some("  Luis "))
            .build();

        assert_eq!(params[1], SqlParam::Text("%Luis%".to_string()));
    }

    #[test]
    fn test_date_bounds_are_independent() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let (sql, _) = QueryBuilder::new("SELECT 1", "company_id", 1)
            .and_date_from("order_date", Some(from))
            .and_date_to("order_date", None)
            .build();
        assert!(sql.ends_with("AND order_date >= ?"));

        let (sql, _) = QueryBuilder::new("SELECT 1", "company_id", 1)
            .and_date_from("order_date", None)
            .and_date_to("order_date", Some(to))
            .build();
        assert!(sql.ends_with("AND order_date <= ?"));
    }

    #[test]
    fn test_params_track_clause_order() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let (sql, params) = QueryBuilder::new("SELECT * FROM orders o", "o.company_id", 3)
            .and_eq("o.id", Some(42))
            .and_like("c.full_name", Some("Ana"))
            .and_date_from("o.order_date", Some(from))
            .order_by("o.order_date DESC")
            .limit(Some(5))
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM orders o WHERE o.company_id = ? AND o.id = ? \
             AND c.full_name LIKE ? AND o.order_date >= ? \
             ORDER BY o.order_date DESC LIMIT ?"
        );
        assert_eq!(
            params,
            vec![
                SqlParam::Int(3),
                SqlParam::Int(42),
                SqlParam::Text("%Ana%".to_string()),
                SqlParam::Text("2024-01-01".to_string()),
                SqlParam::Int(5),
            ]
        );
    }

    #[test]
    fn test_limit_param_is_bound_last() {
        let (_, params) = QueryBuilder::new("SELECT 1", "company_id", 1)
            .and_eq("id", Some(2))
            .limit(Some(10))
            .build();

        assert_eq!(params.last(), Some(&SqlParam::Int(10)));
    }

    #[test]
    fn test_group_and_order_have_no_params() {
        let (sql, params) = QueryBuilder::new("SELECT product_id FROM lines", "company_id", 1)
            .group_by("product_id")
            .order_by("units_sold DESC")
            .build();

        assert!(sql.contains("GROUP BY product_id ORDER BY units_sold DESC"));
        assert_eq!(params.len(), 1);
    }
}
