//! # Generic Repository Engine
//!
//! Type-parameterized CRUD over the relational store. One engine, six
//! entities: each concrete repository supplies an [`Entity`] strategy
//! (table identity, statement templates, parameter binders, row mapping)
//! and the engine does the rest.
//!
//! ## How The Pieces Fit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Generic Engine Data Flow                             │
//! │                                                                         │
//! │  ClientRepository::find_by_national_id("V-123")                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository<Client>::query_one(sql, params)                            │
//! │       │                                                                 │
//! │       ├── SqlParam::Text("V-123") bound positionally                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite row ──► Client::from_row (the ONE mapping per entity)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Some(Client { .. }))                                               │
//! │                                                                         │
//! │  Every entry point - generic CRUD, finders, dynamic searches -         │
//! │  funnels rows through the same FromRow impl.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Safety Property
//! Callers never hand-format SQL literals. Values travel as [`SqlParam`],
//! a closed set of the types the store accepts (integer, text, real, null).
//! A type outside that set has no `Into<SqlParam>` impl and fails at
//! compile time - the loud programming error the binder owes its callers,
//! with no silent coercion path.

use std::marker::PhantomData;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use ventas_core::Role;

// =============================================================================
// SQL Parameters
// =============================================================================

/// A value bound into a parameterized statement.
///
/// Dispatch happens on the declared type of the value, never on its
/// formatted text. The set is closed: SQLite's integer, text, real and
/// null storage classes.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// INTEGER storage class (also carries booleans as 0/1).
    Int(i64),
    /// TEXT storage class.
    Text(String),
    /// REAL storage class.
    Real(f64),
    /// Explicit NULL.
    Null,
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(i64::from(v))
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Int(i64::from(v))
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Real(v)
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

/// Dates bind as canonical sortable text (YYYY-MM-DD) so comparisons in
/// SQL agree with chronological order.
impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        SqlParam::Text(v.format("%Y-%m-%d").to_string())
    }
}

/// Roles bind as their persisted lowercase text form.
impl From<Role> for SqlParam {
    fn from(v: Role) -> Self {
        SqlParam::Text(v.as_str().to_string())
    }
}

/// Absent optionals bind as NULL.
impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlParam::Null,
        }
    }
}

/// Binds one parameter onto a plain (non-mapping) query.
pub(crate) fn bind_param<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    param: &'q SqlParam,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match param {
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::Text(s) => query.bind(s.as_str()),
        SqlParam::Real(v) => query.bind(*v),
        SqlParam::Null => query.bind(None::<i64>),
    }
}

/// Binds one parameter onto a row-mapping query.
pub(crate) fn bind_param_as<'q, O>(
    query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    param: &'q SqlParam,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    match param {
        SqlParam::Int(v) => query.bind(*v),
        SqlParam::Text(s) => query.bind(s.as_str()),
        SqlParam::Real(v) => query.bind(*v),
        SqlParam::Null => query.bind(None::<i64>),
    }
}

// =============================================================================
// Entity Strategy
// =============================================================================

/// Per-entity strategy the generic engine runs on.
///
/// The row→entity direction is the `FromRow` supertrait (derived once per
/// entity in ventas-core); the entity→parameters direction is the two
/// binder methods here. Insert omits the identity column; update appends
/// it last as the WHERE key.
pub trait Entity: Sized + Send + Unpin + for<'r> FromRow<'r, SqliteRow> {
    /// Table the entity persists into.
    const TABLE: &'static str;

    /// Identity column (store-assigned integer surrogate key).
    const ID_COLUMN: &'static str;

    /// INSERT template over the non-identity columns.
    const INSERT_SQL: &'static str;

    /// Full-row UPDATE template; the final placeholder is the identity.
    const UPDATE_SQL: &'static str;

    /// Current identity ([`ventas_core::UNSAVED_ID`] until persisted).
    fn id(&self) -> i64;

    /// Returns the entity with the store-assigned identity attached.
    fn with_id(self, id: i64) -> Self;

    /// Values for [`Entity::INSERT_SQL`], in placeholder order.
    fn insert_params(&self) -> Vec<SqlParam>;

    /// Values for [`Entity::UPDATE_SQL`]: the insert values with the
    /// identity appended last.
    fn update_params(&self) -> Vec<SqlParam>;
}

// =============================================================================
// Generic Repository
// =============================================================================

/// Generic CRUD engine over one entity type.
///
/// Concrete repositories wrap this and add their finders; nothing outside
/// this struct builds INSERT/UPDATE/DELETE statements.
///
/// ## Usage
/// ```rust,ignore
/// let repo: Repository<Client> = Repository::new(pool);
/// let saved = repo.save(Client::new("Ana Ruiz", "V-123")).await?;
/// assert!(saved.is_persisted());
/// ```
#[derive(Debug, Clone)]
pub struct Repository<T: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Repository<T> {
    /// Creates a repository over the shared pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            _entity: PhantomData,
        }
    }

    /// Returns the underlying pool (for transaction scopes).
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Single-row lookup by primary key.
    ///
    /// ## Returns
    /// * `Ok(Some(T))` - Row found
    /// * `Ok(None)` - No such id (absence is not an error)
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<T>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?",
            T::TABLE,
            T::ID_COLUMN
        );

        let entity = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity)
    }

    /// Unfiltered full-table scan.
    ///
    /// Returns an empty vec, never an error, when the table has no rows.
    pub async fn find_all(&self) -> DbResult<Vec<T>> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", T::TABLE, T::ID_COLUMN);

        let entities = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;

        Ok(entities)
    }

    /// Inserts the entity and returns it with the store-generated identity
    /// attached.
    ///
    /// Callers must use the returned value; the argument is consumed.
    pub async fn save(&self, entity: T) -> DbResult<T> {
        self.save_with(&self.pool, entity).await
    }

    /// [`Repository::save`] against an explicit executor, so multi-step
    /// writes can run inside one transaction.
    pub async fn save_with<'c, E>(&self, executor: E, entity: T) -> DbResult<T>
    where
        E: sqlx::Executor<'c, Database = Sqlite>,
    {
        debug!(table = T::TABLE, "Inserting entity");

        let params = entity.insert_params();
        let mut query = sqlx::query(T::INSERT_SQL);
        for param in &params {
            query = bind_param(query, param);
        }

        let result = query.execute(executor).await?;

        Ok(entity.with_id(result.last_insert_rowid()))
    }

    /// Full-row replace by identity.
    ///
    /// ## Returns
    /// * `Ok(())` - Exactly the targeted row was replaced
    /// * `Err(DbError::NotFound)` - Identity matched no row; silent
    ///   no-op success would hide stale identities from callers
    pub async fn update(&self, entity: &T) -> DbResult<()> {
        self.update_with(&self.pool, entity).await
    }

    /// [`Repository::update`] against an explicit executor.
    pub async fn update_with<'c, E>(&self, executor: E, entity: &T) -> DbResult<()>
    where
        E: sqlx::Executor<'c, Database = Sqlite>,
    {
        debug!(table = T::TABLE, id = entity.id(), "Updating entity");

        let params = entity.update_params();
        let mut query = sqlx::query(T::UPDATE_SQL);
        for param in &params {
            query = bind_param(query, param);
        }

        let result = query.execute(executor).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(T::TABLE, entity.id().to_string()));
        }

        Ok(())
    }

    /// Removes the row by identity. Deleting an id that does not exist is
    /// not an error.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_with(&self.pool, id).await
    }

    /// [`Repository::delete`] against an explicit executor.
    pub async fn delete_with<'c, E>(&self, executor: E, id: i64) -> DbResult<()>
    where
        E: sqlx::Executor<'c, Database = Sqlite>,
    {
        debug!(table = T::TABLE, id = id, "Deleting entity");

        let sql = format!("DELETE FROM {} WHERE {} = ?", T::TABLE, T::ID_COLUMN);

        sqlx::query(&sql).bind(id).execute(executor).await?;

        Ok(())
    }

    /// Escape hatch: runs an arbitrary parameterized SELECT and maps every
    /// row through the entity's one row mapping.
    ///
    /// Concrete finders and the dynamic query builder funnel through here
    /// so there is exactly one mapping implementation per entity.
    pub async fn query(&self, sql: &str, params: &[SqlParam]) -> DbResult<Vec<T>> {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = bind_param_as(query, param);
        }

        let entities = query.fetch_all(&self.pool).await?;

        Ok(entities)
    }

    /// Like [`Repository::query`] but for single-row finders.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn query_one(&self, sql: &str, params: &[SqlParam]) -> DbResult<Option<T>> {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = bind_param_as(query, param);
        }

        let entity = query.fetch_optional(&self.pool).await?;

        Ok(entity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fresh_db;
    use ventas_core::Client;

    fn repo(db: &crate::pool::Database) -> Repository<Client> {
        Repository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_save_attaches_generated_identity() {
        let db = fresh_db().await;
        let repo = repo(&db);

        let saved = repo.save(Client::new("Ana Ruiz", "V-100")).await.unwrap();
        assert!(saved.is_persisted());

        let second = repo.save(Client::new("Beto Cruz", "V-200")).await.unwrap();
        assert!(second.id > saved.id);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields() {
        let db = fresh_db().await;
        let repo = repo(&db);

        let mut client = Client::new("Ana Ruiz", "V-100");
        client.phone = Some("555-0101".to_string());

        let saved = repo.save(client.clone()).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(found.full_name, client.full_name);
        assert_eq!(found.national_id, client.national_id);
        assert_eq!(found.phone, client.phone);
        assert_eq!(found.email, None);
        assert_eq!(found.id, saved.id);
    }

    #[tokio::test]
    async fn test_find_by_id_absence_is_not_an_error() {
        let db = fresh_db().await;
        let found = repo(&db).find_by_id(9999).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_all_empty_table_returns_empty_vec() {
        let db = fresh_db().await;
        let all = repo(&db).find_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_full_row() {
        let db = fresh_db().await;
        let repo = repo(&db);

        let saved = repo.save(Client::new("Ana Ruiz", "V-100")).await.unwrap();

        let mut changed = saved.clone();
        changed.full_name = "Ana Ruiz de León".to_string();
        changed.email = Some("ana@example.com".to_string());
        repo.update(&changed).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found, changed);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = fresh_db().await;
        let repo = repo(&db);

        let ghost = Client::new("Nadie", "V-404").with_id(9999);
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_ok() {
        let db = fresh_db().await;
        repo(&db).delete(9999).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let db = fresh_db().await;
        let repo = repo(&db);

        let saved = repo.save(Client::new("Ana Ruiz", "V-100")).await.unwrap();
        repo.delete(saved.id).await.unwrap();

        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
    }

    #[test]
    fn test_param_conversions() {
        assert_eq!(SqlParam::from(7i64), SqlParam::Int(7));
        assert_eq!(SqlParam::from(true), SqlParam::Int(1));
        assert_eq!(SqlParam::from("abc"), SqlParam::Text("abc".to_string()));
        assert_eq!(SqlParam::from(None::<i64>), SqlParam::Null);
        assert_eq!(
            SqlParam::from(Some("x".to_string())),
            SqlParam::Text("x".to_string())
        );
        assert_eq!(
            SqlParam::from(Role::Owner),
            SqlParam::Text("owner".to_string())
        );
    }

    #[test]
    fn test_date_param_is_sortable_text() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            SqlParam::from(date),
            SqlParam::Text("2024-01-05".to_string())
        );
    }
}
