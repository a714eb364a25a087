//! # Repository Module
//!
//! One generic repository serves every entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Generic Repository                                   │
//! │                                                                         │
//! │  db.cars() / db.customers() / db.employees() / db.sales() / db.users() │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository<E: Entity>                                                 │
//! │  ├── list_all()          SELECT .. ORDER BY rowid                      │
//! │  ├── get_by_id(id)       SELECT .. WHERE key = ?   → Option<E>         │
//! │  ├── add(&e)             INSERT (key, cols..)                          │
//! │  ├── update(&e)          UPDATE .. WHERE key = ?   → RowOutcome        │
//! │  ├── delete(id)          DELETE .. WHERE key = ?   → RowOutcome        │
//! │  └── count()                                                            │
//! │       │                                                                 │
//! │       │  E supplies TABLE, KEY, COLUMNS, a FromRow row struct and       │
//! │       │  a binder; the SQL is assembled once here.                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Entity-specific extras live beside each Entity impl:                  │
//! │  car.rs (list_available), sale.rs (list_by_employee, next_sale_id,     │
//! │  record_sale), user.rs (get_by_username, add_user)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{DbError, DbResult};

pub mod car;
pub mod customer;
pub mod employee;
pub mod sale;
pub mod user;

/// Parameterised statement being bound.
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

// =============================================================================
// Entity
// =============================================================================

/// A record stored in one table keyed by a single text column.
pub trait Entity: Sized + Send + Sync + Unpin + 'static {
    /// Row shape as decoded from SQLite. Non-key columns are optional.
    type Row: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;

    /// Name used in logs.
    const NAME: &'static str;
    const TABLE: &'static str;
    const KEY: &'static str;
    /// Non-key columns, in the order `bind_columns` binds them.
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> &str;

    /// Builds the record, substituting defaults for NULL columns.
    fn from_row(row: Self::Row) -> Self;

    /// Binds every non-key column in `COLUMNS` order.
    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

// =============================================================================
// Row Outcome
// =============================================================================

/// Result of an update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// At least one row changed.
    Applied(u64),
    /// No row has the given key.
    NotFound,
}

impl RowOutcome {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            RowOutcome::NotFound
        } else {
            RowOutcome::Applied(rows)
        }
    }

    pub fn rows_affected(&self) -> u64 {
        match self {
            RowOutcome::Applied(rows) => *rows,
            RowOutcome::NotFound => 0,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, RowOutcome::Applied(_))
    }
}

// =============================================================================
// SQL Builders
// =============================================================================

fn select_columns<E: Entity>() -> String {
    std::iter::once(E::KEY)
        .chain(E::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn select_sql<E: Entity>() -> String {
    format!("SELECT {} FROM {}", select_columns::<E>(), E::TABLE)
}

pub(crate) fn insert_sql<E: Entity>() -> String {
    let placeholders = vec!["?"; E::COLUMNS.len() + 1].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        E::TABLE,
        select_columns::<E>(),
        placeholders
    )
}

fn update_sql<E: Entity>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE {} = ?", E::TABLE, assignments, E::KEY)
}

// =============================================================================
// Repository
// =============================================================================

/// CRUD over one entity's table.
pub struct Repository<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository").field("entity", &E::NAME).finish()
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            _entity: PhantomData,
        }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Every row, in insertion order.
    pub async fn list_all(&self) -> DbResult<Vec<E>> {
        debug!(entity = E::NAME, "Listing all");

        let sql = format!("{} ORDER BY rowid", select_sql::<E>());
        let rows = sqlx::query_as::<_, E::Row>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(E::from_row).collect())
    }

    /// The row with key `id`, or `None`.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<E>> {
        debug!(entity = E::NAME, id = %id, "Fetching by id");

        let sql = format!("{} WHERE {} = ?", select_sql::<E>(), E::KEY);
        let row = sqlx::query_as::<_, E::Row>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(E::from_row))
    }

    /// Inserts `entity`. An existing key fails with `UniqueViolation`.
    pub async fn add(&self, entity: &E) -> DbResult<()> {
        debug!(entity = E::NAME, id = %entity.key(), "Inserting");

        let sql = insert_sql::<E>();
        let query = sqlx::query(&sql).bind(entity.key());
        entity
            .bind_columns(query)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_key(entity.key()))?;

        Ok(())
    }

    /// Replaces every column of the row with the same key.
    pub async fn update(&self, entity: &E) -> DbResult<RowOutcome> {
        debug!(entity = E::NAME, id = %entity.key(), "Updating");

        let sql = update_sql::<E>();
        let result = entity
            .bind_columns(sqlx::query(&sql))
            .bind(entity.key())
            .execute(&self.pool)
            .await?;

        Ok(RowOutcome::from_rows_affected(result.rows_affected()))
    }

    /// Deletes the row with key `id`.
    pub async fn delete(&self, id: &str) -> DbResult<RowOutcome> {
        debug!(entity = E::NAME, id = %id, "Deleting");

        let sql = format!("DELETE FROM {} WHERE {} = ?", E::TABLE, E::KEY);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(RowOutcome::from_rows_affected(result.rows_affected()))
    }

    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_core::Customer;

    use crate::pool::{Database, DbConfig};

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.into(),
            name: name.into(),
            phone: "0300-1234567".into(),
            email: format!("{}@example.com", id.to_lowercase()),
        }
    }

    #[test]
    fn test_generated_sql() {
        assert_eq!(
            select_sql::<Customer>(),
            "SELECT id, name, phone, email FROM customers"
        );
        assert_eq!(
            insert_sql::<Customer>(),
            "INSERT INTO customers (id, name, phone, email) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(
            update_sql::<Customer>(),
            "UPDATE customers SET name = ?, phone = ?, email = ? WHERE id = ?"
        );
    }

    #[test]
    fn test_row_outcome() {
        assert_eq!(RowOutcome::from_rows_affected(0), RowOutcome::NotFound);
        assert_eq!(RowOutcome::from_rows_affected(1).rows_affected(), 1);
        assert!(!RowOutcome::NotFound.is_applied());
    }

    #[tokio::test]
    async fn test_list_all_keeps_insertion_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        for (id, name) in [("CU9", "Zara"), ("CU1", "Ali"), ("CU5", "Maryam")] {
            repo.add(&customer(id, name)).await.unwrap();
        }

        let ids: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["CU9", "CU1", "CU5"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();
        let mut bilal = customer("CU1", "Bilal");

        repo.add(&bilal).await.unwrap();
        assert_eq!(repo.get_by_id("CU1").await.unwrap(), Some(bilal.clone()));

        bilal.phone = "0321-7654321".into();
        assert_eq!(repo.update(&bilal).await.unwrap(), RowOutcome::Applied(1));
        assert_eq!(repo.get_by_id("CU1").await.unwrap().unwrap().phone, "0321-7654321");

        assert_eq!(repo.delete("CU1").await.unwrap().rows_affected(), 1);
        assert_eq!(repo.get_by_id("CU1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_rows_are_values_not_errors() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        assert_eq!(repo.get_by_id("nobody").await.unwrap(), None);
        assert_eq!(repo.delete("nobody").await.unwrap().rows_affected(), 0);
        assert_eq!(
            repo.update(&customer("nobody", "Ghost")).await.unwrap(),
            RowOutcome::NotFound
        );
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_key_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.add(&customer("CU1", "Bilal")).await.unwrap();
        let err = repo.add(&customer("CU1", "Someone Else")).await.unwrap_err();

        assert!(
            matches!(err, DbError::UniqueViolation { ref field, ref value } if field == "customers.id" && value == "CU1"),
            "got {err:?}"
        );
        assert_eq!(err.to_string(), "Duplicate customers.id: 'CU1' already exists");
    }
}
