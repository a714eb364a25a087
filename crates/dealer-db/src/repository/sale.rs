//! # Sale Repository
//!
//! Sale mapping plus employee filtering and `SALE###` id allocation.
//!
//! ## Id Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  next_sale_id()   read-only preview                                    │
//! │  └── SELECT id FROM sales ──► max SALE suffix + 1                      │
//! │      Two callers can both see SALE008; the second insert then fails    │
//! │      with UniqueViolation.                                             │
//! │                                                                         │
//! │  record_sale(draft)   one transaction                                  │
//! │  ├── claim id_sequences['sale'] (takes the write lock first)           │
//! │  ├── n = max(counter, max SALE suffix in sales) + 1                    │
//! │  ├── counter = n                                                        │
//! │  ├── INSERT sale 'SALE{n:03}'                                           │
//! │  └── COMMIT                                                             │
//! │      Concurrent callers queue on the lock and get distinct ids.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::FromRow;
use tracing::{debug, info, warn};

use super::{insert_sql, select_sql, Entity, Repository, SqliteQuery};
use crate::error::{DbError, DbResult};
use dealer_core::sequence::{self, format_sale_id, max_sale_number};
use dealer_core::{Money, Sale, SaleDraft, UnreadColumns, UnreadDate};

/// `id_sequences` row backing sale ids.
pub const SALE_SEQUENCE: &str = "sale";

/// Date used when a stored date is missing or unreadable.
fn fallback_date() -> NaiveDate {
    NaiveDate::default()
}

#[derive(Debug, FromRow)]
pub struct SaleRow {
    pub id: String,
    pub car_id: Option<String>,
    pub customer_id: Option<String>,
    pub employee_id: Option<String>,
    pub amount_cents: Option<i64>,
    pub date: Option<String>,
}

impl Entity for Sale {
    type Row = SaleRow;

    const NAME: &'static str = "sale";
    const TABLE: &'static str = "sales";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["car_id", "customer_id", "employee_id", "amount_cents", "date"];

    fn key(&self) -> &str {
        &self.id
    }

    fn from_row(row: SaleRow) -> Self {
        let (date, unread_date) = match row.date {
            Some(text) => match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                Ok(date) => (date, None),
                Err(_) => {
                    warn!(id = %row.id, date = %text, "Unreadable sale date");
                    (fallback_date(), Some(UnreadDate::Text(text)))
                }
            },
            None => (fallback_date(), Some(UnreadDate::Null)),
        };

        Sale {
            id: row.id,
            car_id: row.car_id.unwrap_or_default(),
            customer_id: row.customer_id.unwrap_or_default(),
            employee_id: row.employee_id.unwrap_or_default(),
            amount: Money::from_cents(row.amount_cents.unwrap_or_default()),
            date,
            unread: UnreadColumns {
                amount: row.amount_cents.is_none(),
                date: unread_date,
            },
        }
    }

    /// A NULL or unreadable column that still holds its default is written
    /// back as it was stored.
    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        let query = query
            .bind(self.car_id.as_str())
            .bind(self.customer_id.as_str())
            .bind(self.employee_id.as_str())
            .bind(self.known_amount().map(|amount| amount.cents()));

        match (self.known_date(), &self.unread.date) {
            (Some(date), _) => query.bind(date),
            (None, Some(UnreadDate::Text(raw))) => query.bind(raw.as_str()),
            (None, _) => query.bind(Option::<&str>::None),
        }
    }
}

impl Repository<Sale> {
    /// Sales made by one employee, in insertion order.
    pub async fn list_by_employee(&self, employee_id: &str) -> DbResult<Vec<Sale>> {
        debug!(employee_id = %employee_id, "Listing sales by employee");

        let sql = format!("{} WHERE employee_id = ? ORDER BY rowid", select_sql::<Sale>());
        let rows = sqlx::query_as::<_, SaleRow>(&sql)
            .bind(employee_id)
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().map(Sale::from_row).collect())
    }

    /// Id the next sale would get, from a scan of existing ids.
    ///
    /// Nothing is reserved. Use [`Repository::record_sale`] to insert with a
    /// guaranteed-unique id.
    pub async fn next_sale_id(&self) -> DbResult<String> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM sales")
            .fetch_all(self.pool())
            .await?;

        sequence::next_sale_id(ids.iter().map(String::as_str))
            .ok_or_else(|| DbError::SequenceExhausted(SALE_SEQUENCE.to_string()))
    }

    /// Allocates the next id and inserts the sale in one transaction.
    pub async fn record_sale(&self, draft: SaleDraft) -> DbResult<Sale> {
        let mut tx = self.pool().begin().await.map_err(DbError::transaction)?;

        // Writing first takes the write lock before anything is read.
        sqlx::query("INSERT INTO id_sequences (name, value) VALUES (?, 0) ON CONFLICT(name) DO NOTHING")
            .bind(SALE_SEQUENCE)
            .execute(&mut *tx)
            .await?;

        let counter: i64 = sqlx::query_scalar("SELECT value FROM id_sequences WHERE name = ?")
            .bind(SALE_SEQUENCE)
            .fetch_one(&mut *tx)
            .await?;

        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM sales")
            .fetch_all(&mut *tx)
            .await?;

        let counter = u32::try_from(counter.max(0)).unwrap_or(u32::MAX);
        let current = counter.max(max_sale_number(ids.iter().map(String::as_str)));
        let number = sequence::following(current)
            .ok_or_else(|| DbError::SequenceExhausted(SALE_SEQUENCE.to_string()))?;

        sqlx::query("UPDATE id_sequences SET value = ? WHERE name = ?")
            .bind(i64::from(number))
            .bind(SALE_SEQUENCE)
            .execute(&mut *tx)
            .await?;

        let sale = draft.with_id(format_sale_id(number));
        let sql = insert_sql::<Sale>();
        sale.bind_columns(sqlx::query(&sql).bind(sale.id.as_str()))
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::from(e).with_key(&sale.id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            id = %sale.id,
            car_id = %sale.car_id,
            employee_id = %sale.employee_id,
            amount = %sale.amount,
            "Sale recorded"
        );
        Ok(sale)
    }
}
