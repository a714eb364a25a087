//! Customer table mapping.

use sqlx::FromRow;

use super::{Entity, SqliteQuery};
use dealer_core::Customer;

#[derive(Debug, FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Entity for Customer {
    type Row = CustomerRow;

    const NAME: &'static str = "customer";
    const TABLE: &'static str = "customers";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["name", "phone", "email"];

    fn key(&self) -> &str {
        &self.id
    }

    fn from_row(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
        }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.phone.as_str())
            .bind(self.email.as_str())
    }
}
