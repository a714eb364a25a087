//! # Employee Repository
//!
//! Salary is stored in minor units so it round-trips exactly. The commission
//! rate column is kept with the employee even though reports use the flat
//! rate.

use sqlx::FromRow;

use super::{Entity, SqliteQuery};
use dealer_core::{CommissionRate, Employee, Money};

#[derive(Debug, FromRow)]
pub struct EmployeeRow {
    pub id: String,
    pub name: Option<String>,
    pub salary_cents: Option<i64>,
    pub commission_rate_bps: Option<i64>,
}

impl Entity for Employee {
    type Row = EmployeeRow;

    const NAME: &'static str = "employee";
    const TABLE: &'static str = "employees";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["name", "salary_cents", "commission_rate_bps"];

    fn key(&self) -> &str {
        &self.id
    }

    fn from_row(row: EmployeeRow) -> Self {
        let commission_rate = row
            .commission_rate_bps
            .and_then(|bps| u32::try_from(bps).ok())
            .map(CommissionRate::from_bps)
            .unwrap_or_default();

        Employee {
            id: row.id,
            name: row.name.unwrap_or_default(),
            salary: Money::from_cents(row.salary_cents.unwrap_or_default()),
            commission_rate,
        }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.salary.cents())
            .bind(i64::from(self.commission_rate.bps()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_salary_round_trips_exactly() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let salary = Money::parse_decimal("50000.00").unwrap();
        let employee = Employee::new("E1", "Sana Iqbal", salary);

        db.employees().add(&employee).await.unwrap();
        let stored = db.employees().get_by_id("E1").await.unwrap().unwrap();

        assert_eq!(stored, employee);
        assert_eq!(stored.salary.to_string(), "50000.00");
    }

    #[tokio::test]
    async fn test_custom_rate_is_persisted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut employee = Employee::new("E2", "Hamza", Money::from_cents(4_000_000));
        employee.commission_rate = CommissionRate::from_bps(1250);

        db.employees().add(&employee).await.unwrap();
        let stored = db.employees().get_by_id("E2").await.unwrap().unwrap();
        assert_eq!(stored.commission_rate.bps(), 1250);
    }

    #[tokio::test]
    async fn test_missing_rate_defaults_to_standard() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO employees (id, name, commission_rate_bps) VALUES ('E3', 'Legacy', NULL)")
            .execute(db.pool())
            .await
            .unwrap();

        let stored = db.employees().get_by_id("E3").await.unwrap().unwrap();
        assert_eq!(stored.commission_rate, CommissionRate::STANDARD);
        assert!(stored.salary.is_zero());
    }
}
