//! # Car Repository
//!
//! Stock table mapping plus the unsold-car query used by the sell-car picker.

use sqlx::FromRow;
use tracing::debug;

use super::{select_sql, Entity, Repository, SqliteQuery};
use crate::error::DbResult;
use dealer_core::{Car, Money};

/// `cars` row as stored.
#[derive(Debug, FromRow)]
pub struct CarRow {
    pub id: String,
    pub model: Option<String>,
    pub variant: Option<String>,
    pub price_cents: Option<i64>,
    pub mileage: Option<f64>,
    pub color: Option<String>,
    pub car_type: Option<String>,
    pub weight: Option<f64>,
    pub number_plate: Option<String>,
    pub chassis_number: Option<String>,
}

impl Entity for Car {
    type Row = CarRow;

    const NAME: &'static str = "car";
    const TABLE: &'static str = "cars";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "model",
        "variant",
        "price_cents",
        "mileage",
        "color",
        "car_type",
        "weight",
        "number_plate",
        "chassis_number",
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn from_row(row: CarRow) -> Self {
        Car {
            id: row.id,
            model: row.model.unwrap_or_default(),
            variant: row.variant.unwrap_or_default(),
            price: Money::from_cents(row.price_cents.unwrap_or_default()),
            mileage: row.mileage.unwrap_or_default(),
            color: row.color.unwrap_or_default(),
            car_type: row.car_type.unwrap_or_default(),
            weight: row.weight.unwrap_or_default(),
            number_plate: row.number_plate.unwrap_or_default(),
            chassis_number: row.chassis_number.unwrap_or_default(),
        }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.model.as_str())
            .bind(self.variant.as_str())
            .bind(self.price.cents())
            .bind(self.mileage)
            .bind(self.color.as_str())
            .bind(self.car_type.as_str())
            .bind(self.weight)
            .bind(self.number_plate.as_str())
            .bind(self.chassis_number.as_str())
    }
}

impl Repository<Car> {
    /// Cars no sale refers to, in insertion order.
    pub async fn list_available(&self) -> DbResult<Vec<Car>> {
        debug!("Listing unsold cars");

        let sql = format!(
            "{} WHERE id NOT IN (SELECT car_id FROM sales WHERE car_id IS NOT NULL) ORDER BY rowid",
            select_sql::<Car>()
        );
        let rows = sqlx::query_as::<_, CarRow>(&sql)
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().map(Car::from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use dealer_core::Sale;

    fn corolla(id: &str) -> Car {
        Car {
            id: id.into(),
            model: "Corolla".into(),
            variant: "Altis Grande 1.8".into(),
            price: Money::from_cents(7_499_000_00),
            mileage: 12_345.6,
            color: "Super White".into(),
            car_type: "Sedan".into(),
            weight: 1_285.0,
            number_plate: "LEB-22-4417".into(),
            chassis_number: "ZRE172-0123456".into(),
        }
    }

    #[tokio::test]
    async fn test_car_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let car = corolla("C1");

        db.cars().add(&car).await.unwrap();
        assert_eq!(db.cars().get_by_id("C1").await.unwrap(), Some(car));
    }

    #[tokio::test]
    async fn test_null_columns_map_to_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO cars (id) VALUES ('C7')")
            .execute(db.pool())
            .await
            .unwrap();

        let car = db.cars().get_by_id("C7").await.unwrap().unwrap();
        assert_eq!(car.model, "");
        assert!(car.price.is_zero());
        assert_eq!(car.weight, 0.0);
        assert_eq!(car.display_name(), "C7");
    }

    #[tokio::test]
    async fn test_list_available_excludes_sold_cars() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for id in ["C1", "C2", "C3"] {
            db.cars().add(&corolla(id)).await.unwrap();
        }
        db.sales()
            .add(&Sale {
                id: "SALE001".into(),
                car_id: "C2".into(),
                customer_id: "CU1".into(),
                employee_id: "E1".into(),
                amount: Money::from_cents(100),
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                unread: Default::default(),
            })
            .await
            .unwrap();

        let ids: Vec<String> = db
            .cars()
            .list_available()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["C1", "C3"]);
    }
}
