//! # Sales Summary Report
//!
//! Resolves every sale's references to readable names and lays the result
//! out as fixed-width text.
//!
//! A reference that no longer resolves (the car was deleted, say) keeps the
//! raw id in its column; the sale itself is never dropped from this report.
//! An amount or date that storage could not supply prints as [`MISSING`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Car, Customer, Employee, Sale};

/// Printed in place of an amount or date that is not known.
pub const MISSING: &str = "-";

/// Text layout for [`SalesReport::render_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    /// Full names, wide columns.
    #[default]
    Wide,
    /// Names truncated to fit a portrait page.
    Compact,
}

/// Column widths for one layout: id, car, customer, employee, amount, date.
struct Columns {
    widths: [usize; 6],
    /// Max characters kept for car, customer, employee.
    truncate: Option<[usize; 3]>,
    rule: usize,
}

impl ReportLayout {
    fn columns(self) -> Columns {
        match self {
            ReportLayout::Wide => Columns {
                widths: [8, 25, 20, 20, 10, 12],
                truncate: None,
                rule: 93,
            },
            ReportLayout::Compact => Columns {
                widths: [8, 15, 12, 12, 10, 12],
                truncate: Some([14, 11, 11]),
                rule: 72,
            },
        }
    }
}

/// One resolved sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReportRow {
    pub sale_id: String,
    pub car: String,
    pub customer: String,
    pub employee: String,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    /// False when `car` is the raw id because the car is gone.
    pub car_found: bool,
}

/// All sales with names resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub rows: Vec<SalesReportRow>,
}

impl SalesReport {
    /// Resolves each sale against the supplied lookups.
    pub fn build<'a, FC, FU, FE>(
        sales: &[Sale],
        car_lookup: FC,
        customer_lookup: FU,
        employee_lookup: FE,
    ) -> Self
    where
        FC: Fn(&str) -> Option<&'a Car>,
        FU: Fn(&str) -> Option<&'a Customer>,
        FE: Fn(&str) -> Option<&'a Employee>,
    {
        let rows = sales
            .iter()
            .map(|sale| {
                let car = car_lookup(&sale.car_id);
                SalesReportRow {
                    sale_id: sale.id.clone(),
                    car_found: car.is_some(),
                    car: car.map_or_else(|| sale.car_id.clone(), Car::display_name),
                    customer: customer_lookup(&sale.customer_id)
                        .map_or_else(|| sale.customer_id.clone(), |c| c.name.clone()),
                    employee: employee_lookup(&sale.employee_id)
                        .map_or_else(|| sale.employee_id.clone(), |e| e.name.clone()),
                    amount: sale.known_amount(),
                    date: sale.known_date(),
                }
            })
            .collect();

        SalesReport { rows }
    }

    /// Sum of the known sale amounts.
    pub fn total(&self) -> Money {
        self.rows.iter().filter_map(|row| row.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the header, a dashed rule and one line per sale.
    pub fn render_text(&self, layout: ReportLayout) -> String {
        let columns = layout.columns();
        let [w_id, w_car, w_customer, w_employee, w_amount, w_date] = columns.widths;

        let mut out = format!(
            "{:<w_id$} {:<w_car$} {:<w_customer$} {:<w_employee$} {:<w_amount$} {:<w_date$}\n",
            "ID", "Car", "Customer", "Employee", "Amount", "Date"
        );
        out.push_str(&"-".repeat(columns.rule));
        out.push('\n');

        for row in &self.rows {
            let (car, customer, employee) = match columns.truncate {
                Some([car, customer, employee]) => (
                    truncate(&row.car, car),
                    truncate(&row.customer, customer),
                    truncate(&row.employee, employee),
                ),
                None => (row.car.as_str(), row.customer.as_str(), row.employee.as_str()),
            };

            out.push_str(&format!(
                "{:<w_id$} {:<w_car$} {:<w_customer$} {:<w_employee$} {:<w_amount$} {:<w_date$}\n",
                row.sale_id,
                car,
                customer,
                employee,
                row.amount.map_or_else(|| MISSING.to_string(), |amount| amount.to_string()),
                row.date.map_or_else(|| MISSING.to_string(), |date| date.format("%Y-%m-%d").to_string()),
            ));
        }

        out
    }
}

/// Keeps at most `max` characters.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{UnreadColumns, UnreadDate};
    use std::collections::HashMap;

    fn sale(id: &str, car_id: &str) -> Sale {
        Sale {
            id: id.to_string(),
            car_id: car_id.to_string(),
            customer_id: "CU1".to_string(),
            employee_id: "E1".to_string(),
            amount: Money::from_cents(2_500_000_00),
            date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            unread: Default::default(),
        }
    }

    fn fixtures() -> (HashMap<String, Car>, HashMap<String, Customer>, HashMap<String, Employee>) {
        let car = Car {
            id: "C1".to_string(),
            model: "Land Cruiser".to_string(),
            variant: "ZX Gasoline 2024".to_string(),
            price: Money::zero(),
            mileage: 0.0,
            color: String::new(),
            car_type: String::new(),
            weight: 0.0,
            number_plate: String::new(),
            chassis_number: String::new(),
        };
        let customer = Customer {
            id: "CU1".to_string(),
            name: "Muhammad Abdullah Khan".to_string(),
            phone: String::new(),
            email: String::new(),
        };
        let employee = Employee::new("E1", "Sana", Money::zero());

        (
            HashMap::from([(car.id.clone(), car)]),
            HashMap::from([(customer.id.clone(), customer)]),
            HashMap::from([(employee.id.clone(), employee)]),
        )
    }

    #[test]
    fn test_missing_car_keeps_row_with_raw_id() {
        let (cars, customers, employees) = fixtures();
        let sales = vec![sale("SALE001", "C1"), sale("SALE002", "C404")];

        let report = SalesReport::build(
            &sales,
            |id| cars.get(id),
            |id| customers.get(id),
            |id| employees.get(id),
        );

        assert_eq!(report.rows.len(), 2);
        assert!(report.rows[0].car_found);
        assert_eq!(report.rows[0].car, "Land Cruiser ZX Gasoline 2024");
        assert!(!report.rows[1].car_found);
        assert_eq!(report.rows[1].car, "C404");
        assert_eq!(report.total().cents(), 5_000_000_00);
    }

    #[test]
    fn test_wide_layout() {
        let (cars, customers, employees) = fixtures();
        let report = SalesReport::build(
            &[sale("SALE001", "C1")],
            |id| cars.get(id),
            |id| customers.get(id),
            |id| employees.get(id),
        );

        let text = report.render_text(ReportLayout::Wide);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            format!("{:<8} {:<25} {:<20} {:<20} {:<10} {:<12}", "ID", "Car", "Customer", "Employee", "Amount", "Date")
        );
        assert_eq!(lines[1], "-".repeat(93));
        assert_eq!(
            lines[2],
            format!(
                "{:<8} {:<25} {:<20} {:<20} {:<10} {:<12}",
                "SALE001", "Land Cruiser ZX Gasoline 2024", "Muhammad Abdullah Khan", "Sana", "2500000.00", "2024-06-30"
            )
        );
    }

    #[test]
    fn test_compact_layout_truncates_names() {
        let (cars, customers, employees) = fixtures();
        let report = SalesReport::build(
            &[sale("SALE001", "C1")],
            |id| cars.get(id),
            |id| customers.get(id),
            |id| employees.get(id),
        );

        let text = report.render_text(ReportLayout::Compact);
        let row = text.lines().nth(2).unwrap();

        assert!(row.starts_with("SALE001  Land Cruiser Z  Muhammad Ab  Sana         2500000.00 2024-06-30"));
        assert_eq!(text.lines().nth(1).unwrap(), "-".repeat(72));
    }

    #[test]
    fn test_unread_amount_and_date_print_as_missing() {
        let (cars, customers, employees) = fixtures();
        let mut blank = sale("SALE002", "C1");
        blank.amount = Money::zero();
        blank.date = NaiveDate::default();
        blank.unread = UnreadColumns { amount: true, date: Some(UnreadDate::Null) };

        let report = SalesReport::build(
            &[sale("SALE001", "C1"), blank],
            |id| cars.get(id),
            |id| customers.get(id),
            |id| employees.get(id),
        );

        assert_eq!(report.rows[1].amount, None);
        assert_eq!(report.rows[1].date, None);
        assert_eq!(report.total().cents(), 2_500_000_00);

        let text = report.render_text(ReportLayout::Wide);
        let row = text.lines().nth(3).unwrap();
        assert_eq!(
            row,
            format!(
                "{:<8} {:<25} {:<20} {:<20} {:<10} {:<12}",
                "SALE002", "Land Cruiser ZX Gasoline 2024", "Muhammad Abdullah Khan", "Sana", "-", "-"
            )
        );
        assert!(!row.contains("0.00"));
        assert!(!text.contains("1970-01-01"));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Crème brûlée", 5), "Crème");
        assert_eq!(truncate("abc", 5), "abc");
    }

    #[test]
    fn test_empty_report() {
        let report = SalesReport::default();
        assert!(report.is_empty());
        assert_eq!(report.total(), Money::zero());
        assert_eq!(report.render_text(ReportLayout::Wide).lines().count(), 2);
    }
}
