//! # Commission Calculator
//!
//! Every sale earns the selling employee a flat share of the sale amount.
//!
//! ## Commission Report
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Employee E1 sales            Car lookup         Report line            │
//! │  ─────────────────            ──────────         ───────────            │
//! │  SALE001  C1  1000.00   ──►   Corolla GLi  ──►   1000.00 / 100.00       │
//! │  SALE004  C9   500.00   ──►   (absent)     ──►   skipped entirely       │
//! │  SALE007  C3  2500.00   ──►   Civic Oriel  ──►   2500.00 / 250.00       │
//! │                                                  ─────────────────      │
//! │                                     totals:      3500.00 / 350.00       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rate is [`COMMISSION_RATE`] for everybody. `Employee::commission_rate`
//! is stored with the employee but not consulted here.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::report::MISSING;
use crate::types::{Car, CommissionRate, Sale};

/// Rate applied to every sale: 10%.
pub const COMMISSION_RATE: CommissionRate = CommissionRate::STANDARD;

/// Shown when the employee has no sales at all.
pub const NO_SALES_MESSAGE: &str = "No sales found for this employee.";

const RULE_WIDTH: usize = 60;

/// Commission earned on one sale.
///
/// ```rust
/// use chrono::NaiveDate;
/// use dealer_core::commission::commission;
/// use dealer_core::{Money, Sale};
///
/// let sale = Sale {
///     id: "SALE001".into(),
///     car_id: "C1".into(),
///     customer_id: "CU1".into(),
///     employee_id: "E1".into(),
///     amount: Money::parse_decimal("1000.00").unwrap(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     unread: Default::default(),
/// };
/// assert_eq!(commission(&sale).to_string(), "100.00");
/// ```
pub fn commission(sale: &Sale) -> Money {
    sale.amount.apply_rate(COMMISSION_RATE)
}

/// One row of a commission report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionLine {
    pub sale_id: String,
    pub car_name: String,
    /// `None` when the sale's stored amount was NULL.
    pub price: Option<Money>,
    pub commission: Money,
}

/// Commission breakdown for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionReport {
    pub employee_id: String,
    pub rate: CommissionRate,
    /// Number of sales the employee has, including skipped ones.
    pub sale_count: usize,
    pub lines: Vec<CommissionLine>,
    pub total_sales: Money,
    pub total_commission: Money,
}

impl CommissionReport {
    /// Builds the report from an employee's sales.
    ///
    /// `car_lookup` resolves a car id; sales whose car is absent are left out
    /// of both the lines and the totals.
    pub fn build<'c, F>(employee_id: impl Into<String>, sales: &[Sale], car_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'c Car>,
    {
        let mut lines = Vec::with_capacity(sales.len());
        let mut total_sales = Money::zero();
        let mut total_commission = Money::zero();

        for sale in sales {
            let Some(car) = car_lookup(&sale.car_id) else {
                continue;
            };

            let earned = commission(sale);
            total_sales += sale.amount;
            total_commission += earned;

            lines.push(CommissionLine {
                sale_id: sale.id.clone(),
                car_name: car.display_name(),
                price: sale.known_amount(),
                commission: earned,
            });
        }

        CommissionReport {
            employee_id: employee_id.into(),
            rate: COMMISSION_RATE,
            sale_count: sales.len(),
            lines,
            total_sales,
            total_commission,
        }
    }

    /// True when the employee has at least one sale (even if every line was
    /// skipped for a missing car).
    pub fn has_sales(&self) -> bool {
        self.sale_count > 0
    }

    /// Renders the fixed-width text shown on the commission details screen.
    ///
    /// `currency` prefixes every amount, e.g. `"Rs."`.
    pub fn render_text(&self, currency: &str) -> String {
        if !self.has_sales() {
            return NO_SALES_MESSAGE.to_string();
        }

        let rule = "-".repeat(RULE_WIDTH);
        let mut out = String::new();

        out.push_str(&format!("{:<30} {:<15} {:<15}\n", "Car", "Price", "Commission"));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Commission Rate: {}\n\n", self.rate));

        for line in &self.lines {
            let price = match line.price {
                Some(price) => format!("{currency}{price:<13}"),
                None => format!("{MISSING:<width$}", width = currency.chars().count() + 13),
            };
            out.push_str(&format!(
                "{:<30} {} {}{:<13}\n",
                line.car_name, price, currency, line.commission
            ));
        }

        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Total Sales:      {}{}\n", currency, self.total_sales));
        out.push_str(&format!("Total Commission: {}{}", currency, self.total_commission));
        out
    }
}
