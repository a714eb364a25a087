//! # Domain Types
//!
//! Entity records used throughout the dealership tool.
//!
//! ## Entity Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Car        │   │      Sale       │   │    Employee     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  car_id         │   │  id             │       │
//! │  │  model/variant  │   │  customer_id ───┼─┐ │  name           │       │
//! │  │  price (Money)  │   │  employee_id ───┼─┼►│  salary (Money) │       │
//! │  │  mileage/weight │   │  amount (Money) │ │ │  commission_rate│       │
//! │  └─────────────────┘   │  date           │ │ └─────────────────┘       │
//! │                        └─────────────────┘ │                            │
//! │  ┌─────────────────┐   ┌─────────────────┐ │                            │
//! │  │      User       │   │    Customer     │◄┘                            │
//! │  │  username       │   │  id, name       │                              │
//! │  │  password       │   │  phone, email   │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sale references are advisory: nothing checks that the car, customer or
//! employee exists when a sale is written, and deleting a car leaves its
//! sales in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission rate in basis points (1 bps = 0.01%).
///
/// 1000 bps = 10%, the rate every report applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommissionRate(u32);

impl CommissionRate {
    /// The standard 10% rate.
    pub const STANDARD: CommissionRate = CommissionRate(1000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    /// Creates a rate from a fraction such as `0.10`.
    pub fn from_fraction(fraction: f64) -> Self {
        CommissionRate((fraction * 10_000.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate::STANDARD
    }
}

/// `10.0%`
impl fmt::Display for CommissionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.1}%", self.percentage()))
    }
}

// =============================================================================
// Car
// =============================================================================

/// One physical vehicle in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub model: String,
    pub variant: String,
    pub price: Money,
    pub mileage: f64,
    pub color: String,
    #[serde(rename = "type")]
    pub car_type: String,
    /// Kilograms.
    pub weight: f64,
    pub number_plate: String,
    pub chassis_number: String,
}

impl Car {
    /// Human-readable name used by reports: `"{model} {variant}"`.
    ///
    /// Falls back to the id when both parts are missing.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.model, self.variant);
        let name = name.trim();
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }

    /// Picker label in `"ID - name"` form.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.display_name())
    }
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Customer {
    /// Picker label in `"ID - name"` form.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

// =============================================================================
// Employee
// =============================================================================

/// A salesperson.
///
/// `commission_rate` is persisted but reports always apply
/// [`crate::commission::COMMISSION_RATE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub salary: Money,
    #[serde(default)]
    pub commission_rate: CommissionRate,
}

impl Employee {
    /// Creates an employee on the standard commission rate.
    pub fn new(id: impl Into<String>, name: impl Into<String>, salary: Money) -> Self {
        Employee {
            id: id.into(),
            name: name.into(),
            salary,
            commission_rate: CommissionRate::STANDARD,
        }
    }

    /// Picker label in `"ID - name"` form.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. `id` has the form `SALE###`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub car_id: String,
    pub customer_id: String,
    pub employee_id: String,
    pub amount: Money,
    pub date: NaiveDate,
    /// Columns storage could not supply. Empty for sales built in code.
    #[serde(default, skip_serializing_if = "UnreadColumns::is_empty")]
    pub unread: UnreadColumns,
}

impl Sale {
    /// The amount, or `None` when it was NULL in storage and `amount` is
    /// only the zero default.
    pub fn known_amount(&self) -> Option<Money> {
        if self.unread.amount && self.amount.is_zero() {
            None
        } else {
            Some(self.amount)
        }
    }

    /// The date, or `None` when storage held NULL or unreadable text and
    /// `date` is only the 1970-01-01 default.
    pub fn known_date(&self) -> Option<NaiveDate> {
        if self.unread.date.is_some() && self.date == NaiveDate::default() {
            None
        } else {
            Some(self.date)
        }
    }
}

/// Sale columns that were NULL or unreadable when the row was loaded.
///
/// The matching [`Sale`] fields hold defaults in that case. A default that is
/// still in place when the sale is written back keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadColumns {
    /// `amount` was NULL.
    pub amount: bool,
    pub date: Option<UnreadDate>,
}

impl UnreadColumns {
    pub fn is_empty(&self) -> bool {
        !self.amount && self.date.is_none()
    }
}

/// What a sale's `date` column held instead of an ISO date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnreadDate {
    Null,
    /// Text that does not parse as `YYYY-MM-DD`, kept verbatim.
    Text(String),
}

/// A sale that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub car_id: String,
    pub customer_id: String,
    pub employee_id: String,
    pub amount: Money,
    pub date: NaiveDate,
}

impl SaleDraft {
    /// Attaches an id, producing the storable sale.
    pub fn with_id(self, id: impl Into<String>) -> Sale {
        Sale {
            id: id.into(),
            car_id: self.car_id,
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            amount: self.amount,
            date: self.date,
            unread: UnreadColumns::default(),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A login account. Passwords are stored and compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive password comparison.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
