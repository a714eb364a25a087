//! # Validation Module
//!
//! Turns raw form text into typed entity records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (caller)                                                │
//! │  └── Collects every field as text, picker values as "ID - label"       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields present (after trimming)                          │
//! │  ├── Money parsed exactly, measures as finite numbers                  │
//! │  └── Dates in YYYY-MM-DD                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── PRIMARY KEY uniqueness                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dealer_core::validation::SaleForm;
//!
//! let form = SaleForm {
//!     car: "C1 - Corolla GLi".into(),
//!     customer: "CU1 - Bilal".into(),
//!     employee: "E1 - Sana".into(),
//!     amount: "2450000".into(),
//!     date: "2024-07-01".into(),
//! };
//! let draft = form.validate().unwrap();
//! assert_eq!(draft.car_id, "C1");
//! assert_eq!(draft.amount.to_string(), "2450000.00");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{Car, CommissionRate, Customer, Employee, SaleDraft};

/// Separator between id and label in picker values.
pub const SELECTION_SEPARATOR: &str = " - ";

/// Date format accepted for sale dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Field Parsers
// =============================================================================

/// Returns the trimmed value, or `Required` when it is blank.
pub fn required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

/// Parses a money amount such as `"2450000"` or `"1999.99"`.
///
/// ## Example
/// ```rust
/// use dealer_core::validation::parse_money;
///
/// assert_eq!(parse_money("salary", "50000.00").unwrap().cents(), 5_000_000);
/// assert!(parse_money("salary", "fifty").is_err());
/// assert!(parse_money("salary", "1.999").is_err());
/// ```
pub fn parse_money(field: &str, value: &str) -> ValidationResult<Money> {
    let value = required(field, value)?;

    if let Some(money) = Money::parse_decimal(&value) {
        return Ok(money);
    }

    if has_excess_fraction_digits(&value) {
        return Err(ValidationError::invalid_format(
            field,
            "at most two decimal places",
        ));
    }

    Err(ValidationError::not_numeric(field, value))
}

/// Plain decimal text (`123.456`, `-0.125`) with more than two fraction digits.
fn has_excess_fraction_digits(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let Some((whole, fraction)) = unsigned.split_once('.') else {
        return false;
    };

    whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.len() > 2
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Like [`parse_money`] but a blank value means zero.
pub fn parse_optional_money(field: &str, value: &str) -> ValidationResult<Money> {
    if value.trim().is_empty() {
        return Ok(Money::zero());
    }
    parse_money(field, value)
}

/// Parses a measurement (mileage, weight). Blank means 0.
pub fn parse_measure(field: &str, value: &str) -> ValidationResult<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(ValidationError::not_numeric(field, value)),
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD"))
}

/// Reduces a picker value to its id.
///
/// ```rust
/// use dealer_core::validation::selection_id;
///
/// assert_eq!(selection_id("C1 - Corolla GLi"), "C1");
/// assert_eq!(selection_id("  C2  "), "C2");
/// ```
pub fn selection_id(value: &str) -> &str {
    match value.split_once(SELECTION_SEPARATOR) {
        Some((id, _)) => id.trim(),
        None => value.trim(),
    }
}

fn required_selection(field: &str, value: &str) -> ValidationResult<String> {
    required(field, selection_id(value))
}

// =============================================================================
// Forms
// =============================================================================

/// Car entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarForm {
    pub id: String,
    pub model: String,
    pub variant: String,
    pub price: String,
    pub mileage: String,
    pub color: String,
    #[serde(rename = "type")]
    pub car_type: String,
    pub weight: String,
    pub number_plate: String,
    pub chassis_number: String,
}

impl CarForm {
    pub fn validate(&self) -> ValidationResult<Car> {
        Ok(Car {
            id: required("id", &self.id)?,
            model: required("model", &self.model)?,
            variant: required("variant", &self.variant)?,
            price: parse_optional_money("price", &self.price)?,
            mileage: parse_measure("mileage", &self.mileage)?,
            color: self.color.trim().to_string(),
            car_type: self.car_type.trim().to_string(),
            weight: parse_measure("weight", &self.weight)?,
            number_plate: self.number_plate.trim().to_string(),
            chassis_number: self.chassis_number.trim().to_string(),
        })
    }
}

/// Customer entry form. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl CustomerForm {
    pub fn validate(&self) -> ValidationResult<Customer> {
        Ok(Customer {
            id: required("id", &self.id)?,
            name: required("name", &self.name)?,
            phone: required("phone", &self.phone)?,
            email: required("email", &self.email)?,
        })
    }
}

/// Employee entry form.
///
/// New employees always start on the standard commission rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeForm {
    pub id: String,
    pub name: String,
    pub salary: String,
}

impl EmployeeForm {
    pub fn validate(&self) -> ValidationResult<Employee> {
        Ok(Employee {
            id: required("id", &self.id)?,
            name: required("name", &self.name)?,
            salary: parse_money("salary", &self.salary)?,
            commission_rate: CommissionRate::STANDARD,
        })
    }
}

/// Sell-car form. Picker fields may carry `"ID - label"` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleForm {
    pub car: String,
    pub customer: String,
    pub employee: String,
    pub amount: String,
    pub date: String,
}

impl SaleForm {
    /// Produces a draft; the id is assigned when the sale is recorded.
    pub fn validate(&self) -> ValidationResult<SaleDraft> {
        Ok(SaleDraft {
            car_id: required_selection("car", &self.car)?,
            customer_id: required_selection("customer", &self.customer)?,
            employee_id: required_selection("employee", &self.employee)?,
            amount: parse_money("amount", &self.amount)?,
            date: parse_date("date", &self.date)?,
        })
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Trimmed, non-blank login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationResult<Credentials> {
        Ok(Credentials {
            username: required("username", &self.username)?,
            password: required("password", &self.password)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn car_form() -> CarForm {
        CarForm {
            id: " C1 ".into(),
            model: "Corolla".into(),
            variant: "GLi".into(),
            price: "2450000.50".into(),
            mileage: "12000".into(),
            color: "White".into(),
            car_type: "Sedan".into(),
            weight: "1250.5".into(),
            number_plate: "LEA-1234".into(),
            chassis_number: "NZE161".into(),
        }
    }

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("name", "  Ali ").unwrap(), "Ali");
        assert_eq!(required("name", "   "), Err(ValidationError::required("name")));
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("amount", "1000").unwrap().cents(), 100_000);
        assert_eq!(parse_money("amount", "").unwrap_err(), ValidationError::required("amount"));
        assert!(matches!(
            parse_money("amount", "12.345"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(
            parse_money("amount", "12k"),
            Err(ValidationError::not_numeric("amount", "12k"))
        );
        assert!(matches!(
            parse_money("amount", "NaN"),
            Err(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_parse_money_precision_message_only_for_plain_decimals() {
        for too_precise in ["12.345", "-0.125", ".999"] {
            assert!(
                matches!(parse_money("amount", too_precise), Err(ValidationError::InvalidFormat { .. })),
                "{too_precise}"
            );
        }
        for not_numeric in ["1e3", "1.5e2", "12.3.45", "12.34x5", "inf"] {
            assert_eq!(
                parse_money("amount", not_numeric),
                Err(ValidationError::not_numeric("amount", not_numeric)),
            );
        }
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure("mileage", "").unwrap(), 0.0);
        assert_eq!(parse_measure("mileage", "15000.5").unwrap(), 15000.5);
        assert!(parse_measure("mileage", "inf").is_err());
        assert!(parse_measure("weight", "heavy").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date", "2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(
            parse_date("date", "29/02/2024"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_date("date", "2023-02-29").is_err());
    }

    #[test]
    fn test_selection_id() {
        assert_eq!(selection_id("E1 - Sana Khan"), "E1");
        assert_eq!(selection_id("E1"), "E1");
        assert_eq!(selection_id(""), "");
    }

    #[test]
    fn test_car_form() {
        let car = car_form().validate().unwrap();
        assert_eq!(car.id, "C1");
        assert_eq!(car.price.cents(), 245_000_050);
        assert_eq!(car.weight, 1250.5);

        let mut form = car_form();
        form.price.clear();
        assert!(form.validate().unwrap().price.is_zero());

        let mut form = car_form();
        form.variant = " ".into();
        assert_eq!(form.validate().unwrap_err().field(), "variant");
    }

    #[test]
    fn test_customer_form_requires_every_field() {
        let form = CustomerForm {
            id: "CU1".into(),
            name: "Bilal".into(),
            phone: "0300-1234567".into(),
            email: String::new(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::required("email"));
    }

    #[test]
    fn test_employee_form() {
        let form = EmployeeForm {
            id: "E1".into(),
            name: "Sana".into(),
            salary: "50000.00".into(),
        };
        let employee = form.validate().unwrap();
        assert_eq!(employee.salary.cents(), 5_000_000);
        assert_eq!(employee.commission_rate, CommissionRate::STANDARD);
    }

    #[test]
    fn test_sale_form() {
        let form = SaleForm {
            car: "C1 - Corolla GLi".into(),
            customer: "CU1 - Bilal".into(),
            employee: "E1 - Sana".into(),
            amount: "2450000".into(),
            date: "2024-07-01".into(),
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.customer_id, "CU1");
        assert_eq!(draft.employee_id, "E1");

        let missing = SaleForm {
            employee: " - ".into(),
            ..form
        };
        assert_eq!(missing.validate().unwrap_err().field(), "employee");
    }

    #[test]
    fn test_login_form_trims() {
        let form = LoginForm {
            username: " admin ".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate().unwrap().username, "admin");

        let blank = LoginForm {
            username: "admin".into(),
            password: "  ".into(),
        };
        assert_eq!(blank.validate().unwrap_err().field(), "password");
    }
}
