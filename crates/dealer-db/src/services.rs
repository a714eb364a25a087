//! # Dealership Services
//!
//! Screen-level operations built from the repositories: selling a car,
//! logging in, and assembling the two reports.
//!
//! ## Sell Car Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleForm (raw text)                                                    │
//! │       │ validate()                                                      │
//! │       ├── blank / non-numeric / bad date ──► ServiceError::Validation   │
//! │       ▼                                                                 │
//! │  SaleDraft                                                              │
//! │       │ sales().record_sale()                                           │
//! │       ├── store failure ──────────────────► ServiceError::Db            │
//! │       ▼                                                                 │
//! │  Sale { id: "SALE###", .. }                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::DbError;
use crate::pool::Database;
use dealer_core::commission::CommissionReport;
use dealer_core::report::SalesReport;
use dealer_core::validation::{LoginForm, SaleForm};
use dealer_core::{Car, Customer, Employee, Sale, User, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of a login attempt. A wrong password is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(User),
    InvalidCredentials,
}

/// Validates the form and records the sale under a freshly allocated id.
///
/// The car, customer and employee are not checked for existence.
pub async fn sell_car(db: &Database, form: &SaleForm) -> ServiceResult<Sale> {
    let draft = form.validate()?;
    Ok(db.sales().record_sale(draft).await?)
}

/// Checks a username/password pair. Unknown user and wrong password look
/// the same to the caller.
pub async fn login(db: &Database, form: &LoginForm) -> ServiceResult<LoginOutcome> {
    let credentials = form.validate()?;

    match db.users().get_by_username(&credentials.username).await? {
        Some(user) if user.password_matches(&credentials.password) => {
            info!(username = %user.username, "Login succeeded");
            Ok(LoginOutcome::Authenticated(user))
        }
        _ => {
            warn!(username = %credentials.username, "Login failed");
            Ok(LoginOutcome::InvalidCredentials)
        }
    }
}

/// Commission breakdown for one employee. Sales whose car is gone are left
/// out of the lines and the totals.
pub async fn commission_report(db: &Database, employee_id: &str) -> ServiceResult<CommissionReport> {
    let sales = db.sales().list_by_employee(employee_id).await?;
    let cars = index_by_id(db.cars().list_all().await?, |car: &Car| car.id.clone());

    Ok(CommissionReport::build(employee_id, &sales, |id| cars.get(id)))
}

/// Every sale with car, customer and employee names resolved.
pub async fn sales_report(db: &Database) -> ServiceResult<SalesReport> {
    let sales = db.sales().list_all().await?;
    let cars = index_by_id(db.cars().list_all().await?, |c: &Car| c.id.clone());
    let customers = index_by_id(db.customers().list_all().await?, |c: &Customer| c.id.clone());
    let employees = index_by_id(db.employees().list_all().await?, |e: &Employee| e.id.clone());

    Ok(SalesReport::build(
        &sales,
        |id| cars.get(id),
        |id| customers.get(id),
        |id| employees.get(id),
    ))
}

fn index_by_id<T, F>(items: Vec<T>, key: F) -> HashMap<String, T>
where
    F: Fn(&T) -> String,
{
    items.into_iter().map(|item| (key(&item), item)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
