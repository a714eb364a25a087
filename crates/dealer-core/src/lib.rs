//! # dealer-core: Pure Business Logic for Dealer Desk
//!
//! Everything about the dealership that can be decided without touching the
//! database lives here: entity records, money, form validation, sale id
//! sequencing and the two reports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dealer Desk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens / forms (callers)                    │   │
//! │  │   Cars ── Customers ── Employees ── Sales ── Commission ── Login │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw form text                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dealer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │ sequence │ │ commission/report│  │   │
//! │  │   │ Car, ... │ │  Money   │ │ SALE###  │ │ fixed-width text │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────────────────────────────────────────────────────┐ │   │
//! │  │   │ validation: CarForm, SaleForm, ... ──► typed records     │ │   │
//! │  │   └──────────────────────────────────────────────────────────┘ │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 dealer-db (persistence + services)              │   │
//! │  │        SQLite pool, migrations, Repository<E>, services         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity records (Car, Customer, Employee, Sale, User)
//! - [`money`] - Integer-cent money
//! - [`error`] - Validation errors
//! - [`validation`] - Form parsing
//! - [`sequence`] - `SALE###` id helpers
//! - [`commission`] - Per-employee commission report
//! - [`report`] - All-sales summary report
//!
//! ## Example Usage
//!
//! ```rust
//! use dealer_core::commission::COMMISSION_RATE;
//! use dealer_core::Money;
//!
//! let amount = Money::parse_decimal("2500000.00").unwrap();
//! assert_eq!(amount.apply_rate(COMMISSION_RATE).to_string(), "250000.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod money;
pub mod report;
pub mod sequence;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency prefix used by rendered reports unless configured otherwise.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Rs.";
