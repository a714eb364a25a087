//! # dealer-db: Database Layer for Dealer Desk
//!
//! SQLite storage for the dealership: settings, the connection pool,
//! migrations, one generic repository and the services built on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dealer Desk Data Flow                            │
//! │                                                                         │
//! │  Caller (sell-car screen, commission screen, seed tool)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dealer-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Settings    │    │   services    │    │  Migrations  │   │   │
//! │  │   │  (config.rs)  │    │ sell_car      │    │  (embedded)  │   │   │
//! │  │   └───────┬───────┘    │ login         │    │ 0001_initial │   │   │
//! │  │           ▼            │ reports       │    └──────────────┘   │   │
//! │  │   ┌───────────────┐    └───────┬───────┘                       │   │
//! │  │   │   Database    │◄───────────┘                               │   │
//! │  │   │   (pool.rs)   │──► Repository<Car | Customer | Employee |  │   │
//! │  │   └───────────────┘               Sale | User>                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │          <platform data dir>/dealer.db  (or ./dealer.db)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Settings file and environment overrides
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Generic repository and per-entity mappings
//! - [`services`] - Sell car, login, reports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dealer_db::{Database, Settings};
//!
//! let settings = Settings::load(None)?;
//! let db = Database::new(settings.to_db_config()).await?;
//!
//! let cars = db.cars().list_available().await?;
//! let next = db.sales().next_sale_id().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Settings, SettingsError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{Entity, Repository, RowOutcome};
pub use services::{LoginOutcome, ServiceError};
