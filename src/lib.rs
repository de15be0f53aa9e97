//! subkeep - billing normalization and projection for subscriptions
//!
//! This library answers cost questions about a user's recurring
//! subscriptions: monthly and annual equivalents across billing periods,
//! personal shares of cost-split subscriptions, which calendar day each
//! subscription bills on, and what would change if subscriptions were
//! cancelled or added.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `clock`: Time source for expiry checks
//! - `models`: Subscriptions, split policies and the pure billing rules
//! - `storage`: The subscription store seam and its in-memory/JSON implementation
//! - `reports`: Breakdown, trend, summary, recommendation and calendar builders
//! - `services`: Per-user report services and the simulation/undo engine
//! - `display`: Terminal rendering
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `subkeep` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use subkeep::models::{BillingPeriod, Money, Subscription, UserId};
//! use subkeep::services::DashboardService;
//! use subkeep::storage::MemoryStore;
//!
//! let user = UserId::new();
//! let store = MemoryStore::new();
//! store
//!     .insert(Subscription::new(
//!         user,
//!         "Cloud storage",
//!         Money::from_minor(120_000),
//!         BillingPeriod::Yearly,
//!         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!     ))
//!     .unwrap();
//!
//! let summary = DashboardService::new(&store).summary(user).unwrap();
//! assert_eq!(summary.monthly_total.minor(), 10_000);
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SubkeepError, SubkeepResult};
