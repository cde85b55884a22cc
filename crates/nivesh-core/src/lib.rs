//! Nivesh Core Library
//!
//! Shared functionality for the Nivesh personal-finance dashboard:
//! - Domain models for EPF contributions, SIP plans, investments, expenses,
//!   bank accounts, and salary records
//! - Calendar-month arithmetic
//! - Auth/session client for the hosted backend
//! - REST row-store client (storage and isolation live on the backend)
//! - Recurring-contribution reconciler
//! - Derived reports (net worth, savings rate, category breakdown,
//!   year-over-year)
//! - CSV export

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod period;
pub mod reconcile;
pub mod reports;
pub mod store;

pub use auth::{AuthClient, Session};
pub use config::Config;
pub use error::{Error, Result};
pub use period::Month;
pub use reconcile::{ContributionStore, ObligationStatus, ReconcileOutcome, ReconcilePlan};
pub use store::{MemoryStore, RestStore};
