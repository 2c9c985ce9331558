//! bizplan - a local-first manager for structured business plans
//!
//! Plans are kept in a [`store::PlanStore`], persisted through a
//! [`db::PersistenceGateway`] and exchanged as JSON export files.

pub mod commands;
pub mod config;
pub mod db;
pub mod display;
pub mod editing;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod store;
pub mod templates;
pub mod transfer;
pub mod validation;

pub use error::{PlanError, Result};
