//! Finsight - personal finance metrics from the command line
//!
//! This library computes the numbers behind a personal finance dashboard
//! from a snapshot of transactions, budget categories, savings goals,
//! habits, and recurring transactions. Every computation is a pure
//! function of its inputs and an explicit "now".
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data types (money, transactions, budgets, goals, habits)
//! - `metrics`: The derived-metrics engine
//! - `scoring`: Financial health scorers (heuristic and language-model backed)
//! - `reports`: Report generation and CSV/JSON/YAML export
//! - `storage`: JSON snapshot storage
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `finsight` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use finsight::metrics::compute_recent_window_spending;
//! use finsight::storage::Snapshot;
//!
//! let snapshot = Snapshot::load("snapshot.json")?;
//! let window = compute_recent_window_spending(&snapshot.transactions, Utc::now(), 30)?;
//! println!("Spent {} over 30 days", window.total_spent);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod metrics;
pub mod models;
pub mod reports;
pub mod scoring;
pub mod storage;

pub use error::{FinsightError, FinsightResult};
