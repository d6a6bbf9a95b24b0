//! finboard: a personal finance ledger for the terminal.
//!
//! [`aggregate`] turns a list of monthly transactions into summary totals
//! and a twelve-month ledger. [`store`] persists transactions, credit cards,
//! savings goals and freelance projects. The binary wraps both in a TUI and
//! a small CLI.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod money;
pub mod store;

pub use error::Error;
