//! The persistence service: CRUD over the transaction, card, goal and
//! project collections, keyed by an opaque id the store assigns.
//!
//! Callers are handed a `Store` at construction time. Nothing reaches for a
//! global connection.

mod schema;
mod sqlite;

use anyhow::Result;

use crate::error::Error;
use crate::models::{CreditCard, Month, Project, SavingsGoal, Transaction};

pub use sqlite::SqliteStore;

/// What [`Store::upsert_transaction`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(i64),
    Updated(i64),
}

impl Upsert {
    pub fn id(&self) -> i64 {
        match self {
            Self::Inserted(id) | Self::Updated(id) => *id,
        }
    }
}

pub trait Store {
    // ── Transactions ──────────────────────────────────────────

    fn insert_transaction(&mut self, txn: &Transaction) -> Result<i64>;

    /// Overwrite every field of record `id` except the id itself.
    fn update_transaction(&mut self, id: i64, txn: &Transaction) -> Result<()>;

    fn delete_transaction(&mut self, id: i64) -> Result<()>;

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>>;

    /// Every transaction, ordered by year, month and id.
    fn get_transactions(&self) -> Result<Vec<Transaction>>;

    fn find_transaction_by_key(
        &self,
        year: i32,
        month: Month,
        transaction_type: &str,
    ) -> Result<Option<Transaction>>;

    fn set_transaction_paid(&mut self, id: i64, paid: bool) -> Result<()> {
        let mut txn = self.get_transaction(id)?.ok_or(Error::NotFound {
            kind: "transaction",
            id,
        })?;
        txn.paid = paid;
        self.update_transaction(id, &txn)
    }

    /// Insert `txn` unless a record with the same `(year, month,
    /// transaction_type)` exists, in which case that record is overwritten.
    fn upsert_transaction(&mut self, txn: &Transaction) -> Result<Upsert> {
        let existing = self.find_transaction_by_key(txn.year, txn.month, &txn.transaction_type)?;
        match existing.and_then(|t| t.id) {
            Some(id) => {
                self.update_transaction(id, txn)?;
                tracing::debug!(id, year = txn.year, month = %txn.month, "upsert updated existing transaction");
                Ok(Upsert::Updated(id))
            }
            None => {
                let id = self.insert_transaction(txn)?;
                tracing::debug!(id, year = txn.year, month = %txn.month, "upsert inserted transaction");
                Ok(Upsert::Inserted(id))
            }
        }
    }

    // ── Cards ─────────────────────────────────────────────────

    fn insert_card(&mut self, card: &CreditCard) -> Result<i64>;
    fn update_card(&mut self, id: i64, card: &CreditCard) -> Result<()>;
    fn delete_card(&mut self, id: i64) -> Result<()>;
    fn get_cards(&self) -> Result<Vec<CreditCard>>;

    // ── Goals ─────────────────────────────────────────────────

    fn insert_goal(&mut self, goal: &SavingsGoal) -> Result<i64>;
    fn update_goal(&mut self, id: i64, goal: &SavingsGoal) -> Result<()>;
    fn delete_goal(&mut self, id: i64) -> Result<()>;
    fn get_goals(&self) -> Result<Vec<SavingsGoal>>;

    // ── Projects ──────────────────────────────────────────────

    /// Insert at the end of the list. The project's own `order` is ignored.
    fn insert_project(&mut self, project: &Project) -> Result<i64>;
    fn update_project(&mut self, id: i64, project: &Project) -> Result<()>;
    fn delete_project(&mut self, id: i64) -> Result<()>;
    /// Projects in display order.
    fn get_projects(&self) -> Result<Vec<Project>>;
}
