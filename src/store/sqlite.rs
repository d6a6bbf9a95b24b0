use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::{schema, Store};
use crate::error::Error;
use crate::models::{split_types, CreditCard, Month, Project, ProjectStatus, SavingsGoal, Transaction};

const TRANSACTION_COLUMNS: &str = "id, year, month, earned, owed, transaction_type, paid";
const PROJECT_COLUMNS: &str =
    "id, name, project_types, value, amount_paid, image_url, status, sort_order";

/// [`Store`] backed by a local SQLite file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        tracing::info!(path = %path.display(), "opened database");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(from = current, to = schema::CURRENT_VERSION, "migrated schema");
        }

        Ok(())
    }

    /// Fail with [`Error::NotFound`] when a write touched no rows.
    fn expect_changed(changed: usize, kind: &'static str, id: i64) -> Result<()> {
        if changed == 0 {
            return Err(Error::NotFound { kind, id }.into());
        }
        Ok(())
    }
}

fn month_from_sql(n: u32) -> rusqlite::Result<Month> {
    Month::from_number(n).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Integer,
            Box::new(Error::UnknownMonth(n.to_string())),
        )
    })
}

fn decimal_from_sql(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_default()
}

fn transaction_from_row(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        year: row.get(1)?,
        month: month_from_sql(row.get(2)?)?,
        earned: row.get(3)?,
        owed: row.get(4)?,
        transaction_type: row.get(5)?,
        paid: row.get(6)?,
    })
}

fn project_from_row(row: &Row) -> rusqlite::Result<Project> {
    let types: String = row.get(2)?;
    let status: String = row.get(6)?;
    Ok(Project {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        project_types: split_types(&types),
        value: decimal_from_sql(&row.get::<_, String>(3)?),
        amount_paid: decimal_from_sql(&row.get::<_, String>(4)?),
        image_url: row.get(5)?,
        status: ProjectStatus::parse(&status).unwrap_or_default(),
        order: row.get(7)?,
    })
}

impl Store for SqliteStore {
    // ── Transactions ──────────────────────────────────────────

    fn insert_transaction(&mut self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (year, month, earned, owed, transaction_type, paid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                txn.year,
                txn.month.number(),
                txn.earned,
                txn.owed,
                txn.transaction_type,
                txn.paid,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "inserted transaction");
        Ok(id)
    }

    fn update_transaction(&mut self, id: i64, txn: &Transaction) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE transactions
             SET year = ?1, month = ?2, earned = ?3, owed = ?4, transaction_type = ?5, paid = ?6
             WHERE id = ?7",
            params![
                txn.year,
                txn.month.number(),
                txn.earned,
                txn.owed,
                txn.transaction_type,
                txn.paid,
                id,
            ],
        )?;
        Self::expect_changed(changed, "transaction", id)?;
        tracing::debug!(id, "updated transaction");
        Ok(())
    }

    fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Self::expect_changed(changed, "transaction", id)?;
        tracing::debug!(id, "deleted transaction");
        Ok(())
    }

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![id], transaction_from_row)
            .optional()?)
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY year, month, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn find_transaction_by_key(
        &self,
        year: i32,
        month: Month,
        transaction_type: &str,
    ) -> Result<Option<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE year = ?1 AND month = ?2 AND transaction_type = ?3
             ORDER BY id LIMIT 1"
        );
        Ok(self
            .conn
            .query_row(
                &sql,
                params![year, month.number(), transaction_type],
                transaction_from_row,
            )
            .optional()?)
    }

    fn set_transaction_paid(&mut self, id: i64, paid: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE transactions SET paid = ?1 WHERE id = ?2",
            params![paid, id],
        )?;
        Self::expect_changed(changed, "transaction", id)?;
        tracing::debug!(id, paid, "set transaction paid flag");
        Ok(())
    }

    // ── Cards ─────────────────────────────────────────────────

    fn insert_card(&mut self, card: &CreditCard) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO cards (name, logo_url, available, used) VALUES (?1, ?2, ?3, ?4)",
            params![card.name, card.logo_url, card.available, card.used],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %card.name, "inserted card");
        Ok(id)
    }

    fn update_card(&mut self, id: i64, card: &CreditCard) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET name = ?1, logo_url = ?2, available = ?3, used = ?4 WHERE id = ?5",
            params![card.name, card.logo_url, card.available, card.used, id],
        )?;
        Self::expect_changed(changed, "card", id)
    }

    fn delete_card(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?1", params![id])?;
        Self::expect_changed(changed, "card", id)
    }

    fn get_cards(&self) -> Result<Vec<CreditCard>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, logo_url, available, used FROM cards ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(CreditCard {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                logo_url: row.get(2)?,
                available: row.get(3)?,
                used: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Goals ─────────────────────────────────────────────────

    fn insert_goal(&mut self, goal: &SavingsGoal) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO goals (name, value, saved_value, image_url) VALUES (?1, ?2, ?3, ?4)",
            params![
                goal.name,
                goal.value.to_string(),
                goal.saved_value.to_string(),
                goal.image_url,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %goal.name, "inserted goal");
        Ok(id)
    }

    fn update_goal(&mut self, id: i64, goal: &SavingsGoal) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE goals SET name = ?1, value = ?2, saved_value = ?3, image_url = ?4 WHERE id = ?5",
            params![
                goal.name,
                goal.value.to_string(),
                goal.saved_value.to_string(),
                goal.image_url,
                id,
            ],
        )?;
        Self::expect_changed(changed, "goal", id)
    }

    fn delete_goal(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Self::expect_changed(changed, "goal", id)
    }

    fn get_goals(&self) -> Result<Vec<SavingsGoal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, value, saved_value, image_url FROM goals ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(SavingsGoal {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                value: decimal_from_sql(&row.get::<_, String>(2)?),
                saved_value: decimal_from_sql(&row.get::<_, String>(3)?),
                image_url: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Projects ──────────────────────────────────────────────

    fn insert_project(&mut self, project: &Project) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let next_order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM projects",
            [],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO projects (name, project_types, value, amount_paid, image_url, status, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project.name,
                project.project_types.join(";"),
                project.value.to_string(),
                project.amount_paid.to_string(),
                project.image_url,
                project.status.as_str(),
                next_order,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        tracing::debug!(id, order = next_order, name = %project.name, "inserted project");
        Ok(id)
    }

    fn update_project(&mut self, id: i64, project: &Project) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE projects
             SET name = ?1, project_types = ?2, value = ?3, amount_paid = ?4, image_url = ?5, status = ?6
             WHERE id = ?7",
            params![
                project.name,
                project.project_types.join(";"),
                project.value.to_string(),
                project.amount_paid.to_string(),
                project.image_url,
                project.status.as_str(),
                id,
            ],
        )?;
        Self::expect_changed(changed, "project", id)
    }

    fn delete_project(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Self::expect_changed(changed, "project", id)
    }

    fn get_projects(&self) -> Result<Vec<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY sort_order, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], project_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
