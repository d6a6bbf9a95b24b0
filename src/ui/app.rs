use anyhow::Result;
use std::collections::BTreeSet;

use finboard::aggregate::{Aggregator, Totals, YearLedger};
use finboard::config::Config;
use finboard::models::{CreditCard, Month, Project, SavingsGoal, Transaction};
use finboard::money::AmountFormat;
use finboard::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Ledger,
    Cards,
    Goals,
    Projects,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Ledger, Self::Cards, Self::Goals, Self::Projects]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ledger => write!(f, "Ledger"),
            Self::Cards => write!(f, "Cards"),
            Self::Goals => write!(f, "Goals"),
            Self::Projects => write!(f, "Projects"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, label: String },
    DeleteCard { id: i64, name: String },
    DeleteGoal { id: i64, name: String },
    DeleteProject { id: i64, name: String },
}

/// One visible line of the ledger table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LedgerRow<'a> {
    Month(Month),
    Entry(&'a Transaction),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) aggregator: Aggregator,

    // Ledger
    pub(crate) selected_year: i32,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) totals: Totals,
    pub(crate) expanded: BTreeSet<Month>,
    pub(crate) ledger_index: usize,
    pub(crate) ledger_scroll: usize,

    // Cards
    pub(crate) cards: Vec<CreditCard>,
    pub(crate) card_index: usize,
    pub(crate) card_scroll: usize,

    // Goals
    pub(crate) goals: Vec<SavingsGoal>,
    pub(crate) goal_index: usize,
    pub(crate) goal_scroll: usize,

    // Projects
    pub(crate) projects: Vec<Project>,
    pub(crate) project_index: usize,
    pub(crate) project_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            running: true,
            screen: Screen::Ledger,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            aggregator: Aggregator::new(config.amount_format),

            selected_year: config.default_year,
            transactions: Vec::new(),
            totals: Totals::default(),
            expanded: BTreeSet::new(),
            ledger_index: 0,
            ledger_scroll: 0,

            cards: Vec::new(),
            card_index: 0,
            card_scroll: 0,

            goals: Vec::new(),
            goal_index: 0,
            goal_scroll: 0,

            projects: Vec::new(),
            project_index: 0,
            project_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn format(&self) -> AmountFormat {
        self.aggregator.format()
    }

    // ── Refresh ───────────────────────────────────────────────

    pub(crate) fn refresh_ledger(&mut self, store: &dyn Store) -> Result<()> {
        self.transactions = store.get_transactions()?;
        self.totals = self.aggregator.compute_totals(&self.transactions);
        let len = self.ledger_rows().len();
        clamp_index(&mut self.ledger_index, &mut self.ledger_scroll, len);
        Ok(())
    }

    pub(crate) fn refresh_cards(&mut self, store: &dyn Store) -> Result<()> {
        self.cards = store.get_cards()?;
        clamp_index(&mut self.card_index, &mut self.card_scroll, self.cards.len());
        Ok(())
    }

    pub(crate) fn refresh_goals(&mut self, store: &dyn Store) -> Result<()> {
        self.goals = store.get_goals()?;
        clamp_index(&mut self.goal_index, &mut self.goal_scroll, self.goals.len());
        Ok(())
    }

    pub(crate) fn refresh_projects(&mut self, store: &dyn Store) -> Result<()> {
        self.projects = store.get_projects()?;
        clamp_index(
            &mut self.project_index,
            &mut self.project_scroll,
            self.projects.len(),
        );
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, store: &dyn Store) -> Result<()> {
        self.refresh_ledger(store)?;
        self.refresh_cards(store)?;
        self.refresh_goals(store)?;
        self.refresh_projects(store)?;
        Ok(())
    }

    // ── Ledger view ───────────────────────────────────────────

    pub(crate) fn year_ledger(&self) -> YearLedger<'_> {
        self.aggregator
            .group_by_period(&self.transactions, self.selected_year)
    }

    /// Month rows in calendar order, each followed by its entries when
    /// expanded.
    pub(crate) fn ledger_rows(&self) -> Vec<LedgerRow<'_>> {
        let ledger = self.year_ledger();
        let mut rows = Vec::with_capacity(12 + ledger.entry_count());
        for (month, rollup) in ledger.iter() {
            rows.push(LedgerRow::Month(month));
            if self.expanded.contains(&month) {
                rows.extend(rollup.entries.iter().map(|t| LedgerRow::Entry(*t)));
            }
        }
        rows
    }

    pub(crate) fn selected_row(&self) -> Option<LedgerRow<'_>> {
        self.ledger_rows().get(self.ledger_index).copied()
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        match self.selected_row()? {
            LedgerRow::Entry(txn) => Some(txn),
            LedgerRow::Month(_) => None,
        }
    }

    /// The month under the cursor, or the month of the entry under it.
    pub(crate) fn selected_month(&self) -> Option<Month> {
        match self.selected_row()? {
            LedgerRow::Month(month) => Some(month),
            LedgerRow::Entry(txn) => Some(txn.month),
        }
    }

    /// Expand or collapse the month under the cursor. The cursor stays on
    /// the month row.
    pub(crate) fn toggle_selected_month(&mut self) {
        let Some(month) = self.selected_month() else {
            return;
        };
        if !self.expanded.remove(&month) {
            self.expanded.insert(month);
        }
        if let Some(pos) = self
            .ledger_rows()
            .iter()
            .position(|r| *r == LedgerRow::Month(month))
        {
            self.ledger_index = pos;
        }
    }

    pub(crate) fn set_year(&mut self, year: i32) {
        self.selected_year = year;
        self.expanded.clear();
        self.ledger_index = 0;
        self.ledger_scroll = 0;
    }

    pub(crate) fn selected_card(&self) -> Option<&CreditCard> {
        self.cards.get(self.card_index)
    }

    pub(crate) fn selected_goal(&self) -> Option<&SavingsGoal> {
        self.goals.get(self.goal_index)
    }

    pub(crate) fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.project_index)
    }

    // ── Layout helpers ────────────────────────────────────────

    /// Rows that fit in a bordered table with a header line.
    pub(crate) fn table_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    /// Rows of the ledger table, which sits below the summary cards.
    pub(crate) fn ledger_page(&self) -> usize {
        self.visible_rows.saturating_sub(3 + SUMMARY_HEIGHT).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn confirm(&mut self, message: String, action: PendingAction) {
        self.confirm_message = message;
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }
}

/// Height of the ledger screen's summary cards.
pub(crate) const SUMMARY_HEIGHT: usize = 5;

fn clamp_index(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
