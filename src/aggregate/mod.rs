//! Summary totals and per-month rollups over a snapshot of transactions.
//!
//! Everything here is a pure function of its input slice. Nothing is cached
//! between calls and nothing can fail: amounts that do not parse count as
//! zero, and sums saturate at `Decimal::MAX`/`Decimal::MIN` instead of
//! overflowing.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Month, Transaction};
use crate::money::AmountFormat;

/// Totals for the summary cards.
///
/// `total_owed` only ever accumulates outstanding debt, as a negative
/// number. Debt on a paid transaction is netted into `total_earned`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_earned: Decimal,
    pub total_owed: Decimal,
    pub net_amount: Decimal,
}

impl Totals {
    pub fn is_positive(&self) -> bool {
        self.net_amount >= Decimal::ZERO
    }
}

/// One month's row in the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthRollup<'a> {
    pub earned_sum: Decimal,
    pub owed_sum: Decimal,
    /// The month's transactions, in input order.
    pub entries: Vec<&'a Transaction>,
}

impl MonthRollup<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn balance(&self) -> Decimal {
        self.earned_sum.saturating_sub(self.owed_sum)
    }
}

/// A year's transactions partitioned by month. Every month is present.
#[derive(Debug, Clone, PartialEq)]
pub struct YearLedger<'a> {
    pub year: i32,
    pub months: BTreeMap<Month, MonthRollup<'a>>,
}

impl<'a> YearLedger<'a> {
    pub fn month(&self, month: Month) -> Option<&MonthRollup<'a>> {
        self.months.get(&month)
    }

    /// Months in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Month, &MonthRollup<'a>)> {
        self.months.iter().map(|(m, r)| (*m, r))
    }

    pub fn earned_total(&self) -> Decimal {
        self.months
            .values()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.earned_sum))
    }

    pub fn owed_total(&self) -> Decimal {
        self.months
            .values()
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.owed_sum))
    }

    /// Earned minus owed over the whole year.
    pub fn balance(&self) -> Decimal {
        self.earned_total().saturating_sub(self.owed_total())
    }

    pub fn entry_count(&self) -> usize {
        self.months.values().map(|r| r.entries.len()).sum()
    }

    /// Entries in this year not yet marked paid.
    pub fn open_count(&self) -> usize {
        self.months
            .values()
            .flat_map(|r| &r.entries)
            .filter(|t| !t.paid)
            .count()
    }
}

/// Runs the aggregations with a chosen amount format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    format: AmountFormat,
}

impl Aggregator {
    pub fn new(format: AmountFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> AmountFormat {
        self.format
    }

    pub fn compute_totals(&self, transactions: &[Transaction]) -> Totals {
        let mut total_earned = Decimal::ZERO;
        let mut total_owed = Decimal::ZERO;

        for txn in transactions {
            let earned = txn.earned_amount(self.format);
            let owed = txn.owed_amount(self.format);
            if txn.paid {
                total_earned = total_earned.saturating_add(earned.saturating_sub(owed));
            } else {
                total_earned = total_earned.saturating_add(earned);
                total_owed = total_owed.saturating_sub(owed);
            }
        }

        Totals {
            total_earned,
            total_owed,
            net_amount: total_earned.saturating_add(total_owed),
        }
    }

    pub fn group_by_period<'a>(&self, transactions: &'a [Transaction], year: i32) -> YearLedger<'a> {
        let mut months: BTreeMap<Month, MonthRollup<'a>> = Month::all()
            .iter()
            .map(|m| (*m, MonthRollup::default()))
            .collect();

        for txn in transactions.iter().filter(|t| t.year == year) {
            let rollup = months.entry(txn.month).or_default();
            rollup.earned_sum = rollup.earned_sum.saturating_add(txn.earned_amount(self.format));
            rollup.owed_sum = rollup.owed_sum.saturating_add(txn.owed_amount(self.format));
            rollup.entries.push(txn);
        }

        YearLedger { year, months }
    }
}

/// [`Aggregator::compute_totals`] with the default amount format.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    Aggregator::default().compute_totals(transactions)
}

/// [`Aggregator::group_by_period`] with the default amount format.
pub fn group_by_period(transactions: &[Transaction], year: i32) -> YearLedger<'_> {
    Aggregator::default().group_by_period(transactions, year)
}

/// Distinct years that have at least one transaction, ascending.
pub fn years_present(transactions: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = transactions.iter().map(|t| t.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

#[cfg(test)]
mod tests;
