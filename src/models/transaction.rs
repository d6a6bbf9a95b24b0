use rust_decimal::Decimal;

use super::month::Month;
use crate::error::Error;
use crate::money::{round_cents, AmountFormat};

/// Largest amount accepted from user input, in whole reais.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Label used when a transaction is saved without one.
pub const DEFAULT_TRANSACTION_TYPE: &str = "Pagamento";

/// One ledger line: what was earned and what was owed in a month.
///
/// Amounts stay as the strings that were stored; they are only interpreted
/// when aggregated, so older or half-entered records remain visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub year: i32,
    pub month: Month,
    pub earned: String,
    pub owed: String,
    pub transaction_type: String,
    pub paid: bool,
}

impl Transaction {
    pub fn new(
        year: i32,
        month: Month,
        earned: impl Into<String>,
        owed: impl Into<String>,
        transaction_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            year,
            month,
            earned: earned.into(),
            owed: owed.into(),
            transaction_type: transaction_type.into(),
            paid: false,
        }
    }

    /// Whether the store has assigned an id yet.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// `(year, month, transaction_type)` identifies the record a new entry
    /// for the same period replaces.
    pub fn has_key(&self, year: i32, month: Month, transaction_type: &str) -> bool {
        self.year == year && self.month == month && self.transaction_type == transaction_type
    }

    pub fn earned_amount(&self, format: AmountFormat) -> Decimal {
        format.parse(self.earned.as_str())
    }

    pub fn owed_amount(&self, format: AmountFormat) -> Decimal {
        format.parse(self.owed.as_str())
    }
}

/// Raw form input for a transaction, before validation.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub year: i32,
    pub month: String,
    pub earned: String,
    pub owed: String,
    pub transaction_type: String,
}

impl TransactionDraft {
    /// Check the draft and turn it into an unsaved, unpaid [`Transaction`]
    /// with amounts normalised to two decimals.
    pub fn validate(&self, format: AmountFormat) -> Result<Transaction, Error> {
        let month = Month::parse(&self.month)?;
        let earned = validate_amount(&self.earned, format)?;
        let owed = validate_amount(&self.owed, format)?;
        let transaction_type = match self.transaction_type.trim() {
            "" => DEFAULT_TRANSACTION_TYPE.to_string(),
            t => t.to_string(),
        };
        Ok(Transaction::new(self.year, month, earned, owed, transaction_type))
    }
}

/// Validate one user-entered amount and return it in stored form.
/// Blank input is zero.
pub(crate) fn validate_amount(raw: &str, format: AmountFormat) -> Result<String, Error> {
    let value = parse_amount(raw, format)?;
    Ok(format!("{:.2}", value))
}

/// Like [`validate_amount`] but returns the number itself.
pub fn parse_amount(raw: &str, format: AmountFormat) -> Result<Decimal, Error> {
    if raw.trim().is_empty() {
        return Ok(round_cents(Decimal::ZERO));
    }
    let value = format
        .try_parse(raw)
        .ok_or_else(|| Error::InvalidAmount(raw.to_string()))?;
    if value < Decimal::ZERO {
        return Err(Error::NegativeAmount(raw.to_string()));
    }
    if value > Decimal::from(MAX_AMOUNT) {
        return Err(Error::AmountTooLarge(raw.to_string()));
    }
    Ok(round_cents(value))
}
