use rust_decimal::Decimal;

use super::transaction::validate_amount;
use crate::error::Error;
use crate::money::{parse_currency, AmountFormat};

/// A credit card with its limit and how much of it is in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub id: Option<i64>,
    pub name: String,
    pub logo_url: String,
    /// Card limit.
    pub available: String,
    pub used: String,
}

impl CreditCard {
    /// Build a card from form input. Amounts are stored normalised.
    pub fn new(
        name: &str,
        available: &str,
        used: &str,
        logo_url: &str,
        format: AmountFormat,
    ) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Self {
            id: None,
            name: name.to_string(),
            logo_url: logo_url.trim().to_string(),
            available: validate_amount(available, format)?,
            used: validate_amount(used, format)?,
        })
    }

    pub fn limit(&self) -> Decimal {
        parse_currency(self.available.as_str())
    }

    pub fn used_amount(&self) -> Decimal {
        parse_currency(self.used.as_str())
    }

    /// Limit still free to spend. Negative when the card is over its limit.
    pub fn remaining(&self) -> Decimal {
        self.limit().saturating_sub(self.used_amount())
    }

    /// Share of the limit in use, in percent. Zero for a card with no limit.
    pub fn usage_percent(&self) -> Decimal {
        let limit = self.limit();
        if limit.is_zero() {
            return Decimal::ZERO;
        }
        self.used_amount()
            .checked_div(limit)
            .map_or(Decimal::MAX, |share| share.saturating_mul(Decimal::ONE_HUNDRED))
    }
}
