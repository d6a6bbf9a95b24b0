use rust_decimal::Decimal;

use crate::error::Error;

/// Something being saved up for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsGoal {
    pub id: Option<i64>,
    pub name: String,
    /// Target amount.
    pub value: Decimal,
    pub saved_value: Decimal,
    pub image_url: String,
}

impl SavingsGoal {
    pub fn new(name: &str, value: Decimal, saved_value: Decimal) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if value < Decimal::ZERO {
            return Err(Error::NegativeAmount(value.to_string()));
        }
        if saved_value < Decimal::ZERO {
            return Err(Error::NegativeAmount(saved_value.to_string()));
        }
        Ok(Self {
            id: None,
            name: name.to_string(),
            value,
            saved_value,
            image_url: String::new(),
        })
    }

    pub fn with_image(mut self, image_url: &str) -> Self {
        self.image_url = image_url.trim().to_string();
        self
    }

    /// Percent of the target saved, capped at 100. Zero when there is no
    /// target.
    pub fn progress_percent(&self) -> Decimal {
        if self.value <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.saved_value
            .checked_div(self.value)
            .map_or(Decimal::ONE_HUNDRED, |share| {
                share.saturating_mul(Decimal::ONE_HUNDRED)
            })
            .min(Decimal::ONE_HUNDRED)
    }

    pub fn remaining(&self) -> Decimal {
        self.value.saturating_sub(self.saved_value).max(Decimal::ZERO)
    }

    pub fn is_reached(&self) -> bool {
        self.value > Decimal::ZERO && self.saved_value >= self.value
    }
}
