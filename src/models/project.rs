use rust_decimal::Decimal;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectStatus {
    #[default]
    Working,
    Paused,
    Finished,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "Trabalhando",
            Self::Paused => "Pausado",
            Self::Finished => "Finalizado",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "trabalhando" | "working" | "active" => Ok(Self::Working),
            "pausado" | "paused" => Ok(Self::Paused),
            "finalizado" | "finished" | "done" => Ok(Self::Finished),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }

    pub fn all() -> &'static [ProjectStatus] {
        &[Self::Working, Self::Paused, Self::Finished]
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A freelance job and what the client has paid so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Option<i64>,
    pub name: String,
    pub project_types: Vec<String>,
    pub value: Decimal,
    pub amount_paid: Decimal,
    pub image_url: String,
    pub status: ProjectStatus,
    /// Display position, assigned by the store on insert.
    pub order: i64,
}

impl Project {
    pub fn new(name: &str, value: Decimal, amount_paid: Decimal) -> Result<Self, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if value < Decimal::ZERO {
            return Err(Error::NegativeAmount(value.to_string()));
        }
        if amount_paid < Decimal::ZERO {
            return Err(Error::NegativeAmount(amount_paid.to_string()));
        }
        Ok(Self {
            id: None,
            name: name.to_string(),
            project_types: Vec::new(),
            value,
            amount_paid,
            image_url: String::new(),
            status: ProjectStatus::default(),
            order: 0,
        })
    }

    /// Set the project types from a comma separated list, dropping blanks.
    pub fn with_types(mut self, types: &str) -> Self {
        self.project_types = split_types(types);
        self
    }

    pub fn types_label(&self) -> String {
        self.project_types.join(", ")
    }

    /// What the client still owes. Negative if overpaid.
    pub fn outstanding(&self) -> Decimal {
        self.value.saturating_sub(self.amount_paid)
    }

    pub fn is_paid_off(&self) -> bool {
        self.amount_paid >= self.value
    }
}

pub(crate) fn split_types(types: &str) -> Vec<String> {
    types
        .split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
