mod card;
mod goal;
mod month;
mod project;
mod transaction;

pub use card::CreditCard;
pub use goal::SavingsGoal;
pub use month::Month;
pub use project::{Project, ProjectStatus};
pub use transaction::{Transaction, TransactionDraft, DEFAULT_TRANSACTION_TYPE, MAX_AMOUNT};

pub(crate) use project::split_types;
pub use transaction::parse_amount;

#[cfg(test)]
mod tests;
