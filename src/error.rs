/// Domain errors raised when user input crosses into the models or a record
/// lookup misses.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A non-empty amount that contains no number at all.
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Earned, owed, limits and targets are never negative.
    #[error("amount cannot be negative: '{0}'")]
    NegativeAmount(String),

    /// Above [`crate::models::MAX_AMOUNT`].
    #[error("amount is too large: '{0}'")]
    AmountTooLarge(String),

    #[error("unknown month: '{0}'")]
    UnknownMonth(String),

    #[error("unknown project status: '{0}'")]
    UnknownStatus(String),

    #[error("name cannot be empty")]
    EmptyName,

    /// The store has no record of `kind` with this id.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
}
