pub(crate) mod cards;
pub(crate) mod goals;
pub(crate) mod ledger;
pub(crate) mod projects;
