pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    year              INTEGER NOT NULL,
    month             INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    earned            TEXT NOT NULL DEFAULT '',
    owed              TEXT NOT NULL DEFAULT '',
    transaction_type  TEXT NOT NULL DEFAULT 'Pagamento',
    paid              BOOLEAN NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_transactions_period ON transactions(year, month);
CREATE INDEX IF NOT EXISTS idx_transactions_key ON transactions(year, month, transaction_type);

CREATE TABLE IF NOT EXISTS cards (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    logo_url   TEXT NOT NULL DEFAULT '',
    available  TEXT NOT NULL DEFAULT '',
    used       TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS goals (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    value        TEXT NOT NULL,
    saved_value  TEXT NOT NULL,
    image_url    TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS projects (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    project_types  TEXT NOT NULL DEFAULT '',
    value          TEXT NOT NULL,
    amount_paid    TEXT NOT NULL,
    image_url      TEXT NOT NULL DEFAULT '',
    status         TEXT NOT NULL DEFAULT 'Trabalhando',
    sort_order     INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_projects_order ON projects(sort_order);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
