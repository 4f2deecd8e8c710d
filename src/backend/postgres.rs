//! PostgreSQL adapter.
//!
//! Postgres does not accept `?`, so placeholders are rewritten to `$1`,
//! `$2`, ... in the order they appear. Values bound from strings (dates,
//! decimals, uuids) may need an explicit cast in the statement, e.g.
//! `CAST(:created_at AS TIMESTAMP)`.

use sqlx::postgres::{PgRow, Postgres};

define_backend!(Postgres, PgRow, Dollar);
