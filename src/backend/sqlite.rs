//! SQLite adapter. Placeholders are rewritten to `?`.
//!
//! ```ignore
//! use sqlx::sqlite::SqlitePoolOptions;
//! use sqlx_named_binding::{backend::sqlite, params, StatementKind};
//!
//! let pool = SqlitePoolOptions::new().connect("sqlite::memory:").await?;
//! let rows = sqlite::binding(
//!     &pool,
//!     "SELECT :num1 + :num2 AS total",
//!     &params! { "num1" => 5, "num2" => 3 },
//!     StatementKind::Select,
//! )
//! .await?
//! .into_rows();
//! ```

use sqlx::sqlite::{Sqlite, SqliteRow};

define_backend!(Sqlite, SqliteRow, Question);
