//! Named placeholders for `sqlx` statements.
//!
//! Write statements with `:name` placeholders, and `[:name]` where a list
//! should expand into several positional parameters:
//!
//! ```ignore
//! use sqlx_named_binding::{binding, params, StatementKind};
//!
//! let rows = binding(
//!     &pool,
//!     "SELECT * FROM orders WHERE status = :status AND id IN ([:ids])",
//!     &params! { "status" => "paid", "ids" => [1, 3, 4] },
//!     StatementKind::Select,
//! )
//! .await?
//! .into_rows();
//! ```
//!
//! The rewriting step is available on its own through [`rewrite`] for use
//! with any other driver.

pub mod backend;
pub mod error;
pub mod rewrite;
pub mod statement;
pub mod value;

pub use error::{Error, Result};
pub use rewrite::{placeholders, rewrite, rewrite_with_style, Placeholder, PlaceholderStyle, Rewritten};
pub use statement::{Outcome, StatementKind};
pub use value::{BindValue, IntoBindValue, Param, Params};

#[cfg(feature = "postgres")]
pub use backend::postgres::{binding, binding_as, binding_one};

#[cfg(all(feature = "mysql", not(feature = "postgres")))]
pub use backend::mysql::{binding, binding_as, binding_one};

#[cfg(all(feature = "sqlite", not(feature = "postgres"), not(feature = "mysql")))]
pub use backend::sqlite::{binding, binding_as, binding_one};
