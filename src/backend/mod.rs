// Execution adapters
//
// One module per database. Each rewrites the statement with the marker style
// its driver understands, binds the positional values, and runs it according
// to the requested StatementKind. The same code is stamped out for every
// backend by `define_backend!`.

use crate::error::{Error, Result};
use crate::rewrite::{rewrite_with_style, PlaceholderStyle, Rewritten};
use crate::statement::StatementKind;
use crate::value::{BindValue, Param, Params};

/// Rewrites `query` and logs what is about to be executed.
fn prepare(query: &str, params: &Params, kind: StatementKind, style: PlaceholderStyle) -> Rewritten {
    let rewritten = rewrite_with_style(query, params, style);

    tracing::debug!(
        kind = %kind,
        sql = %rewritten.sql,
        values = rewritten.values.len(),
        "executing named binding"
    );

    #[cfg(feature = "log_sql")]
    log_values(&rewritten.values);

    rewritten
}

#[cfg(feature = "log_sql")]
fn log_values(values: &[Param]) {
    for (i, value) in values.iter().enumerate() {
        tracing::debug!(position = i + 1, value = ?value, "bound value");
    }
}

/// Unwraps the value for the `position`-th (1-based) marker.
fn scalar(position: usize, param: Param) -> Result<BindValue> {
    match param {
        Param::Scalar(value) => Ok(value),
        Param::List(_) => Err(Error::ListInScalarPosition { position }),
    }
}

macro_rules! bind_value {
    ($query:expr, $value:expr) => {
        match $value {
            BindValue::Null => $query.bind(None::<String>),
            BindValue::Bool(b) => $query.bind(b),
            BindValue::I16(i) => $query.bind(i),
            BindValue::I32(i) => $query.bind(i),
            BindValue::I64(i) => $query.bind(i),
            BindValue::F32(f) => $query.bind(f),
            BindValue::F64(f) => $query.bind(f),
            BindValue::String(s) => $query.bind(s),
            BindValue::Binary(bytes) => $query.bind(bytes),
        }
    };
}

macro_rules! define_backend {
    ($db:ty, $row:ty, $style:ident) => {
        use sqlx::database::HasArguments;
        use sqlx::query::{Query, QueryAs};
        use sqlx::{Executor, FromRow};

        use $crate::error::Result;
        use $crate::rewrite::{PlaceholderStyle, Rewritten};
        use $crate::statement::{Outcome, StatementKind};
        use $crate::value::{BindValue, Param, Params};

        /// Marker style this driver accepts.
        pub const STYLE: PlaceholderStyle = PlaceholderStyle::$style;

        fn bind_query<'q>(
            mut query: Query<'q, $db, <$db as HasArguments<'q>>::Arguments>,
            values: Vec<Param>,
        ) -> Result<Query<'q, $db, <$db as HasArguments<'q>>::Arguments>> {
            for (i, param) in values.into_iter().enumerate() {
                let value = super::scalar(i + 1, param)?;
                query = bind_value!(query, value);
            }
            Ok(query)
        }

        fn bind_query_as<'q, O>(
            mut query: QueryAs<'q, $db, O, <$db as HasArguments<'q>>::Arguments>,
            values: Vec<Param>,
        ) -> Result<QueryAs<'q, $db, O, <$db as HasArguments<'q>>::Arguments>> {
            for (i, param) in values.into_iter().enumerate() {
                let value = super::scalar(i + 1, param)?;
                query = bind_value!(query, value);
            }
            Ok(query)
        }

        /// Rewrites the named placeholders in `query` and executes it.
        ///
        /// # Errors
        ///
        /// Database errors are returned as-is. A list bound to a bare `:name`
        /// placeholder fails before anything is sent.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let outcome = binding(
        ///     &pool,
        ///     "DELETE FROM users WHERE id IN ([:ids])",
        ///     &params! { "ids" => [1, 2, 3] },
        ///     StatementKind::Delete,
        /// )
        /// .await?;
        /// assert_eq!(outcome.rows_affected(), Some(3));
        /// ```
        pub async fn binding<'c, E>(
            executor: E,
            query: &str,
            params: &Params,
            kind: StatementKind,
        ) -> Result<Outcome<$row>>
        where
            E: Executor<'c, Database = $db>,
        {
            let Rewritten { sql, values } = super::prepare(query, params, kind, STYLE);
            let bound = bind_query(sqlx::query::<$db>(&sql), values)?;

            if kind.returns_rows() {
                return Ok(Outcome::Rows(bound.fetch_all(executor).await?));
            }

            let done = bound.execute(executor).await?;
            let outcome = match kind {
                StatementKind::Insert | StatementKind::Statement => Outcome::Success(true),
                _ => Outcome::Affected(done.rows_affected()),
            };
            Ok(outcome)
        }

        /// Like [`binding`] with `StatementKind::Select`, decoding every row into `O`.
        pub async fn binding_as<'c, O, E>(executor: E, query: &str, params: &Params) -> Result<Vec<O>>
        where
            O: for<'r> FromRow<'r, $row> + Send + Unpin,
            E: Executor<'c, Database = $db>,
        {
            let Rewritten { sql, values } = super::prepare(query, params, StatementKind::Select, STYLE);
            let bound = bind_query_as(sqlx::query_as::<$db, O>(&sql), values)?;
            Ok(bound.fetch_all(executor).await?)
        }

        /// First row decoded into `O`, if there is one.
        pub async fn binding_one<'c, O, E>(executor: E, query: &str, params: &Params) -> Result<Option<O>>
        where
            O: for<'r> FromRow<'r, $row> + Send + Unpin,
            E: Executor<'c, Database = $db>,
        {
            let Rewritten { sql, values } = super::prepare(query, params, StatementKind::Select, STYLE);
            let bound = bind_query_as(sqlx::query_as::<$db, O>(&sql), values)?;
            Ok(bound.fetch_optional(executor).await?)
        }
    };
}

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "sqlite")]
pub mod sqlite;
