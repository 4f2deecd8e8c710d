//! Named placeholder rewriting.
//!
//! Turns a statement written with named placeholders into one using
//! positional markers, together with the values in binding order:
//!
//! - `:name` is replaced by a single marker.
//! - `[:name]` (whitespace allowed inside the brackets) is replaced by one
//!   marker per element when `name` is bound to a list, e.g. `IN ([:ids])`
//!   becomes `IN (?,?,?)`.
//!
//! Names without a binding are left in the statement untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{Param, Params};

// Bracket form first so `[:ids]` is a single occurrence.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*:\s*([A-Za-z0-9_]+)\s*\]|:([A-Za-z0-9_]+)")
        .expect("placeholder pattern is valid")
});

/// Positional marker syntax accepted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `?` (SQLite, MySQL)
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL)
    Dollar,
}

impl PlaceholderStyle {
    /// Appends the marker for the `index`-th (1-based) positional value.
    fn push_marker(self, sql: &mut String, index: usize) {
        match self {
            PlaceholderStyle::Question => sql.push('?'),
            PlaceholderStyle::Dollar => {
                sql.push('$');
                sql.push_str(&index.to_string());
            }
        }
    }
}

/// One named placeholder found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Identifier without the colon or brackets
    pub name: &'a str,
    /// Exact matched text, brackets and whitespace included
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    /// Written as `[:name]`
    pub bracketed: bool,
}

impl Placeholder<'_> {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Finds every placeholder in `template`, left to right.
pub fn placeholders(template: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_RE.captures_iter(template).filter_map(|caps| {
        let whole = caps.get(0)?;
        let (name, bracketed) = match (caps.get(1), caps.get(2)) {
            (Some(name), _) => (name.as_str(), true),
            (None, Some(name)) => (name.as_str(), false),
            (None, None) => return None,
        };
        Some(Placeholder {
            name,
            text: whole.as_str(),
            start: whole.start(),
            end: whole.end(),
            bracketed,
        })
    })
}

/// A statement with positional markers and the values to bind, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    pub sql: String,
    /// One entry per emitted marker. A list only appears here when it was
    /// bound to a bare `:name` placeholder, which drivers cannot bind.
    pub values: Vec<Param>,
}

impl Rewritten {
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.values)
    }
}

/// Rewrites named placeholders to `?` markers.
///
/// # Example
///
/// ```ignore
/// use sqlx_named_binding::{params, rewrite};
///
/// let rewritten = rewrite(
///     "SELECT * FROM t WHERE status = :status AND id IN ([:ids])",
///     &params! { "status" => "active", "ids" => [1, 3, 4] },
/// );
/// assert_eq!(rewritten.sql, "SELECT * FROM t WHERE status = ? AND id IN (?,?,?)");
/// assert_eq!(rewritten.values.len(), 4);
/// ```
pub fn rewrite(template: &str, params: &Params) -> Rewritten {
    rewrite_with_style(template, params, PlaceholderStyle::Question)
}

/// Rewrites named placeholders to markers of the given style.
///
/// `$n` markers are numbered in the order they are emitted; markers already
/// present in `template` are neither renumbered nor counted.
///
/// A list bound to `[:name]` with zero elements produces no markers at all
/// (`IN ()`), which most databases reject. Callers must not pass empty lists
/// there.
pub fn rewrite_with_style(template: &str, params: &Params, style: PlaceholderStyle) -> Rewritten {
    let mut sql = String::with_capacity(template.len());
    let mut values = Vec::new();
    let mut last = 0;

    for placeholder in placeholders(template) {
        let Some(param) = params.get(placeholder.name) else {
            tracing::trace!(placeholder = placeholder.name, "no binding for placeholder, left in place");
            continue;
        };

        sql.push_str(&template[last..placeholder.start]);
        last = placeholder.end;

        match param {
            Param::List(items) if placeholder.bracketed => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        sql.push(',');
                    }
                    values.push(Param::Scalar(item.clone()));
                    style.push_marker(&mut sql, values.len());
                }
            }
            param => {
                values.push(param.clone());
                style.push_marker(&mut sql, values.len());
            }
        }
    }

    sql.push_str(&template[last..]);
    Rewritten { sql, values }
}
