use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a rewritten statement is executed and what comes back.
///
/// | Kind | Result |
/// |------|--------|
/// | `Select` | [`Outcome::Rows`] |
/// | `Insert`, `Statement` | [`Outcome::Success`] |
/// | `Update`, `Delete`, `AffectingStatement` | [`Outcome::Affected`] |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatementKind {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
    Statement,
    AffectingStatement,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::Statement => "statement",
            StatementKind::AffectingStatement => "affectingStatement",
        }
    }

    /// Whether the statement produces rows rather than a count or flag.
    pub fn returns_rows(&self) -> bool {
        matches!(self, StatementKind::Select)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(StatementKind::Select),
            "insert" => Ok(StatementKind::Insert),
            "update" => Ok(StatementKind::Update),
            "delete" => Ok(StatementKind::Delete),
            "statement" => Ok(StatementKind::Statement),
            "affectingstatement" | "affecting_statement" => Ok(StatementKind::AffectingStatement),
            _ => Err(Error::UnknownStatementKind(s.to_string())),
        }
    }
}

/// Result of executing a statement, shaped by its [`StatementKind`].
#[derive(Debug)]
pub enum Outcome<R> {
    Rows(Vec<R>),
    Affected(u64),
    Success(bool),
}

impl<R> Outcome<R> {
    pub fn rows(&self) -> Option<&[R]> {
        match self {
            Outcome::Rows(rows) => Some(rows.as_slice()),
            _ => None,
        }
    }

    /// Rows of a `Select`; empty for every other kind.
    pub fn into_rows(self) -> Vec<R> {
        match self {
            Outcome::Rows(rows) => rows,
            _ => Vec::new(),
        }
    }

    pub fn rows_affected(&self) -> Option<u64> {
        match self {
            Outcome::Affected(count) => Some(*count),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Success(ok) => *ok,
            Outcome::Rows(_) | Outcome::Affected(_) => true,
        }
    }
}
