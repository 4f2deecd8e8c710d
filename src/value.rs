// Bind values and parameter mappings
//
// This module defines the scalar values the execution adapters know how to
// bind, the conversion trait that produces them, and the name -> value
// mapping consumed by the rewriter.

use std::collections::hash_map::{self, HashMap};
use std::fmt;

/// A single scalar value ready to be bound to a positional placeholder.
///
/// The rewriter never inspects these; they are handed to the database
/// driver in the order the placeholders were replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// SQL NULL, bound as `Option<String>::None`.
    ///
    /// Postgres types that parameter as `text`, so comparing it with or
    /// inserting it into a non-text column needs a cast such as
    /// `CAST(:x AS INTEGER)` or `:x::timestamp`.
    Null,
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Binary(Vec<u8>),
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Null => write!(f, "NULL"),
            BindValue::Bool(b) => write!(f, "bool({})", b),
            BindValue::I16(i) => write!(f, "i16({})", i),
            BindValue::I32(i) => write!(f, "i32({})", i),
            BindValue::I64(i) => write!(f, "i64({})", i),
            BindValue::F32(v) => write!(f, "f32({})", v),
            BindValue::F64(v) => write!(f, "f64({})", v),
            BindValue::String(s) => write!(f, "String(\"{}\")", s),
            BindValue::Binary(bytes) => write!(f, "Binary({} bytes)", bytes.len()),
        }
    }
}

/// Types that can be turned into a [`BindValue`].
///
/// Implement this for your own types to use them directly with
/// [`Params::bind`] and the [`params!`](crate::params) macro.
///
/// # Example
///
/// ```ignore
/// use sqlx_named_binding::{BindValue, IntoBindValue};
///
/// struct Cents(i64);
///
/// impl IntoBindValue for Cents {
///     fn into_bind_value(self) -> BindValue {
///         BindValue::I64(self.0)
///     }
/// }
/// ```
pub trait IntoBindValue {
    fn into_bind_value(self) -> BindValue;
}

impl IntoBindValue for BindValue {
    fn into_bind_value(self) -> BindValue {
        self
    }
}

impl IntoBindValue for bool {
    fn into_bind_value(self) -> BindValue {
        BindValue::Bool(self)
    }
}

impl IntoBindValue for i8 {
    fn into_bind_value(self) -> BindValue {
        // Postgres maps i8 to "char", widen instead
        BindValue::I16(self as i16)
    }
}

impl IntoBindValue for i16 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I16(self)
    }
}

impl IntoBindValue for i32 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I32(self)
    }
}

impl IntoBindValue for i64 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I64(self)
    }
}

impl IntoBindValue for u8 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I32(self as i32)
    }
}

impl IntoBindValue for u16 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I32(self as i32)
    }
}

impl IntoBindValue for u32 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I64(self as i64)
    }
}

impl IntoBindValue for u64 {
    fn into_bind_value(self) -> BindValue {
        // Not every driver binds unsigned; only values past i64::MAX stay text
        match i64::try_from(self) {
            Ok(i) => BindValue::I64(i),
            Err(_) => BindValue::String(self.to_string()),
        }
    }
}

impl IntoBindValue for f32 {
    fn into_bind_value(self) -> BindValue {
        BindValue::F32(self)
    }
}

impl IntoBindValue for f64 {
    fn into_bind_value(self) -> BindValue {
        BindValue::F64(self)
    }
}

impl IntoBindValue for String {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self)
    }
}

impl<'a> IntoBindValue for &'a str {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.to_string())
    }
}

impl<'a> IntoBindValue for &'a String {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.clone())
    }
}

impl IntoBindValue for Vec<u8> {
    fn into_bind_value(self) -> BindValue {
        BindValue::Binary(self)
    }
}

impl<'a> IntoBindValue for &'a [u8] {
    fn into_bind_value(self) -> BindValue {
        BindValue::Binary(self.to_vec())
    }
}

impl<T: IntoBindValue> IntoBindValue for Option<T> {
    fn into_bind_value(self) -> BindValue {
        match self {
            Some(value) => value.into_bind_value(),
            None => BindValue::Null,
        }
    }
}

// ============================================================================
// Optional types (converted to strings, like NUMERIC/TIMESTAMP literals)
// ============================================================================

#[cfg(feature = "decimal")]
impl IntoBindValue for rust_decimal::Decimal {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.to_string())
    }
}

#[cfg(feature = "chrono")]
impl IntoBindValue for chrono::NaiveDate {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.format("%Y-%m-%d").to_string())
    }
}

#[cfg(feature = "chrono")]
impl IntoBindValue for chrono::NaiveTime {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.format("%H:%M:%S%.9f").to_string())
    }
}

#[cfg(feature = "chrono")]
impl IntoBindValue for chrono::NaiveDateTime {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.format("%Y-%m-%d %H:%M:%S%.9f").to_string())
    }
}

#[cfg(feature = "chrono")]
impl IntoBindValue for chrono::DateTime<chrono::Utc> {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.format("%Y-%m-%d %H:%M:%S%.9f%:z").to_string())
    }
}

#[cfg(feature = "uuid")]
impl IntoBindValue for uuid::Uuid {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.hyphenated().to_string())
    }
}

#[cfg(feature = "json")]
impl IntoBindValue for serde_json::Value {
    fn into_bind_value(self) -> BindValue {
        match self {
            serde_json::Value::Null => BindValue::Null,
            serde_json::Value::Bool(b) => BindValue::Bool(b),
            serde_json::Value::String(s) => BindValue::String(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => BindValue::I64(i),
                None => match n.as_f64() {
                    Some(f) if n.is_f64() => BindValue::F64(f),
                    _ => BindValue::String(n.to_string()),
                },
            },
            // Arrays and objects are bound as their JSON text
            other => BindValue::String(other.to_string()),
        }
    }
}

/// The value mapped to a parameter name.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Scalar(BindValue),
    /// Expanded into one positional placeholder per element when used as `[:name]`.
    List(Vec<BindValue>),
}

impl Param {
    pub fn is_list(&self) -> bool {
        matches!(self, Param::List(_))
    }
}

impl<T: IntoBindValue> From<T> for Param {
    fn from(value: T) -> Self {
        Param::Scalar(value.into_bind_value())
    }
}

/// Parameter mapping from placeholder name (without the colon) to value.
///
/// # Example
///
/// ```ignore
/// use sqlx_named_binding::Params;
///
/// let params = Params::new()
///     .bind("status", "active")
///     .bind_list("ids", [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    inner: HashMap<String, Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar value, replacing any previous value for `name`.
    pub fn bind<K: Into<String>, V: IntoBindValue>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a list value, replacing any previous value for `name`.
    pub fn bind_list<K, I>(mut self, name: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator,
        I::Item: IntoBindValue,
    {
        self.insert_list(name, values);
        self
    }

    pub fn insert<K: Into<String>, V: IntoBindValue>(&mut self, name: K, value: V) -> &mut Self {
        self.inner.insert(name.into(), Param::Scalar(value.into_bind_value()));
        self
    }

    pub fn insert_list<K, I>(&mut self, name: K, values: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator,
        I::Item: IntoBindValue,
    {
        let list = values.into_iter().map(IntoBindValue::into_bind_value).collect();
        self.inner.insert(name.into(), Param::List(list));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.inner.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Param> {
        self.inner.iter()
    }

    /// Builds a mapping from a JSON object.
    ///
    /// Top-level arrays become list parameters; everything else is a scalar.
    #[cfg(feature = "json")]
    pub fn from_json(value: &serde_json::Value) -> crate::Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            crate::Error::InvalidParams(format!("expected a JSON object, got {}", value))
        })?;

        let mut params = Params::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Array(items) => {
                    params.insert_list(name.as_str(), items.iter().cloned());
                }
                other => {
                    params.insert(name.as_str(), other.clone());
                }
            }
        }
        Ok(params)
    }
}

impl<K: Into<String>> FromIterator<(K, Param)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Param)>>(iter: I) -> Self {
        Params {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Param);
    type IntoIter = hash_map::Iter<'a, String, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Builds a [`Params`] mapping.
///
/// A value written as a bracketed list becomes a list parameter. Other
/// values must be a single token tree; wrap longer expressions in
/// parentheses.
///
/// ```ignore
/// let params = params! {
///     "status" => "active",
///     "min_age" => (limit - 1),
///     "ids" => [1, 3, 4],
/// };
/// ```
#[macro_export]
macro_rules! params {
    (@insert $params:ident, $key:expr, [$($item:expr),* $(,)?]) => {
        let items: ::std::vec::Vec<$crate::BindValue> =
            ::std::vec![$($crate::IntoBindValue::into_bind_value($item)),*];
        $params.insert_list($key, items);
    };
    (@insert $params:ident, $key:expr, $value:expr) => {
        $params.insert($key, $value);
    };
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:tt),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $( $crate::params!(@insert params, $key, $value); )+
        params
    }};
}
