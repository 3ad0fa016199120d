//! Orderable values resolved from table rows.

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A value a row yields for sorting, grouping, or default cell rendering.
///
/// `Null` stands for a missing or undefined value. The sort engine always
/// places it after every defined value, whatever the direction.
///
/// # Type Mapping
///
/// | Row field | Variant |
/// |-----------|---------|
/// | missing / `None` | `Null` |
/// | `bool` | `Bool` |
/// | integers | `Int` |
/// | money, hours | `Decimal` |
/// | `f64` | `Float` |
/// | `String`, `Uuid` | `Text` |
/// | calendar date | `Date` |
/// | timestamp | `DateTime` |
///
/// # Example
///
/// ```
/// use ledger_lib::table::SortValue;
///
/// let name = SortValue::from("Contoso");
/// let hours = SortValue::from(8i64);
/// let missing = SortValue::from(None::<i64>);
/// assert!(missing.is_null());
/// assert!(name > hours);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    /// Missing/undefined value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// 64-bit floating point.
    Float(f64),
    /// Text value.
    Text(String),
    /// Calendar date without time zone.
    Date(NaiveDate),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
}

impl SortValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, SortValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            SortValue::Null => "null",
            SortValue::Bool(_) => "bool",
            SortValue::Int(_) => "int",
            SortValue::Decimal(_) => "decimal",
            SortValue::Float(_) => "float",
            SortValue::Text(_) => "text",
            SortValue::Date(_) => "date",
            SortValue::DateTime(_) => "datetime",
        }
    }

    /// Returns the value as a decimal, if it is numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            SortValue::Int(v) => Some(Decimal::from(*v)),
            SortValue::Decimal(v) => Some(*v),
            SortValue::Float(v) => Decimal::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Rank used when two values of unrelated variants meet.
    fn rank(&self) -> u8 {
        match self {
            SortValue::Null => 0,
            SortValue::Bool(_) => 1,
            SortValue::Int(_) | SortValue::Decimal(_) | SortValue::Float(_) => 2,
            SortValue::Text(_) => 3,
            SortValue::Date(_) => 4,
            SortValue::DateTime(_) => 5,
        }
    }

    /// Position on the number line shared by all numeric variants.
    fn numeric_key(&self) -> Option<NumericKey> {
        match self {
            SortValue::Int(v) => Some(NumericKey::Exact(Decimal::from(*v))),
            SortValue::Decimal(v) => Some(NumericKey::Exact(*v)),
            SortValue::Float(v) if v.is_nan() => Some(NumericKey::NaN),
            SortValue::Float(v) => Some(match Decimal::from_f64_retain(*v) {
                Some(d) => NumericKey::Exact(d),
                None if *v < 0.0 => NumericKey::Below(*v),
                None => NumericKey::Above(*v),
            }),
            _ => None,
        }
    }

    /// Native ordering between two values. This is a total order.
    ///
    /// Numeric variants compare by magnitude with each other: integers
    /// exactly, floats through their decimal value (28 fractional digits).
    /// NaN sits after every number. Unrelated variants fall back to a fixed
    /// rank. Null handling is the sort engine's business; here `Null` is
    /// merely the lowest rank.
    pub fn native_cmp(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Null, SortValue::Null) => Ordering::Equal,
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::DateTime(a), SortValue::DateTime(b)) => a.cmp(b),
            _ => match (self.numeric_key(), other.numeric_key()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

/// Numeric value placed on one totally ordered line.
///
/// Floats beyond the decimal range sit below or above every decimal.
enum NumericKey {
    Below(f64),
    Exact(Decimal),
    Above(f64),
    NaN,
}

impl NumericKey {
    fn class(&self) -> u8 {
        match self {
            NumericKey::Below(_) => 0,
            NumericKey::Exact(_) => 1,
            NumericKey::Above(_) => 2,
            NumericKey::NaN => 3,
        }
    }

    fn total_cmp(&self, other: &NumericKey) -> Ordering {
        match (self, other) {
            (NumericKey::Below(a), NumericKey::Below(b))
            | (NumericKey::Above(a), NumericKey::Above(b)) => a.total_cmp(b),
            (NumericKey::Exact(a), NumericKey::Exact(b)) => a.cmp(b),
            _ => self.class().cmp(&other.class()),
        }
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.native_cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.native_cmp(other))
    }
}

impl fmt::Display for SortValue {
    /// Display form used for default cells and field-based group keys.
    /// `Null` renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Null => Ok(()),
            SortValue::Bool(v) => write!(f, "{v}"),
            SortValue::Int(v) => write!(f, "{v}"),
            SortValue::Decimal(v) => write!(f, "{v}"),
            SortValue::Float(v) => write!(f, "{v}"),
            SortValue::Text(v) => f.write_str(v),
            SortValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            SortValue::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for SortValue {
    fn from(v: bool) -> Self {
        SortValue::Bool(v)
    }
}

impl From<i32> for SortValue {
    fn from(v: i32) -> Self {
        SortValue::Int(i64::from(v))
    }
}

impl From<i64> for SortValue {
    fn from(v: i64) -> Self {
        SortValue::Int(v)
    }
}

impl From<u32> for SortValue {
    fn from(v: u32) -> Self {
        SortValue::Int(i64::from(v))
    }
}

impl From<f64> for SortValue {
    /// NaN becomes `Null`, so it sorts with missing values.
    fn from(v: f64) -> Self {
        if v.is_nan() {
            SortValue::Null
        } else {
            SortValue::Float(v)
        }
    }
}

impl From<Decimal> for SortValue {
    fn from(v: Decimal) -> Self {
        SortValue::Decimal(v)
    }
}

impl From<String> for SortValue {
    fn from(v: String) -> Self {
        SortValue::Text(v)
    }
}

impl From<&str> for SortValue {
    fn from(v: &str) -> Self {
        SortValue::Text(v.to_string())
    }
}

impl From<&String> for SortValue {
    fn from(v: &String) -> Self {
        SortValue::Text(v.clone())
    }
}

impl From<Uuid> for SortValue {
    fn from(v: Uuid) -> Self {
        SortValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for SortValue {
    fn from(v: NaiveDate) -> Self {
        SortValue::Date(v)
    }
}

impl From<DateTime<Utc>> for SortValue {
    fn from(v: DateTime<Utc>) -> Self {
        SortValue::DateTime(v)
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SortValue::Null,
        }
    }
}
