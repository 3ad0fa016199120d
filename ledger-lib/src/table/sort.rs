//! Sort state and the row sort engine.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::column::ColumnSet;
use super::column::TableRow;
use super::value::SortValue;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// The active sort: one column and a direction.
///
/// # Example
///
/// ```
/// use ledger_lib::table::{SortDirection, SortState};
///
/// let first = SortState::toggle(None, "hours");
/// assert_eq!(first, SortState::asc("hours"));
///
/// let second = SortState::toggle(Some(&first), "hours");
/// assert_eq!(second.direction, SortDirection::Desc);
///
/// let other = SortState::toggle(Some(&second), "date");
/// assert_eq!(other, SortState::asc("date"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// Column key.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    /// Creates a descending sort on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// Next state after clicking the header of `key`.
    ///
    /// The active ascending column becomes descending. Anything else
    /// (no sort, another column, or the active descending column) becomes
    /// ascending on `key`. There is no third state that clears the sort.
    pub fn toggle(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(state) if state.key == key && state.direction == SortDirection::Asc => {
                SortState::desc(key)
            }
            _ => SortState::asc(key),
        }
    }
}

/// Compare two resolved sort values under a direction.
///
/// `Null` sorts after every defined value in both directions; only the
/// relative order of defined values depends on `direction`.
pub fn compare_sort_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.native_cmp(b)),
    }
}

/// Sort rows by the active sort state.
///
/// Returns the rows in input order when there is no state, or when the key
/// does not name a sortable column. Equal rows keep their input order.
pub fn sort_rows<'a, T: TableRow>(
    rows: &'a [T],
    state: Option<&SortState>,
    columns: &ColumnSet<T>,
) -> Vec<&'a T> {
    sort_order(rows, state, columns)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

/// Input positions of `rows` in sorted order.
pub(crate) fn sort_order<T: TableRow>(
    rows: &[T],
    state: Option<&SortState>,
    columns: &ColumnSet<T>,
) -> Vec<usize> {
    let Some(state) = state else {
        return (0..rows.len()).collect();
    };
    let Some(source) = columns.sort_source(&state.key) else {
        log::trace!("sort key '{}' is not a sortable column, keeping input order", state.key);
        return (0..rows.len()).collect();
    };

    // Resolve each value once; `sort_by` is stable.
    let mut keyed: Vec<(SortValue, usize)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (source.resolve(row), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_sort_values(a, b, state.direction));
    keyed.into_iter().map(|(_, i)| i).collect()
}
