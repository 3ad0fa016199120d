//! Grouping engine: bucket sorted rows by key, then order the buckets.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::column::ColumnSet;
use super::column::TableRow;
use super::sort::SortState;
use super::sort::compare_sort_values;
use super::value::SortValue;

/// Group key used for rows whose key cannot be derived.
pub const UNDEFINED_GROUP_KEY: &str = "undefined";

/// Derives a group key from a row. `None` means "no key".
pub type GroupKeyFn<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Explicit comparator between two groups.
pub type GroupComparator<T> = Arc<dyn Fn(&Group<'_, T>, &Group<'_, T>) -> Ordering + Send + Sync>;

/// How rows are assigned to groups.
pub enum GroupBy<T> {
    /// Group by the display form of a field.
    Field(String),
    /// Group by a derived key.
    Derive(GroupKeyFn<T>),
}

impl<T> GroupBy<T> {
    /// Group by a field.
    pub fn field(name: impl Into<String>) -> Self {
        GroupBy::Field(name.into())
    }

    /// Group by a key derived from each row.
    pub fn derive(f: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        GroupBy::Derive(Arc::new(f))
    }
}

impl<T: TableRow> GroupBy<T> {
    /// Key for a row, or `None` if the row yields no key.
    ///
    /// A field resolving to [`SortValue::Null`] yields no key.
    pub fn key(&self, row: &T) -> Option<String> {
        match self {
            GroupBy::Field(name) => match row.field(name) {
                SortValue::Null => None,
                value => Some(value.to_string()),
            },
            GroupBy::Derive(f) => f(row),
        }
    }

    /// Key for a row, falling back to `undefined_key`.
    pub fn key_or(&self, row: &T, undefined_key: &str) -> String {
        self.key(row).unwrap_or_else(|| undefined_key.to_string())
    }
}

impl<T> Clone for GroupBy<T> {
    fn clone(&self) -> Self {
        match self {
            GroupBy::Field(name) => GroupBy::Field(name.clone()),
            GroupBy::Derive(f) => GroupBy::Derive(f.clone()),
        }
    }
}

impl<T> fmt::Debug for GroupBy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Field(name) => f.debug_tuple("Field").field(name).finish(),
            GroupBy::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// A named bucket of rows sharing a derived key.
///
/// Members keep the order they had in the (sorted) input.
#[derive(Debug)]
pub struct Group<'a, T> {
    /// Group identity.
    pub key: String,
    /// Rows in this group.
    pub members: Vec<&'a T>,
}

impl<'a, T> Group<'a, T> {
    /// Creates a group.
    pub fn new(key: impl Into<String>, members: Vec<&'a T>) -> Self {
        Self {
            key: key.into(),
            members,
        }
    }

    /// Get the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T> Clone for Group<'_, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            members: self.members.clone(),
        }
    }
}

/// Bucket rows by key in first-seen order.
///
/// Every row lands in exactly one group; rows without a key go to
/// [`UNDEFINED_GROUP_KEY`].
pub fn group_rows<'a, T: TableRow>(rows: &[&'a T], group_by: &GroupBy<T>) -> Vec<Group<'a, T>> {
    bucket(rows, |row| group_by.key_or(row, UNDEFINED_GROUP_KEY))
        .into_iter()
        .map(|(key, members)| Group::new(key, members))
        .collect()
}

/// Single pass, order-preserving bucketing.
pub(crate) fn bucket<I: Copy>(
    items: &[I],
    mut key_of: impl FnMut(I) -> String,
) -> Vec<(String, Vec<I>)> {
    let mut buckets: Vec<(String, Vec<I>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &item in items {
        let key = key_of(item);
        match index.get(&key) {
            Some(&i) => buckets[i].1.push(item),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![item]));
            }
        }
    }
    buckets
}

/// Order groups.
///
/// In priority order:
/// 1. the active sort column's group-aggregate sort value, with the same
///    direction and null policy as row sorting;
/// 2. the explicit `group_sort` comparator;
/// 3. bucket-creation order.
///
/// An active column with a group-aggregate value wins over `group_sort`.
pub fn order_groups<'a, T: TableRow>(
    groups: Vec<Group<'a, T>>,
    sort: Option<&SortState>,
    columns: &ColumnSet<T>,
    group_sort: Option<&GroupComparator<T>>,
) -> Vec<Group<'a, T>> {
    let order = group_order(&groups, sort, columns, group_sort);
    let mut slots: Vec<Option<Group<'a, T>>> = groups.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}

/// Positions of `groups` in display order.
pub(crate) fn group_order<T: TableRow>(
    groups: &[Group<'_, T>],
    sort: Option<&SortState>,
    columns: &ColumnSet<T>,
    group_sort: Option<&GroupComparator<T>>,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..groups.len()).collect();

    if let Some(state) = sort
        && let Some(aggregate) = columns.group_sort_value(&state.key)
    {
        let values: Vec<SortValue> = groups
            .iter()
            .map(|g| aggregate(&g.key, &g.members))
            .collect();
        order.sort_by(|&a, &b| compare_sort_values(&values[a], &values[b], state.direction));
    } else if let Some(compare) = group_sort {
        order.sort_by(|&a, &b| compare(&groups[a], &groups[b]));
    }
    order
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::table::column::Column;
    use crate::table::sort::sort_rows;

    struct Entry {
        date: Option<&'static str>,
        hours: i64,
    }

    impl TableRow for Entry {
        const FIELDS: &'static [&'static str] = &["date", "hours"];

        fn field(&self, name: &str) -> SortValue {
            match name {
                "date" => SortValue::from(self.date),
                "hours" => SortValue::from(self.hours),
                _ => SortValue::Null,
            }
        }
    }

    fn entry(date: Option<&'static str>, hours: i64) -> Entry {
        Entry { date, hours }
    }

    fn columns() -> ColumnSet<Entry> {
        ColumnSet::new(vec![
            Column::new("date", "Date").sortable(),
            Column::new("hours", "Hours")
                .sortable()
                .group_sort_value(|_, rows: &[&Entry]| {
                    SortValue::from(Decimal::from(rows.iter().map(|r| r.hours).sum::<i64>()))
                }),
        ])
        .unwrap()
    }

    fn by_key(a: &Group<'_, Entry>, b: &Group<'_, Entry>) -> Ordering {
        a.key.cmp(&b.key)
    }

    fn keys<T>(groups: &[Group<'_, T>]) -> Vec<String> {
        groups.iter().map(|g| g.key.clone()).collect()
    }

    #[test]
    fn test_first_seen_order() {
        let rows = vec![entry(Some("b"), 1), entry(Some("a"), 2), entry(Some("b"), 3)];
        let refs: Vec<&Entry> = rows.iter().collect();
        let groups = group_rows(&refs, &GroupBy::field("date"));
        assert_eq!(keys(&groups), vec!["b", "a"]);
        assert_eq!(groups[0].members.iter().map(|e| e.hours).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_missing_keys_bucketed_as_undefined() {
        let rows = vec![entry(None, 1), entry(Some("a"), 2)];
        let refs: Vec<&Entry> = rows.iter().collect();
        let groups = group_rows(&refs, &GroupBy::field("date"));
        assert_eq!(keys(&groups), vec![UNDEFINED_GROUP_KEY, "a"]);

        let derived = group_rows(&refs, &GroupBy::derive(|_: &Entry| None));
        assert_eq!(keys(&derived), vec![UNDEFINED_GROUP_KEY]);
        assert_eq!(derived[0].len(), 2);
    }

    #[test]
    fn test_group_sort_value_orders_groups() {
        let rows = vec![
            entry(Some("2024-01-01"), 1),
            entry(Some("2024-01-01"), 1),
            entry(Some("2024-01-02"), 5),
        ];
        let sort = SortState::desc("hours");
        let sorted = sort_rows(&rows, Some(&sort), &columns());
        let groups = group_rows(&sorted, &GroupBy::field("date"));
        let ordered = order_groups(groups, Some(&sort), &columns(), None);
        assert_eq!(keys(&ordered), vec!["2024-01-02", "2024-01-01"]);

        let sort = SortState::asc("hours");
        let sorted = sort_rows(&rows, Some(&sort), &columns());
        let groups = group_rows(&sorted, &GroupBy::field("date"));
        let ordered = order_groups(groups, Some(&sort), &columns(), None);
        assert_eq!(keys(&ordered), vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_group_sort_value_beats_comparator() {
        let rows = vec![entry(Some("x"), 9), entry(Some("y"), 1)];
        let refs: Vec<&Entry> = rows.iter().collect();
        let by_key: GroupComparator<Entry> = Arc::new(by_key);

        let groups = group_rows(&refs, &GroupBy::field("date"));
        let sort = SortState::asc("hours");
        let ordered = order_groups(groups, Some(&sort), &columns(), Some(&by_key));
        assert_eq!(keys(&ordered), vec!["y", "x"]);

        // Active column without an aggregate: the comparator applies.
        let groups = group_rows(&refs, &GroupBy::field("date"));
        let sort = SortState::desc("date");
        let ordered = order_groups(groups, Some(&sort), &columns(), Some(&by_key));
        assert_eq!(keys(&ordered), vec!["x", "y"]);

        let groups = group_rows(&refs, &GroupBy::field("date"));
        let ordered = order_groups(groups, None, &columns(), None);
        assert_eq!(keys(&ordered), vec!["x", "y"]);
    }
}
