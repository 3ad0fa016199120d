//! Row trait and column descriptors for table views.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ColumnError;

use super::value::SortValue;

/// Extracts a row's sort value for a column.
pub type SortValueFn<T> = Arc<dyn Fn(&T) -> SortValue + Send + Sync>;

/// Computes a group-aggregate sort value from a group key and its members.
pub type GroupSortValueFn<T> = Arc<dyn Fn(&str, &[&T]) -> SortValue + Send + Sync>;

/// Renders a row's cell for a column.
pub type RenderFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Trait for records that can be displayed as rows in a table.
///
/// Rows are looked up by field name. A name the row does not know, or a
/// field that is empty, yields [`SortValue::Null`].
///
/// # Example
///
/// ```
/// use ledger_lib::table::{SortValue, TableRow};
///
/// struct Entry {
///     name: String,
///     hours: Option<i64>,
/// }
///
/// impl TableRow for Entry {
///     const FIELDS: &'static [&'static str] = &["name", "hours"];
///
///     fn field(&self, name: &str) -> SortValue {
///         match name {
///             "name" => SortValue::from(&self.name),
///             "hours" => SortValue::from(self.hours),
///             _ => SortValue::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Field names [`field`](TableRow::field) can resolve.
    ///
    /// Column sets are validated against this list.
    const FIELDS: &'static [&'static str];

    /// Stable identity used for rendering keys. Not used for ordering.
    fn id(&self) -> Option<String> {
        None
    }

    /// Resolve a field by name.
    fn field(&self, name: &str) -> SortValue;
}

/// Column configuration.
///
/// Columns describe how a table reads, renders, and sorts one field.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::new("date", "Date").sortable(),
///     Column::new("hours", "Hours")
///         .accessor("duration")
///         .sortable()
///         .group_sort_value(|_, rows| sum_hours(rows)),
///     Column::new("note", "Note").render(|e: &TimeEntry| e.note.clone()),
/// ];
/// ```
pub struct Column<T> {
    /// Unique key within the column set.
    pub key: String,
    /// Column header text.
    pub header: String,
    /// Field read instead of `key`.
    pub accessor: Option<String>,
    /// Whether this column is sortable.
    pub sortable: bool,
    render: Option<RenderFn<T>>,
    sort_value: Option<SortValueFn<T>>,
    group_sort_value: Option<GroupSortValueFn<T>>,
}

impl<T> Column<T> {
    /// Create a new column reading the field named `key`.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            accessor: None,
            sortable: false,
            render: None,
            sort_value: None,
            group_sort_value: None,
        }
    }

    /// Read a different field than the column key.
    pub fn accessor(mut self, field: impl Into<String>) -> Self {
        self.accessor = Some(field.into());
        self
    }

    /// Make the column sortable.
    ///
    /// Sortable columns show sort indicators in the header and respond to
    /// header clicks.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a custom cell renderer.
    pub fn render(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// Set a custom sort value, taking precedence over the field.
    pub fn sort_value(mut self, f: impl Fn(&T) -> SortValue + Send + Sync + 'static) -> Self {
        self.sort_value = Some(Arc::new(f));
        self
    }

    /// Set a group-aggregate sort value.
    ///
    /// While this column is the active sort, groups are ordered by the value
    /// this returns for each group.
    pub fn group_sort_value(
        mut self,
        f: impl Fn(&str, &[&T]) -> SortValue + Send + Sync + 'static,
    ) -> Self {
        self.group_sort_value = Some(Arc::new(f));
        self
    }

    /// Field this column reads: the accessor, or the key.
    pub fn field_name(&self) -> &str {
        self.accessor.as_deref().unwrap_or(&self.key)
    }

    /// Returns `true` if a custom renderer is set.
    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }

    /// Returns `true` if a group-aggregate sort value is set.
    pub fn has_group_sort_value(&self) -> bool {
        self.group_sort_value.is_some()
    }
}

impl<T: TableRow> Column<T> {
    /// Field value for a row, ignoring any custom sort value.
    pub fn value(&self, row: &T) -> SortValue {
        row.field(self.field_name())
    }

    /// Render a row's cell: the custom renderer, else the field's display form.
    pub fn render_cell(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
            sort_value: self.sort_value.clone(),
            group_sort_value: self.group_sort_value.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .field("sort_value", &self.sort_value.is_some())
            .field("group_sort_value", &self.group_sort_value.is_some())
            .finish()
    }
}

/// How a column yields sort values, decided once when the set is built.
pub(crate) enum SortSource<T> {
    /// Not sortable. Sorting on it is a no-op.
    Disabled,
    /// Custom sort function.
    Custom(SortValueFn<T>),
    /// Field lookup by name.
    Field(String),
}

impl<T> Clone for SortSource<T> {
    fn clone(&self) -> Self {
        match self {
            SortSource::Disabled => SortSource::Disabled,
            SortSource::Custom(f) => SortSource::Custom(f.clone()),
            SortSource::Field(name) => SortSource::Field(name.clone()),
        }
    }
}

impl<T: TableRow> SortSource<T> {
    /// Resolve a row's sort value.
    pub(crate) fn resolve(&self, row: &T) -> SortValue {
        match self {
            SortSource::Disabled => SortValue::Null,
            SortSource::Custom(f) => f(row),
            SortSource::Field(name) => row.field(name),
        }
    }
}

/// A validated, ordered set of columns.
///
/// Built once per table configuration. Construction fails on duplicate keys
/// and on sortable columns that cannot produce a value.
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
    sources: Vec<SortSource<T>>,
    index: HashMap<String, usize>,
}

impl<T: TableRow> ColumnSet<T> {
    /// Validate columns and resolve their sort sources.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, ColumnError> {
        let mut index = HashMap::with_capacity(columns.len());
        let mut sources = Vec::with_capacity(columns.len());

        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.key.clone(), i).is_some() {
                return Err(ColumnError::duplicate_key(&column.key));
            }
            sources.push(Self::resolve_source(column)?);
        }

        Ok(Self {
            columns,
            sources,
            index,
        })
    }

    fn resolve_source(column: &Column<T>) -> Result<SortSource<T>, ColumnError> {
        if !column.sortable {
            return Ok(SortSource::Disabled);
        }
        if let Some(f) = &column.sort_value {
            return Ok(SortSource::Custom(f.clone()));
        }

        let field = column.field_name();
        if T::FIELDS.contains(&field) {
            Ok(SortSource::Field(field.to_string()))
        } else {
            Err(ColumnError::unresolvable(
                &column.key,
                field,
                std::any::type_name::<T>(),
            ))
        }
    }

    /// Sort value for a row under the column `key`.
    ///
    /// Returns `None` if the column is unknown or not sortable.
    pub fn sort_value(&self, key: &str, row: &T) -> Option<SortValue> {
        self.sort_source(key).map(|source| source.resolve(row))
    }

    pub(crate) fn sort_source(&self, key: &str) -> Option<&SortSource<T>> {
        let i = *self.index.get(key)?;
        match &self.sources[i] {
            SortSource::Disabled => None,
            source => Some(source),
        }
    }

    /// Render one row's cells, in column order.
    pub fn render_row(&self, row: &T) -> Vec<String> {
        self.columns.iter().map(|c| c.render_cell(row)).collect()
    }
}

impl<T> ColumnSet<T> {
    /// Get a column by key.
    pub fn get(&self, key: &str) -> Option<&Column<T>> {
        self.index.get(key).map(|&i| &self.columns[i])
    }

    /// Check whether a key names a sortable column.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.sortable)
    }

    pub(crate) fn group_sort_value(&self, key: &str) -> Option<&GroupSortValueFn<T>> {
        self.get(key)
            .filter(|c| c.sortable)
            .and_then(|c| c.group_sort_value.as_ref())
    }

    /// Iterate columns in order.
    pub fn iter(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the set has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            sources: self.sources.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}
