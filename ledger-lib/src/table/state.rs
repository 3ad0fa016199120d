//! Table state and the sort → group → paginate pipeline.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::config::TableConfig;
use crate::error::ConfigError;

use super::column::Column;
use super::column::ColumnSet;
use super::column::TableRow;
use super::expansion::ExpansionState;
use super::group::Group;
use super::group::GroupBy;
use super::group::GroupComparator;
use super::group::bucket;
use super::group::group_order;
use super::page::PageState;
use super::page::PageWindow;
use super::page::Pagination;
use super::page::PaginationProps;
use super::sort::SortDirection;
use super::sort::SortState;
use super::sort::sort_order;
use super::view::GroupView;
use super::view::HeaderCell;
use super::view::PageInfo;
use super::view::TableView;
use super::view::ViewBody;

/// Called when the user changes the sort.
pub type SortHandler = Box<dyn FnMut(&str, SortDirection)>;

/// Called with a page number or a page size.
pub type PageHandler = Box<dyn FnMut(usize)>;

/// Renders a group header from its key, members, and expanded flag.
pub type GroupHeaderFn<T> = Arc<dyn Fn(&str, &[&T], bool) -> String + Send + Sync>;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

/// Sorted (and grouped) positions into the row slice, before paging.
#[derive(Debug, Clone)]
pub(super) enum Processed {
    Rows(Vec<usize>),
    Groups(Vec<(String, Vec<usize>)>),
}

impl Processed {
    /// Number of page units.
    pub(super) fn len(&self) -> usize {
        match self {
            Processed::Rows(order) => order.len(),
            Processed::Groups(groups) => groups.len(),
        }
    }
}

/// Callbacks fired by interactions.
#[derive(Default)]
pub(super) struct Handlers {
    pub on_sort: Option<SortHandler>,
    pub on_page_change: Option<PageHandler>,
    pub on_page_size_change: Option<PageHandler>,
}

/// A table view over rows of type `T`.
///
/// `Table<T>` owns all view state for one table:
/// - the active sort (or its mirror, when the caller sorts)
/// - grouping and group ordering
/// - page state (uncontrolled), or the caller's page props (controlled)
/// - which groups are expanded
///
/// Each pass runs sort → group → paginate. The sorted and grouped layout is
/// cached and rebuilt only after rows, sort, or grouping change.
///
/// # Example
///
/// ```
/// use ledger_lib::table::{Column, SortValue, Table, TableRow, ViewBody};
///
/// struct Entry {
///     name: &'static str,
///     hours: i64,
/// }
///
/// impl TableRow for Entry {
///     const FIELDS: &'static [&'static str] = &["name", "hours"];
///
///     fn field(&self, name: &str) -> SortValue {
///         match name {
///             "name" => SortValue::from(self.name),
///             "hours" => SortValue::from(self.hours),
///             _ => SortValue::Null,
///         }
///     }
/// }
///
/// let mut table = Table::builder(vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("hours", "Hours").sortable(),
/// ])
/// .rows(vec![
///     Entry { name: "B", hours: 2 },
///     Entry { name: "A", hours: 2 },
///     Entry { name: "C", hours: 1 },
/// ])
/// .page_size(2)
/// .build()
/// .unwrap();
///
/// table.on_header_click("hours");
/// let view = table.view();
/// assert_eq!(view.pagination.total_pages, 2);
/// match view.body {
///     ViewBody::Rows(rows) => {
///         assert_eq!(rows.iter().map(|r| r.name).collect::<Vec<_>>(), vec!["C", "B"]);
///     }
///     ViewBody::Groups(_) => unreachable!(),
/// }
/// ```
pub struct Table<T> {
    id: TableId,
    pub(super) rows: Arc<[T]>,
    pub(super) columns: ColumnSet<T>,
    pub(super) config: TableConfig,
    pub(super) sort: Option<SortState>,
    pub(super) group_by: Option<GroupBy<T>>,
    pub(super) group_sort: Option<GroupComparator<T>>,
    pub(super) group_header: Option<GroupHeaderFn<T>>,
    pub(super) pagination: Pagination,
    pub(super) expansion: ExpansionState,
    pub(super) handlers: Handlers,
    /// Cached layout; `None` when stale.
    pub(super) processed: RefCell<Option<Processed>>,
}

impl<T: TableRow> Table<T> {
    /// Start building a table from column definitions.
    pub fn builder(columns: Vec<Column<T>>) -> TableBuilder<T> {
        TableBuilder::new(columns)
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Get all rows, in input order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace all rows.
    ///
    /// Sort state and expanded groups are kept. The current page is pulled
    /// back into range if the new data has fewer pages.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[T]>>) {
        self.rows = rows.into();
        self.invalidate();
        self.clamp_page_state();
    }

    // -------------------------------------------------------------------------
    // Columns and sort
    // -------------------------------------------------------------------------

    /// Get the column set.
    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    /// Get the table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Get the current sort state.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Set the sort state directly, without firing `on_sort`.
    ///
    /// A key that is not a sortable column leaves rows in input order.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        if self.sort != sort {
            self.sort = sort;
            self.invalidate();
        }
    }

    /// Clear the sort state.
    pub fn clear_sort(&mut self) {
        self.set_sort(None);
    }

    /// Returns `true` if the caller owns sorting (an `on_sort` handler is set).
    ///
    /// Rows are then taken as already ordered; only the sort mirror changes.
    pub fn sorts_externally(&self) -> bool {
        self.handlers.on_sort.is_some()
    }

    // -------------------------------------------------------------------------
    // Grouping
    // -------------------------------------------------------------------------

    /// Get the grouping, if any.
    pub fn group_by(&self) -> Option<&GroupBy<T>> {
        self.group_by.as_ref()
    }

    /// Change the grouping.
    ///
    /// The page unit changes between rows and groups, so uncontrolled
    /// pagination goes back to page 1.
    pub fn set_group_by(&mut self, group_by: Option<GroupBy<T>>) {
        self.group_by = group_by;
        self.invalidate();
        if let Pagination::Uncontrolled(state) = &mut self.pagination {
            state.reset();
        }
    }

    /// Get the expansion state.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Check if a group is expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expansion.is_expanded(key)
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Get the pagination mode and state.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Replace the caller-owned page props (controlled mode).
    ///
    /// Switches the table to controlled pagination.
    pub fn set_pagination_props(&mut self, props: PaginationProps) {
        self.pagination = Pagination::Controlled(props);
    }

    /// Window over the processed rows or groups for the current page.
    pub fn window(&self) -> PageWindow {
        self.pagination.window(self.item_count())
    }

    /// Number of page units: rows, or groups when grouped.
    pub fn item_count(&self) -> usize {
        self.ensure_processed();
        self.processed.borrow().as_ref().map_or(0, Processed::len)
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Mark the cached layout stale.
    pub(super) fn invalidate(&self) {
        self.processed.replace(None);
    }

    /// Pull uncontrolled page state back into range.
    pub(super) fn clamp_page_state(&mut self) {
        let total = self.item_count();
        if let Pagination::Uncontrolled(state) = &mut self.pagination {
            let before = state.current_page();
            state.clamp(total);
            if state.current_page() != before {
                log::debug!(
                    "[{}] page {} out of range after update, now on page {}",
                    self.id,
                    before,
                    state.current_page()
                );
            }
        }
    }

    fn ensure_processed(&self) {
        if self.processed.borrow().is_some() {
            return;
        }
        let processed = self.process();
        self.processed.replace(Some(processed));
    }

    /// Run sort and group over the current rows.
    fn process(&self) -> Processed {
        let rows: &[T] = &self.rows;

        let order = if self.sorts_externally() {
            (0..rows.len()).collect()
        } else {
            sort_order(rows, self.sort.as_ref(), &self.columns)
        };

        let Some(group_by) = &self.group_by else {
            log::debug!("[{}] sorted {} rows", self.id, order.len());
            return Processed::Rows(order);
        };

        let undefined_key = &self.config.undefined_group_key;
        let buckets = bucket(&order, |i| group_by.key_or(&rows[i], undefined_key));
        let permutation = {
            let groups: Vec<Group<'_, T>> = buckets
                .iter()
                .map(|(key, members)| {
                    Group::new(key.as_str(), members.iter().map(|&i| &rows[i]).collect())
                })
                .collect();
            group_order(
                &groups,
                self.sort.as_ref(),
                &self.columns,
                self.group_sort.as_ref(),
            )
        };

        let mut slots: Vec<Option<(String, Vec<usize>)>> = buckets.into_iter().map(Some).collect();
        let groups: Vec<(String, Vec<usize>)> = permutation
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        log::debug!(
            "[{}] sorted {} rows into {} groups",
            self.id,
            rows.len(),
            groups.len()
        );
        Processed::Groups(groups)
    }

    /// Header cells with sort indicators.
    fn header(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                header: c.header.clone(),
                sortable: c.sortable,
                sort: self
                    .sort
                    .as_ref()
                    .filter(|s| s.key == c.key)
                    .map(|s| s.direction),
            })
            .collect()
    }

    fn render_group_header(&self, key: &str, members: &[&T], expanded: bool) -> String {
        match &self.group_header {
            Some(render) => render(key, members, expanded),
            None => format!("{} ({})", key, members.len()),
        }
    }

    /// Compute the render-ready view of the current page.
    pub fn view(&self) -> TableView<'_, T> {
        self.ensure_processed();
        let guard = self.processed.borrow();
        let empty = Processed::Rows(Vec::new());
        let processed = guard.as_ref().unwrap_or(&empty);
        let window = self.pagination.window(processed.len());
        let rows: &[T] = &self.rows;

        let body = match processed {
            Processed::Rows(order) => {
                ViewBody::Rows(window.slice(order).iter().map(|&i| &rows[i]).collect())
            }
            Processed::Groups(groups) => ViewBody::Groups(
                window
                    .slice(groups)
                    .iter()
                    .map(|(key, positions)| {
                        let members: Vec<&T> = positions.iter().map(|&i| &rows[i]).collect();
                        let expanded = self.expansion.is_expanded(key);
                        GroupView {
                            key: key.clone(),
                            header: self.render_group_header(key, &members, expanded),
                            members,
                            expanded,
                        }
                    })
                    .collect(),
            ),
        };

        TableView {
            header: self.header(),
            body,
            pagination: PageInfo {
                current_page: window.current_page,
                total_pages: window.total_pages,
                total_items: window.total_items,
                page_size: window.page_size,
                controlled: self.pagination.is_controlled(),
                page_size_options: self.config.page_size_options.clone(),
            },
            columns: &self.columns,
        }
    }

    /// Keys of every group in the processed layout (all pages).
    pub fn group_keys(&self) -> Vec<String> {
        self.ensure_processed();
        match self.processed.borrow().as_ref() {
            Some(Processed::Groups(groups)) => groups.iter().map(|(k, _)| k.clone()).collect(),
            _ => Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .field("group_by", &self.group_by)
            .field("pagination", &self.pagination)
            .field("expansion", &self.expansion)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Table`].
///
/// Validation happens in [`build`](TableBuilder::build): bad columns or a
/// zero page size fail there, never during a pass.
pub struct TableBuilder<T> {
    columns: Vec<Column<T>>,
    rows: Arc<[T]>,
    config: TableConfig,
    page_size: Option<usize>,
    default_sort: Option<SortState>,
    group_by: Option<GroupBy<T>>,
    group_sort: Option<GroupComparator<T>>,
    group_header: Option<GroupHeaderFn<T>>,
    expanded: ExpansionState,
    pagination: Option<PaginationProps>,
    handlers: Handlers,
}

impl<T: TableRow> TableBuilder<T> {
    /// Create a builder with column definitions and no rows.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            rows: Arc::from(Vec::new()),
            config: TableConfig::default(),
            page_size: None,
            default_sort: None,
            group_by: None,
            group_sort: None,
            group_header: None,
            expanded: ExpansionState::new(),
            pagination: None,
            handlers: Handlers::default(),
        }
    }

    /// Set the initial rows.
    pub fn rows(mut self, rows: impl Into<Arc<[T]>>) -> Self {
        self.rows = rows.into();
        self
    }

    /// Set the shared defaults.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Page size for uncontrolled pagination. Overrides the config default.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Initial sort state.
    pub fn default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Take over sorting: the handler gets each sort change and the caller
    /// re-supplies rows in the new order.
    pub fn on_sort(mut self, f: impl FnMut(&str, SortDirection) + 'static) -> Self {
        self.handlers.on_sort = Some(Box::new(f));
        self
    }

    /// Group rows.
    pub fn group_by(mut self, group_by: GroupBy<T>) -> Self {
        self.group_by = Some(group_by);
        self
    }

    /// Explicit group comparator, used when the active sort column has no
    /// group-aggregate sort value.
    pub fn group_sort(
        mut self,
        f: impl Fn(&Group<'_, T>, &Group<'_, T>) -> std::cmp::Ordering + Send + Sync + 'static,
    ) -> Self {
        self.group_sort = Some(Arc::new(f));
        self
    }

    /// Custom group header renderer.
    pub fn group_header(
        mut self,
        f: impl Fn(&str, &[&T], bool) -> String + Send + Sync + 'static,
    ) -> Self {
        self.group_header = Some(Arc::new(f));
        self
    }

    /// Groups expanded from the start.
    pub fn expanded(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.expanded = keys.into_iter().collect();
        self
    }

    /// Hand page state to the caller (controlled pagination).
    pub fn pagination(
        mut self,
        props: PaginationProps,
        on_page_change: impl FnMut(usize) + 'static,
    ) -> Self {
        self.pagination = Some(props);
        self.handlers.on_page_change = Some(Box::new(on_page_change));
        self
    }

    /// Called after a page change.
    ///
    /// In controlled mode this is the handler passed to
    /// [`pagination`](TableBuilder::pagination).
    pub fn on_page_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.handlers.on_page_change = Some(Box::new(f));
        self
    }

    /// Called after a page-size change.
    pub fn on_page_size_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.handlers.on_page_size_change = Some(Box::new(f));
        self
    }

    /// Validate the configuration and build the table.
    pub fn build(self) -> Result<Table<T>, ConfigError> {
        self.config.validate()?;
        let columns = ColumnSet::new(self.columns)?;

        let pagination = match (self.pagination, self.page_size.or(self.config.default_page_size)) {
            (Some(props), _) => {
                if props.total_pages == 0 {
                    return Err(ConfigError::NoPages);
                }
                Pagination::Controlled(props)
            }
            (None, Some(0)) => return Err(ConfigError::invalid_page_size(0)),
            (None, Some(size)) => Pagination::Uncontrolled(PageState::new(size)),
            (None, None) => Pagination::Disabled,
        };

        let table = Table {
            id: TableId::new(),
            rows: self.rows,
            columns,
            config: self.config,
            sort: self.default_sort,
            group_by: self.group_by,
            group_sort: self.group_sort,
            group_header: self.group_header,
            pagination,
            expansion: self.expanded,
            handlers: self.handlers,
            processed: RefCell::new(None),
        };
        log::debug!(
            "[{}] built with {} columns, {} rows, pagination {:?}",
            table.id,
            table.columns.len(),
            table.rows.len(),
            table.pagination
        );
        Ok(table)
    }
}
