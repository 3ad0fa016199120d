//! Render-ready output of one pipeline pass.

use super::column::ColumnSet;
use super::column::TableRow;
use super::sort::SortDirection;

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Whether clicking this header sorts.
    pub sortable: bool,
    /// Direction if this is the active sort column.
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    /// Sort indicator for the header: `"▲"`, `"▼"`, or empty.
    pub fn indicator(&self) -> &'static str {
        match self.sort {
            Some(SortDirection::Asc) => "▲",
            Some(SortDirection::Desc) => "▼",
            None => "",
        }
    }
}

/// One group on the current page.
#[derive(Debug)]
pub struct GroupView<'a, T> {
    /// Group identity.
    pub key: String,
    /// All members of the group, in sorted order.
    pub members: Vec<&'a T>,
    /// Whether the group is expanded.
    pub expanded: bool,
    /// Rendered group header.
    pub header: String,
}

impl<'a, T> GroupView<'a, T> {
    /// Members to show: all of them when expanded, none when collapsed.
    pub fn visible_members(&self) -> &[&'a T] {
        if self.expanded { &self.members } else { &[] }
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

/// Body of the current page.
#[derive(Debug)]
pub enum ViewBody<'a, T> {
    /// Flat rows.
    Rows(Vec<&'a T>),
    /// Groups; the page unit is the group.
    Groups(Vec<GroupView<'a, T>>),
}

impl<'a, T> ViewBody<'a, T> {
    /// Number of page units (rows or groups).
    pub fn len(&self) -> usize {
        match self {
            ViewBody::Rows(rows) => rows.len(),
            ViewBody::Groups(groups) => groups.len(),
        }
    }

    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows to display, in order. Collapsed groups contribute none.
    pub fn visible_rows(&self) -> Vec<&'a T> {
        match self {
            ViewBody::Rows(rows) => rows.clone(),
            ViewBody::Groups(groups) => groups
                .iter()
                .flat_map(|g| g.visible_members().iter().copied())
                .collect(),
        }
    }
}

/// Pagination state as seen by page controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Number of paginated items (rows, or groups when grouped).
    pub total_items: usize,
    /// Items per page, `None` when pagination is off.
    pub page_size: Option<usize>,
    /// Whether the caller owns page state.
    pub controlled: bool,
    /// Choices for a page-size picker.
    pub page_size_options: Vec<usize>,
}

impl PageInfo {
    /// Returns `true` if there is a page after the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns `true` if there is a page before the current one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Render-ready table: header, current page body, and page controls.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Header cells, in column order.
    pub header: Vec<HeaderCell>,
    /// Current page body.
    pub body: ViewBody<'a, T>,
    /// Page controls.
    pub pagination: PageInfo,
    pub(crate) columns: &'a ColumnSet<T>,
}

impl<'a, T: TableRow> TableView<'a, T> {
    /// Render one row's cells, in column order.
    pub fn cells(&self, row: &T) -> Vec<String> {
        self.columns.render_row(row)
    }

    /// Column set the view renders with.
    pub fn columns(&self) -> &'a ColumnSet<T> {
        self.columns
    }
}
