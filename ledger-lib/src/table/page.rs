//! Pagination engine: page state, controlled props, and page windows.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Compute the window for one page of `total_items` items.
///
/// The requested page is clamped, so the window is never out of range.
///
/// # Example
///
/// ```
/// use ledger_lib::table::paginate;
///
/// let window = paginate(5, 5, 2);
/// assert_eq!(window.total_pages, 3);
/// assert_eq!(window.current_page, 3);
/// assert_eq!(window.range, 4..5);
/// ```
pub fn paginate(total_items: usize, current_page: usize, page_size: usize) -> PageWindow {
    let pages = total_pages(total_items, page_size);
    let page = clamp_page(current_page, pages);
    let start = ((page - 1) * page_size).min(total_items);
    let end = (page * page_size).min(total_items);

    PageWindow {
        range: start..end,
        current_page: page,
        total_pages: pages,
        total_items,
        page_size: Some(page_size),
    }
}

/// The slice of items shown on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Positions of the visible items (rows, or groups when grouped).
    pub range: Range<usize>,
    /// Current page, 1-based.
    pub current_page: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Number of paginated items.
    pub total_items: usize,
    /// Items per page, `None` when pagination is off.
    pub page_size: Option<usize>,
}

impl PageWindow {
    /// A single page showing every item.
    pub fn all(total_items: usize) -> Self {
        Self {
            range: 0..total_items,
            current_page: 1,
            total_pages: 1,
            total_items,
            page_size: None,
        }
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// The visible part of `items`.
    pub fn slice<'a, I>(&self, items: &'a [I]) -> &'a [I] {
        let end = self.range.end.min(items.len());
        let start = self.range.start.min(end);
        &items[start..end]
    }
}

/// Internally tracked page state for uncontrolled pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Creates page state on page 1. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move to `page`, clamped against `total_items`. Returns the page landed on.
    pub fn set_page(&mut self, page: usize, total_items: usize) -> usize {
        self.current_page = clamp_page(page, total_pages(total_items, self.page_size));
        self.current_page
    }

    /// Change the page size and go back to page 1.
    ///
    /// Returns `false` (and changes nothing) for a zero size.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            return false;
        }
        self.page_size = page_size;
        self.current_page = 1;
        true
    }

    /// Go back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pull the current page back into range after the item count changed.
    pub fn clamp(&mut self, total_items: usize) {
        self.current_page = clamp_page(self.current_page, total_pages(total_items, self.page_size));
    }

    /// Window for `total_items` items.
    pub fn window(&self, total_items: usize) -> PageWindow {
        paginate(total_items, self.current_page, self.page_size)
    }
}

/// Externally owned page state for controlled pagination.
///
/// The caller has already fetched only the current page's rows; the table
/// does not slice them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationProps {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Total item count across all pages, if known.
    #[serde(default)]
    pub total_items: Option<usize>,
    /// Items per page, if known.
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl PaginationProps {
    /// Creates controlled props.
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
            total_items: None,
            page_size: None,
        }
    }

    /// Sets the total item count.
    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.total_items = Some(total_items);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Pagination mode of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    /// No page size anywhere: everything on one page.
    Disabled,
    /// The table owns page state and slices the processed items.
    Uncontrolled(PageState),
    /// The caller owns page state; the table only reports it.
    Controlled(PaginationProps),
}

impl Pagination {
    /// Window over `total_items` processed items.
    pub fn window(&self, total_items: usize) -> PageWindow {
        match self {
            Pagination::Disabled => PageWindow::all(total_items),
            Pagination::Uncontrolled(state) => state.window(total_items),
            Pagination::Controlled(props) => {
                let pages = props.total_pages.max(1);
                PageWindow {
                    range: 0..total_items,
                    current_page: clamp_page(props.current_page, pages),
                    total_pages: pages,
                    total_items: props.total_items.unwrap_or(total_items),
                    page_size: props.page_size,
                }
            }
        }
    }

    /// Returns `true` for controlled pagination.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Pagination::Controlled(_))
    }
}
