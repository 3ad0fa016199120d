//! Interaction handling for tables: header clicks, paging, group toggles.

use super::column::TableRow;
use super::page::PageState;
use super::page::Pagination;
use super::page::clamp_page;
use super::sort::SortState;
use super::state::Table;

/// Result of handling an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing changed.
    Ignored,
    /// State changed (or the change was forwarded to the caller).
    Consumed,
}

impl EventResult {
    /// Check if the interaction was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl<T: TableRow> Table<T> {
    /// Handle a click on the header of column `key`.
    ///
    /// Toggles the sort (ascending first, then between descending and
    /// ascending) and fires `on_sort`. Unknown and non-sortable columns are
    /// ignored.
    pub fn on_header_click(&mut self, key: &str) -> EventResult {
        if !self.columns.is_sortable(key) {
            log::trace!("[{}] header '{}' is not sortable", self.id(), key);
            return EventResult::Ignored;
        }

        let next = SortState::toggle(self.sort.as_ref(), key);
        log::trace!("[{}] sort -> {} {}", self.id(), next.key, next.direction);
        let (key, direction) = (next.key.clone(), next.direction);
        self.set_sort(Some(next));

        if let Some(on_sort) = self.handlers.on_sort.as_mut() {
            on_sort(&key, direction);
        }
        EventResult::Consumed
    }

    /// Go to `page`.
    ///
    /// Out-of-range requests are clamped to `1..=total_pages`. Uncontrolled
    /// tables move and fire `on_page_change`; controlled tables only fire
    /// `on_page_change` and wait for new props.
    pub fn set_page(&mut self, page: usize) -> EventResult {
        let total_items = self.item_count();
        let id = self.id();

        let target = match &mut self.pagination {
            Pagination::Disabled => return EventResult::Ignored,
            Pagination::Uncontrolled(state) => {
                let before = state.current_page();
                let landed = state.set_page(page, total_items);
                if landed != page {
                    log::warn!("[{}] page {} out of range, clamped to {}", id, page, landed);
                }
                if landed == before {
                    return EventResult::Ignored;
                }
                landed
            }
            Pagination::Controlled(props) => {
                let target = clamp_page(page, props.total_pages);
                if target != page {
                    log::warn!("[{}] page {} out of range, clamped to {}", id, page, target);
                }
                if target == props.current_page {
                    return EventResult::Ignored;
                }
                target
            }
        };

        log::trace!("[{}] page -> {}", id, target);
        if let Some(on_page_change) = self.handlers.on_page_change.as_mut() {
            on_page_change(target);
        }
        EventResult::Consumed
    }

    /// Go to the next page.
    pub fn next_page(&mut self) -> EventResult {
        let window = self.window();
        if !window.has_next() {
            return EventResult::Ignored;
        }
        self.set_page(window.current_page + 1)
    }

    /// Go to the previous page.
    pub fn previous_page(&mut self) -> EventResult {
        let window = self.window();
        if !window.has_previous() {
            return EventResult::Ignored;
        }
        self.set_page(window.current_page - 1)
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> EventResult {
        self.set_page(1)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> EventResult {
        let total_pages = self.window().total_pages;
        self.set_page(total_pages)
    }

    /// Change the page size.
    ///
    /// Always lands on page 1. A zero size is ignored. A table without
    /// pagination starts paginating. Controlled tables forward the request
    /// to `on_page_size_change`, or ignore it if there is none.
    pub fn set_page_size(&mut self, page_size: usize) -> EventResult {
        if page_size == 0 {
            return EventResult::Ignored;
        }
        let id = self.id();

        match &mut self.pagination {
            Pagination::Controlled(_) if self.handlers.on_page_size_change.is_none() => {
                return EventResult::Ignored;
            }
            Pagination::Controlled(_) => {}
            Pagination::Uncontrolled(state) => {
                state.set_page_size(page_size);
            }
            Pagination::Disabled => {
                log::debug!("[{}] pagination enabled with page size {}", id, page_size);
            }
        }
        if matches!(self.pagination, Pagination::Disabled) {
            self.pagination = Pagination::Uncontrolled(PageState::new(page_size));
        }

        log::trace!("[{}] page size -> {}", id, page_size);
        if let Some(on_page_size_change) = self.handlers.on_page_size_change.as_mut() {
            on_page_size_change(page_size);
        }
        EventResult::Consumed
    }

    /// Toggle a group. Returns `true` if it is now expanded.
    ///
    /// Expansion is internal view state; no callback fires.
    pub fn toggle_group(&mut self, key: &str) -> bool {
        let expanded = self.expansion.toggle(key);
        log::trace!("[{}] group '{}' expanded: {}", self.id(), key, expanded);
        expanded
    }

    /// Expand every group (all pages).
    pub fn expand_all(&mut self) {
        for key in self.group_keys() {
            self.expansion.expand(&key);
        }
    }

    /// Collapse every group, forgetting orphaned keys too.
    pub fn collapse_all(&mut self) {
        self.expansion.clear();
    }
}
