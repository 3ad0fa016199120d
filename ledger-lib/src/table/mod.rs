//! Tabular views over record collections.
//!
//! A [`Table`] runs every pass through the same pipeline:
//!
//! 1. **Sort** rows by the active column (stable, nulls last).
//! 2. **Group** sorted rows into buckets and order the buckets.
//! 3. **Paginate** rows, or groups when grouped.
//!
//! The engines are also usable on their own: [`sort_rows`],
//! [`group_rows`] with [`order_groups`], and [`paginate`].

mod column;
mod events;
mod expansion;
mod group;
mod page;
mod sort;
mod state;
mod value;
mod view;

pub use column::Column;
pub use column::ColumnSet;
pub use column::GroupSortValueFn;
pub use column::RenderFn;
pub use column::SortValueFn;
pub use column::TableRow;
pub use events::EventResult;
pub use expansion::ExpansionState;
pub use group::Group;
pub use group::GroupBy;
pub use group::GroupComparator;
pub use group::GroupKeyFn;
pub use group::UNDEFINED_GROUP_KEY;
pub use group::group_rows;
pub use group::order_groups;
pub use page::PageState;
pub use page::PageWindow;
pub use page::Pagination;
pub use page::PaginationProps;
pub use page::clamp_page;
pub use page::paginate;
pub use page::total_pages;
pub use sort::SortDirection;
pub use sort::SortState;
pub use sort::compare_sort_values;
pub use sort::sort_rows;
pub use state::GroupHeaderFn;
pub use state::PageHandler;
pub use state::SortHandler;
pub use state::Table;
pub use state::TableBuilder;
pub use state::TableId;
pub use value::SortValue;
pub use view::GroupView;
pub use view::HeaderCell;
pub use view::PageInfo;
pub use view::TableView;
pub use view::ViewBody;
