//! Table view engine: column descriptors, search, sort, pagination,
//! selection, row actions and rendering of the current page.

pub mod actions;
pub mod column;
pub mod column_filter;
pub mod fuzzy;
pub mod pagination;
pub mod render;
pub mod selection;
pub mod sort;
pub mod table_view;

pub use column::{ColumnDescriptor, Rendered};
pub use selection::RowKey;
pub use table_view::{PagingMode, TableOptions, TableView};
