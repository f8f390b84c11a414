use crate::data::value_compare::compare_nulls_last;
use crate::view::column::{find_column, ColumnDescriptor};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    None,
}

/// Single active sort column
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        if order == SortOrder::None {
            return Self::default();
        }
        Self {
            column: Some(column.into()),
            order,
        }
    }

    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.order != SortOrder::None
    }

    /// Header click: unsorted, ascending, descending, then back to unsorted.
    /// A different column always starts at ascending.
    pub fn toggle(&mut self, column: &str) {
        let next = match (&self.column, self.order) {
            (Some(current), SortOrder::Ascending) if current == column => SortOrder::Descending,
            (Some(current), SortOrder::Descending) if current == column => SortOrder::None,
            _ => SortOrder::Ascending,
        };
        *self = Self::new(column, next);
    }

    /// Order shown next to a column header
    pub fn order_for(&self, column: &str) -> SortOrder {
        match &self.column {
            Some(current) if current == column => self.order,
            _ => SortOrder::None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Reorder `indices` (positions into `rows`) by a column's raw value.
///
/// Stable, so ties keep their incoming order. Nulls always go last. Returns
/// false and leaves `indices` untouched for an unknown or non-sortable column.
pub fn sort_indices<T>(
    indices: &mut Vec<usize>,
    rows: &[T],
    columns: &[ColumnDescriptor<T>],
    column_key: &str,
    order: SortOrder,
) -> bool {
    let ascending = match order {
        SortOrder::Ascending => true,
        SortOrder::Descending => false,
        SortOrder::None => return false,
    };

    let column = match find_column(columns, column_key) {
        Some(column) if column.is_sortable() => column,
        _ => {
            debug!(target: "sort", "Ignoring sort on unknown column '{}'", column_key);
            return false;
        }
    };

    let mut keyed: Vec<_> = indices
        .iter()
        .map(|&idx| (idx, column.value(&rows[idx])))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_nulls_last(a, b, ascending));

    *indices = keyed.into_iter().map(|(idx, _)| idx).collect();
    true
}

/// New ordering of `rows` by a column, leaving the input as it was.
/// An unknown column key returns the rows in their original order.
pub fn sort_rows<'a, T>(
    rows: &'a [T],
    columns: &[ColumnDescriptor<T>],
    column_key: &str,
    order: SortOrder,
) -> Vec<&'a T> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    sort_indices(&mut indices, rows, columns, column_key, order);
    indices.into_iter().map(|idx| &rows[idx]).collect()
}
