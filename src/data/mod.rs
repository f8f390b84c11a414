//! Row data: typed cell values, value ordering, and loosely-typed records
//! loaded from CSV or JSON files.

pub mod cell_value;
pub mod record;
pub mod row_loaders;
pub mod value_compare;
