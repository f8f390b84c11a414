use crate::data::cell_value::CellValue;
use crate::view::selection::RowKey;

/// A loosely-typed row loaded from a file or a JSON row source.
///
/// Fields keep their source order so derived columns match the file layout.
/// The key is the record's position in the source, which is stable for the
/// lifetime of one loaded row set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub position: usize,
    pub fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new(position: usize, fields: Vec<(String, CellValue)>) -> Self {
        Self { position, fields }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl RowKey for Record {
    type Key = usize;

    fn row_key(&self) -> usize {
        self.position
    }
}
