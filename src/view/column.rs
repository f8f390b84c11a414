use crate::data::cell_value::CellValue;
use crate::view::actions::{ActionMenu, RowAction, DEFAULT_MAX_INLINE_ACTIONS};
use chrono::NaiveDate;

pub type ValueFn<T> = Box<dyn Fn(&T) -> CellValue>;
pub type RenderFn<T> = Box<dyn Fn(&T) -> Rendered>;
pub type ActionsFn<T> = Box<dyn Fn(&T) -> Vec<RowAction>>;

/// Badge colour variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Default,
    Secondary,
    Destructive,
    Outline,
}

/// Display value produced for one cell
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Badge { label: String, tone: BadgeTone },
    Actions(ActionMenu),
    /// Placeholder for missing values
    Empty,
}

impl Rendered {
    pub fn text(s: impl Into<String>) -> Self {
        Rendered::Text(s.into())
    }

    pub fn badge(label: impl Into<String>, tone: BadgeTone) -> Self {
        Rendered::Badge {
            label: label.into(),
            tone,
        }
    }

    /// Plain text for terminals and exports; `None` for action menus
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Rendered::Text(s) => Some(s.clone()),
            Rendered::Badge { label, .. } => Some(label.clone()),
            Rendered::Empty => Some("-".to_string()),
            Rendered::Actions(_) => None,
        }
    }

    /// Default presentation of a raw value
    pub fn from_value(value: &CellValue) -> Self {
        match value {
            CellValue::Null => Rendered::Empty,
            CellValue::Boolean(true) => Rendered::badge("Sim", BadgeTone::Default),
            CellValue::Boolean(false) => Rendered::badge("Não", BadgeTone::Secondary),
            CellValue::Date(d) => Rendered::Text(format_date_br(*d)),
            other => Rendered::Text(other.to_string()),
        }
    }
}

enum ColumnKind<T> {
    Data {
        value: ValueFn<T>,
        render: Option<RenderFn<T>>,
    },
    Actions {
        actions: ActionsFn<T>,
        max_inline: usize,
    },
}

/// One column of a table: stable key, header label, and how to read and show a row
pub struct ColumnDescriptor<T> {
    key: String,
    header: String,
    kind: ColumnKind<T>,
    sortable: bool,
    filterable: bool,
}

impl<T> ColumnDescriptor<T> {
    /// Data column; `value` extracts the raw value used for sort, filter and export
    pub fn new<F>(key: impl Into<String>, header: impl Into<String>, value: F) -> Self
    where
        F: Fn(&T) -> CellValue + 'static,
    {
        Self {
            key: key.into(),
            header: header.into(),
            kind: ColumnKind::Data {
                value: Box::new(value),
                render: None,
            },
            sortable: true,
            filterable: true,
        }
    }

    /// Action-menu column; never sorted, filtered, searched or exported
    pub fn actions<F>(key: impl Into<String>, header: impl Into<String>, actions: F) -> Self
    where
        F: Fn(&T) -> Vec<RowAction> + 'static,
    {
        Self {
            key: key.into(),
            header: header.into(),
            kind: ColumnKind::Actions {
                actions: Box::new(actions),
                max_inline: DEFAULT_MAX_INLINE_ACTIONS,
            },
            sortable: false,
            filterable: false,
        }
    }

    /// Custom display for a data column (badges, currency, dates)
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> Rendered + 'static,
    {
        if let ColumnKind::Data { render: slot, .. } = &mut self.kind {
            *slot = Some(Box::new(render));
        }
        self
    }

    /// How many actions show inline before the overflow menu
    pub fn with_max_inline(mut self, max: usize) -> Self {
        if let ColumnKind::Actions { max_inline, .. } = &mut self.kind {
            *max_inline = max;
        }
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable && self.is_data();
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable && self.is_data();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn is_data(&self) -> bool {
        matches!(self.kind, ColumnKind::Data { .. })
    }

    pub fn is_actions(&self) -> bool {
        matches!(self.kind, ColumnKind::Actions { .. })
    }

    /// Raw value for a row; action columns have none
    pub fn value(&self, row: &T) -> CellValue {
        match &self.kind {
            ColumnKind::Data { value, .. } => value(row),
            ColumnKind::Actions { .. } => CellValue::Null,
        }
    }

    pub fn render(&self, row: &T) -> Rendered {
        match &self.kind {
            ColumnKind::Data {
                render: Some(render),
                ..
            } => render(row),
            ColumnKind::Data { value, .. } => Rendered::from_value(&value(row)),
            ColumnKind::Actions {
                actions,
                max_inline,
            } => Rendered::Actions(ActionMenu::split(actions(row), *max_inline)),
        }
    }

    /// Text written to CSV.
    ///
    /// Nested objects and arrays are written as JSON; custom renders contribute
    /// their text; otherwise the raw value is written, empty for null.
    pub fn export_text(&self, row: &T) -> Option<String> {
        match &self.kind {
            ColumnKind::Actions { .. } => None,
            ColumnKind::Data { value, render } => {
                let raw = value(row);
                if let CellValue::Json(_) = raw {
                    return Some(raw.export_text());
                }
                match render {
                    Some(render) => match render(row) {
                        Rendered::Empty => Some(String::new()),
                        other => Some(other.plain_text().unwrap_or_default()),
                    },
                    None => Some(raw.export_text()),
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("actions", &self.is_actions())
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .finish()
    }
}

/// Find a column by key
pub fn find_column<'a, T>(
    columns: &'a [ColumnDescriptor<T>],
    key: &str,
) -> Option<&'a ColumnDescriptor<T>> {
    columns.iter().find(|c| c.key() == key)
}

/// dd/mm/yyyy
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Brazilian real with thousands separators, e.g. `R$ 1.234,56`
pub fn format_currency_brl(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!(
        "{}R$ {},{:02}",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}
