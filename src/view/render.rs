use crate::view::actions::Confirmation;
use crate::view::column::Rendered;
use crate::view::sort::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub placeholder: String,
    pub query: String,
}

/// Row counts: all rows, after filtering, and selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub total: usize,
    pub filtered: usize,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl PagerInfo {
    /// "Página X de Y", one-based
    pub fn label(&self) -> String {
        format!("Página {} de {}", self.page_index + 1, self.page_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealInfo {
    pub visible: usize,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<K> {
    pub key: K,
    pub selected: bool,
    pub cells: Vec<Rendered>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<K> {
    Loading(String),
    Empty(String),
    Rows(Vec<RenderedRow<K>>),
}

impl<K> TableBody<K> {
    pub fn rows(&self) -> &[RenderedRow<K>] {
        match self {
            TableBody::Rows(rows) => rows,
            TableBody::Loading(_) | TableBody::Empty(_) => &[],
        }
    }
}

/// Everything a front-end needs to draw the table for the current state
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable<K> {
    pub title: Option<String>,
    pub description: Option<String>,
    pub headers: Vec<HeaderCell>,
    /// Present when filters are enabled
    pub search: Option<SearchBox>,
    pub page_size_options: Vec<usize>,
    pub stats: TableStats,
    pub body: TableBody<K>,
    /// Present only with more than one page
    pub pager: Option<PagerInfo>,
    pub reveal: Option<RevealInfo>,
    pub export_enabled: bool,
    pub selection_enabled: bool,
    pub pending_confirmation: Option<Confirmation>,
}

impl<K> RenderedTable<K> {
    /// Summary line shown above the table; filtered and selected counts
    /// appear only when they carry information
    pub fn stats_line(&self) -> String {
        let mut line = format!("Total: {}", self.stats.total);
        if self.stats.filtered != self.stats.total {
            line.push_str(&format!(" | Filtrados: {}", self.stats.filtered));
        }
        if self.stats.selected > 0 {
            line.push_str(&format!(" | Selecionados: {}", self.stats.selected));
        }
        line
    }
}
