use crate::export::{build_csv, export_filename, CsvExport};
use crate::view::actions::{
    dispatch, ActionOutcome, Confirmation, PendingAction, RowAction, RowActionHandler,
};
use crate::view::column::{find_column, ColumnDescriptor};
use crate::view::column_filter::ColumnFilter;
use crate::view::fuzzy::FuzzyFilter;
use crate::view::pagination::{
    paginate, PaginationState, RevealWindow, DEFAULT_PAGE_SIZE, DEFAULT_REVEAL_INCREMENT,
    DEFAULT_REVEAL_INITIAL, PAGE_SIZE_OPTIONS,
};
use crate::view::render::{
    HeaderCell, PagerInfo, RenderedRow, RenderedTable, RevealInfo, SearchBox, TableBody,
    TableStats,
};
use crate::view::selection::{RowKey, Selection};
use crate::view::sort::{sort_indices, SortOrder, SortState};
use anyhow::{anyhow, bail, Result};
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_EMPTY_MESSAGE: &str = "Nenhum registro encontrado";
pub const DEFAULT_LOADING_MESSAGE: &str = "Carregando dados...";
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Buscar...";

/// How the filtered rows are windowed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// Fixed-size pages with a pager
    Pages,
    /// A growing prefix extended by `show_more`
    Reveal,
    /// Every filtered row at once
    Disabled,
}

/// Presentation and feature switches for one table
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub empty_message: String,
    pub loading_message: String,
    pub search_placeholder: String,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub paging: PagingMode,
    pub reveal_initial: usize,
    pub reveal_increment: usize,
    pub enable_filters: bool,
    pub enable_export: bool,
    pub enable_selection: bool,
    pub fuzzy_min_score: i64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            paging: PagingMode::Pages,
            reveal_initial: DEFAULT_REVEAL_INITIAL,
            reveal_increment: DEFAULT_REVEAL_INCREMENT,
            enable_filters: true,
            enable_export: true,
            enable_selection: false,
            fuzzy_min_score: 0,
        }
    }
}

impl TableOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_paging(mut self, paging: PagingMode) -> Self {
        self.paging = paging;
        self
    }

    pub fn with_filters(mut self, enabled: bool) -> Self {
        self.enable_filters = enabled;
        self
    }

    pub fn with_export(mut self, enabled: bool) -> Self {
        self.enable_export = enabled;
        self
    }

    pub fn with_selection(mut self, enabled: bool) -> Self {
        self.enable_selection = enabled;
        self
    }
}

/// Search text plus per-column filters. Survives row replacement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub global_query: String,
    pub column_filters: BTreeMap<String, ColumnFilter>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.global_query.trim().is_empty() || !self.column_filters.is_empty()
    }
}

/// In-memory table over caller rows: filter, sort, paginate, select, export.
///
/// The source rows are never mutated. `visible_rows` holds the positions of
/// the rows that pass both filters, in display order, and is rebuilt after
/// every change that can affect it.
pub struct TableView<T: RowKey> {
    source: Arc<Vec<T>>,
    columns: Vec<ColumnDescriptor<T>>,
    options: TableOptions,
    filter: FilterState,
    sort: SortState,
    pagination: PaginationState,
    reveal: RevealWindow,
    selection: Selection<T::Key>,
    pending: Option<PendingAction<T::Key>>,
    matcher: FuzzyFilter,
    searchable: Option<Vec<String>>,
    loading: bool,
    visible_rows: Vec<usize>,
}

impl<T: RowKey> TableView<T> {
    pub fn new(columns: Vec<ColumnDescriptor<T>>, options: TableOptions) -> Self {
        let pagination = PaginationState::new(options.page_size);
        let reveal = RevealWindow::new(options.reveal_initial, options.reveal_increment);
        let matcher = FuzzyFilter::new().with_min_score(options.fuzzy_min_score);

        Self {
            source: Arc::new(Vec::new()),
            columns,
            options,
            filter: FilterState::default(),
            sort: SortState::default(),
            pagination,
            reveal,
            selection: Selection::new(),
            pending: None,
            matcher,
            searchable: None,
            loading: false,
            visible_rows: Vec::new(),
        }
    }

    /// Restrict the global search to these column keys
    pub fn with_searchable_columns<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable = Some(keys.into_iter().map(Into::into).collect());
        self.update_visible_rows();
        self
    }

    pub fn with_rows(mut self, rows: impl Into<Arc<Vec<T>>>) -> Self {
        self.set_rows(rows);
        self
    }

    // Rows

    /// Replace the row set. Filters and sort persist; the page index is
    /// clamped and selection keeps only keys that are still present.
    pub fn set_rows(&mut self, rows: impl Into<Arc<Vec<T>>>) {
        self.source = rows.into();

        let present: HashSet<T::Key> = self.source.iter().map(RowKey::row_key).collect();
        self.selection.retain(|key| present.contains(key));
        if let Some(pending) = &self.pending {
            if !present.contains(&pending.row_key) {
                debug!(target: "table_view", "Dropping pending action for removed row {:?}", pending.row_key);
                self.pending = None;
            }
        }

        self.update_visible_rows();
        debug!(
            target: "table_view",
            "Row set replaced: {} rows, {} after filters",
            self.source.len(),
            self.visible_rows.len()
        );
    }

    pub fn rows(&self) -> &[T] {
        &self.source
    }

    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Filters

    /// Free-text fuzzy search; ignored when filters are disabled
    pub fn set_global_filter(&mut self, query: impl Into<String>) {
        if !self.options.enable_filters {
            debug!(target: "table_view", "Filters disabled, ignoring search");
            return;
        }
        self.filter.global_query = query.into();
        self.pagination.first();
        self.reveal.reset();
        self.update_visible_rows();
    }

    pub fn global_filter(&self) -> &str {
        &self.filter.global_query
    }

    /// Filter one column. A blank `Contains` clears it; unknown or
    /// non-filterable columns are ignored.
    pub fn set_column_filter(&mut self, column_key: &str, filter: ColumnFilter) {
        match find_column(&self.columns, column_key) {
            Some(column) if column.is_filterable() => {}
            _ => {
                debug!(target: "table_view", "Ignoring filter on unknown column '{}'", column_key);
                return;
            }
        }

        if filter.is_noop() {
            self.filter.column_filters.remove(column_key);
        } else {
            self.filter
                .column_filters
                .insert(column_key.to_string(), filter);
        }
        self.pagination.first();
        self.reveal.reset();
        self.update_visible_rows();
    }

    pub fn clear_column_filter(&mut self, column_key: &str) {
        if self.filter.column_filters.remove(column_key).is_some() {
            self.pagination.first();
            self.reveal.reset();
            self.update_visible_rows();
        }
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.pagination.first();
        self.reveal.reset();
        self.update_visible_rows();
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    // Sort

    /// Header click on a column
    pub fn toggle_sort(&mut self, column_key: &str) {
        if !self.is_sortable(column_key) {
            debug!(target: "table_view", "Column '{}' is not sortable", column_key);
            return;
        }
        self.sort.toggle(column_key);
        self.pagination.first();
        self.reveal.reset();
        self.update_visible_rows();
    }

    pub fn set_sort(&mut self, column_key: &str, order: SortOrder) {
        if !self.is_sortable(column_key) {
            debug!(target: "table_view", "Column '{}' is not sortable", column_key);
            return;
        }
        self.sort = SortState::new(column_key, order);
        self.pagination.first();
        self.reveal.reset();
        self.update_visible_rows();
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.pagination.first();
        self.reveal.reset();
        self.update_visible_rows();
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    fn is_sortable(&self, column_key: &str) -> bool {
        find_column(&self.columns, column_key).is_some_and(|c| c.is_sortable())
    }

    // Pagination

    pub fn next_page(&mut self) {
        self.pagination.next(self.visible_rows.len());
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    pub fn first_page(&mut self) {
        self.pagination.first();
    }

    pub fn last_page(&mut self) {
        self.pagination.last(self.visible_rows.len());
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.pagination
            .set_page_index(page_index, self.visible_rows.len());
    }

    /// Change rows per page and return to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            bail!("Page size must be greater than zero");
        }
        self.pagination.set_page_size(page_size);
        debug!(target: "table_view", "Page size set to {}", page_size);
        Ok(())
    }

    pub fn page_index(&self) -> usize {
        self.pagination.page_index
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.visible_rows.len())
    }

    pub fn has_more(&self) -> bool {
        match self.options.paging {
            PagingMode::Pages => self.pagination.can_next(self.visible_rows.len()),
            PagingMode::Reveal => self.reveal.has_more(self.visible_rows.len()),
            PagingMode::Disabled => false,
        }
    }

    /// Reveal mode: extend the visible prefix
    pub fn show_more(&mut self) {
        self.reveal.show_more();
    }

    pub fn reset_reveal(&mut self) {
        self.reveal.reset();
    }

    // Counts and rows

    pub fn total_count(&self) -> usize {
        self.source.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            total: self.total_count(),
            filtered: self.filtered_count(),
            selected: self.selected_count(),
        }
    }

    /// Every row that passes the filters, in display order (all pages)
    pub fn filtered_rows(&self) -> Vec<&T> {
        self.visible_rows.iter().map(|&i| &self.source[i]).collect()
    }

    /// Rows shown right now
    pub fn current_page(&self) -> Vec<&T> {
        self.current_window()
            .iter()
            .map(|&i| &self.source[i])
            .collect()
    }

    fn current_window(&self) -> &[usize] {
        match self.options.paging {
            PagingMode::Pages => {
                paginate(
                    &self.visible_rows,
                    self.pagination.page_index,
                    self.pagination.page_size(),
                )
                .visible
            }
            PagingMode::Reveal => self.reveal.visible(&self.visible_rows),
            PagingMode::Disabled => &self.visible_rows,
        }
    }

    // Selection

    /// Returns whether the row is selected afterwards; unknown keys and
    /// disabled selection leave the state alone
    pub fn toggle_selection(&mut self, key: &T::Key) -> bool {
        if !self.options.enable_selection || self.row_by_key(key).is_none() {
            return false;
        }
        self.selection.toggle(key)
    }

    pub fn select_all_filtered(&mut self) {
        if !self.options.enable_selection {
            return;
        }
        for &idx in &self.visible_rows {
            self.selection.select(self.source[idx].row_key());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, key: &T::Key) -> bool {
        self.selection.contains(key)
    }

    /// Selected rows in source order
    pub fn selected_rows(&self) -> Vec<&T> {
        self.source
            .iter()
            .filter(|row| self.selection.contains(&row.row_key()))
            .collect()
    }

    // Actions

    pub fn row_by_key(&self, key: &T::Key) -> Option<&T> {
        self.source.iter().find(|row| row.row_key() == *key)
    }

    /// Fire a row action. Simple actions dispatch now; confirm actions wait
    /// for [`confirm_pending_action`](Self::confirm_pending_action).
    pub fn trigger_action<H>(
        &mut self,
        key: &T::Key,
        action: &RowAction,
        handler: &mut H,
    ) -> ActionOutcome
    where
        H: RowActionHandler<T> + ?Sized,
    {
        if action.is_disabled() {
            debug!(target: "table_view", "Action '{}' is disabled", action.label());
            return ActionOutcome::Ignored;
        }

        let source = Arc::clone(&self.source);
        let Some(row) = source.iter().find(|row| row.row_key() == *key) else {
            debug!(target: "table_view", "No row with key {:?}", key);
            return ActionOutcome::Ignored;
        };

        match action {
            RowAction::Simple { kind, .. } => {
                dispatch(kind, row, handler);
                ActionOutcome::Dispatched(kind.clone())
            }
            RowAction::Confirm { kind, confirm, .. } => {
                self.pending = Some(PendingAction {
                    row_key: key.clone(),
                    kind: kind.clone(),
                    confirm: confirm.clone(),
                });
                ActionOutcome::AwaitingConfirmation
            }
        }
    }

    pub fn pending_confirmation(&self) -> Option<&Confirmation> {
        self.pending.as_ref().map(|p| &p.confirm)
    }

    pub fn pending_action(&self) -> Option<&PendingAction<T::Key>> {
        self.pending.as_ref()
    }

    /// User accepted the prompt: run the parked action
    pub fn confirm_pending_action<H>(&mut self, handler: &mut H) -> ActionOutcome
    where
        H: RowActionHandler<T> + ?Sized,
    {
        let Some(pending) = self.pending.take() else {
            return ActionOutcome::Ignored;
        };

        match self.row_by_key(&pending.row_key) {
            Some(row) => {
                dispatch(&pending.kind, row, handler);
                ActionOutcome::Dispatched(pending.kind)
            }
            None => ActionOutcome::Ignored,
        }
    }

    /// User dismissed the prompt; the callback never runs
    pub fn cancel_pending_action(&mut self) -> ActionOutcome {
        match self.pending.take() {
            Some(_) => ActionOutcome::Cancelled,
            None => ActionOutcome::Ignored,
        }
    }

    // Export

    /// CSV of every filtered row in display order, across all pages
    pub fn export_csv(&self, date: NaiveDate) -> Result<CsvExport> {
        if !self.options.enable_export {
            return Err(anyhow!("Export is disabled for this table"));
        }

        let data_columns: Vec<&ColumnDescriptor<T>> =
            self.columns.iter().filter(|c| c.is_data()).collect();
        let headers: Vec<String> = data_columns
            .iter()
            .map(|c| c.header().to_string())
            .collect();

        let rows = self.visible_rows.iter().map(|&idx| {
            let row = &self.source[idx];
            data_columns
                .iter()
                .map(|c| c.export_text(row).unwrap_or_default())
                .collect::<Vec<String>>()
        });

        let (content, row_count) = build_csv(&headers, rows)?;
        let filename = export_filename(self.options.title.as_deref(), date);

        info!(target: "export", "Prepared {} with {} rows", filename, row_count);

        Ok(CsvExport {
            filename,
            content,
            row_count,
        })
    }

    /// Export stamped with today's UTC date
    pub fn export_csv_today(&self) -> Result<CsvExport> {
        self.export_csv(Utc::now().date_naive())
    }

    // Render

    pub fn render(&self) -> RenderedTable<T::Key> {
        let headers = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key().to_string(),
                label: c.header().to_string(),
                sortable: c.is_sortable(),
                sort: self.sort.order_for(c.key()),
            })
            .collect();

        let search = self.options.enable_filters.then(|| SearchBox {
            placeholder: self.options.search_placeholder.clone(),
            query: self.filter.global_query.clone(),
        });

        let body = if self.loading {
            TableBody::Loading(self.options.loading_message.clone())
        } else if self.visible_rows.is_empty() {
            TableBody::Empty(self.options.empty_message.clone())
        } else {
            TableBody::Rows(
                self.current_window()
                    .iter()
                    .map(|&idx| {
                        let row = &self.source[idx];
                        let key = row.row_key();
                        RenderedRow {
                            selected: self.selection.contains(&key),
                            key,
                            cells: self.columns.iter().map(|c| c.render(row)).collect(),
                        }
                    })
                    .collect(),
            )
        };

        let len = self.visible_rows.len();
        let pager = match self.options.paging {
            PagingMode::Pages if !self.loading && self.page_count() > 1 => Some(PagerInfo {
                page_index: self.pagination.page_index,
                page_count: self.page_count(),
                page_size: self.pagination.page_size(),
                can_previous: self.pagination.can_previous(),
                can_next: self.pagination.can_next(len),
            }),
            _ => None,
        };

        let reveal = match self.options.paging {
            PagingMode::Reveal if !self.loading => Some(RevealInfo {
                visible: self.reveal.visible_count().min(len),
                total: len,
                has_more: self.reveal.has_more(len),
            }),
            _ => None,
        };

        RenderedTable {
            title: self.options.title.clone(),
            description: self.options.description.clone(),
            headers,
            search,
            page_size_options: self.options.page_size_options.clone(),
            stats: self.stats(),
            body,
            pager,
            reveal,
            export_enabled: self.options.enable_export,
            selection_enabled: self.options.enable_selection,
            pending_confirmation: self.pending_confirmation().cloned(),
        }
    }

    // Pipeline

    /// Global search, then column filters, then sort; clamps the page
    fn update_visible_rows(&mut self) {
        let source = Arc::clone(&self.source);

        let mut indices: Vec<usize> = (0..source.len())
            .filter(|&idx| self.passes_global_filter(&source[idx]))
            .filter(|&idx| self.passes_column_filters(&source[idx]))
            .collect();

        if let (Some(column), true) = (&self.sort.column, self.sort.is_active()) {
            sort_indices(&mut indices, &source, &self.columns, column, self.sort.order);
        }

        self.visible_rows = indices;
        self.pagination.clamp(self.visible_rows.len());
    }

    fn passes_global_filter(&self, row: &T) -> bool {
        let query = self.filter.global_query.trim();
        if query.is_empty() {
            return true;
        }

        let texts: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.is_data() && self.is_searchable(c.key()))
            .map(|c| c.value(row))
            .filter(|value| !value.is_null())
            .map(|value| value.to_string())
            .collect();

        self.matcher
            .best_match(texts.iter().map(String::as_str), query)
            .passed
    }

    fn is_searchable(&self, key: &str) -> bool {
        match &self.searchable {
            Some(keys) => keys.iter().any(|k| k == key),
            None => true,
        }
    }

    fn passes_column_filters(&self, row: &T) -> bool {
        self.filter.column_filters.iter().all(|(key, filter)| {
            find_column(&self.columns, key)
                .map(|column| filter.matches(&column.value(row)))
                .unwrap_or(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::actions::ActionKind;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: u32,
        name: &'static str,
        age: i64,
    }

    impl RowKey for Person {
        type Key = u32;

        fn row_key(&self) -> u32 {
            self.id
        }
    }

    fn person(id: u32, name: &'static str, age: i64) -> Person {
        Person { id, name, age }
    }

    fn columns() -> Vec<ColumnDescriptor<Person>> {
        vec![
            ColumnDescriptor::new("name", "Nome", |p: &Person| p.name.into()),
            ColumnDescriptor::new("age", "Idade", |p: &Person| p.age.into()),
            ColumnDescriptor::actions("actions", "Ações", |_: &Person| {
                crate::view::actions::crud_actions()
            }),
        ]
    }

    fn table(rows: Vec<Person>, options: TableOptions) -> TableView<Person> {
        TableView::new(columns(), options).with_rows(rows)
    }

    fn names(rows: &[&Person]) -> Vec<&'static str> {
        rows.iter().map(|p| p.name).collect()
    }

    #[derive(Default)]
    struct Calls(Vec<String>);

    impl RowActionHandler<Person> for Calls {
        fn on_view(&mut self, row: &Person) {
            self.0.push(format!("view:{}", row.id));
        }

        fn on_edit(&mut self, row: &Person) {
            self.0.push(format!("edit:{}", row.id));
        }

        fn on_delete(&mut self, row: &Person) {
            self.0.push(format!("delete:{}", row.id));
        }
    }

    #[test]
    fn test_insertion_order_without_sort() {
        let view = table(
            vec![person(1, "Cid", 25), person(2, "Ana", 30)],
            TableOptions::default(),
        );
        assert_eq!(names(&view.current_page()), vec!["Cid", "Ana"]);
    }

    #[test]
    fn test_toggle_sort_cycles_back_to_insertion_order() {
        let mut view = table(
            vec![person(1, "Cid", 25), person(2, "Ana", 30), person(3, "Bob", 20)],
            TableOptions::default(),
        );
        view.toggle_sort("name");
        assert_eq!(names(&view.filtered_rows()), vec!["Ana", "Bob", "Cid"]);
        view.toggle_sort("name");
        assert_eq!(names(&view.filtered_rows()), vec!["Cid", "Bob", "Ana"]);
        view.toggle_sort("name");
        assert_eq!(names(&view.filtered_rows()), vec!["Cid", "Ana", "Bob"]);
    }

    #[test]
    fn test_action_column_is_not_sortable() {
        let mut view = table(vec![person(1, "Ana", 30)], TableOptions::default());
        view.toggle_sort("actions");
        assert!(!view.sort_state().is_active());
    }

    #[test]
    fn test_search_ignored_when_filters_disabled() {
        let mut view = table(
            vec![person(1, "Ana", 30), person(2, "Bob", 25)],
            TableOptions::default().with_filters(false),
        );
        view.set_global_filter("zzz");
        assert_eq!(view.filtered_count(), 2);
        assert!(view.render().search.is_none());
    }

    #[test]
    fn test_search_covers_numbers() {
        let mut view = table(
            vec![person(1, "Ana", 30), person(2, "Bob", 25)],
            TableOptions::default(),
        );
        view.set_global_filter("25");
        assert_eq!(names(&view.filtered_rows()), vec!["Bob"]);
    }

    #[test]
    fn test_searchable_columns_restrict_search() {
        let mut view = TableView::new(columns(), TableOptions::default())
            .with_searchable_columns(["name"])
            .with_rows(vec![person(1, "Ana", 30), person(2, "Bob", 25)]);
        view.set_global_filter("25");
        assert_eq!(view.filtered_count(), 0);
    }

    #[test]
    fn test_confirm_action_waits_for_answer() {
        let mut view = table(vec![person(7, "Ana", 30)], TableOptions::default());
        let mut calls = Calls::default();

        let outcome = view.trigger_action(&7, &RowAction::delete(), &mut calls);
        assert_eq!(outcome, ActionOutcome::AwaitingConfirmation);
        assert!(calls.0.is_empty());
        assert_eq!(
            view.render().pending_confirmation.map(|c| c.title),
            Some("Confirmar exclusão".to_string())
        );

        let outcome = view.confirm_pending_action(&mut calls);
        assert_eq!(outcome, ActionOutcome::Dispatched(ActionKind::Delete));
        assert_eq!(calls.0, vec!["delete:7"]);
        assert!(view.pending_confirmation().is_none());
    }

    #[test]
    fn test_cancelled_action_never_fires() {
        let mut view = table(vec![person(7, "Ana", 30)], TableOptions::default());
        let mut calls = Calls::default();

        view.trigger_action(&7, &RowAction::delete(), &mut calls);
        assert_eq!(view.cancel_pending_action(), ActionOutcome::Cancelled);
        assert_eq!(view.confirm_pending_action(&mut calls), ActionOutcome::Ignored);
        assert!(calls.0.is_empty());
    }

    #[test]
    fn test_disabled_action_and_unknown_row_are_ignored() {
        let mut view = table(vec![person(7, "Ana", 30)], TableOptions::default());
        let mut calls = Calls::default();

        let disabled = RowAction::edit().disabled(true);
        assert_eq!(
            view.trigger_action(&7, &disabled, &mut calls),
            ActionOutcome::Ignored
        );
        assert_eq!(
            view.trigger_action(&99, &RowAction::view(), &mut calls),
            ActionOutcome::Ignored
        );
        assert!(calls.0.is_empty());
    }

    #[test]
    fn test_pending_action_dropped_when_row_removed() {
        let mut view = table(
            vec![person(1, "Ana", 30), person(2, "Bob", 25)],
            TableOptions::default(),
        );
        let mut calls = Calls::default();
        view.trigger_action(&2, &RowAction::delete(), &mut calls);

        view.set_rows(vec![person(1, "Ana", 30)]);

        assert!(view.pending_action().is_none());
    }

    #[test]
    fn test_loading_renders_placeholder() {
        let mut view = table(vec![person(1, "Ana", 30)], TableOptions::default());
        view.set_loading(true);
        let rendered = view.render();
        assert_eq!(
            rendered.body,
            TableBody::Loading(DEFAULT_LOADING_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_empty_rows_render_empty_message() {
        let view = table(Vec::new(), TableOptions::default());
        assert_eq!(
            view.render().body,
            TableBody::Empty(DEFAULT_EMPTY_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_pager_hidden_on_single_page() {
        let view = table(
            vec![person(1, "Ana", 30), person(2, "Bob", 25)],
            TableOptions::default(),
        );
        assert!(view.render().pager.is_none());
    }

    #[test]
    fn test_reveal_mode() {
        let rows: Vec<Person> = (0..15).map(|i| person(i, "Ana", i as i64)).collect();
        let mut options = TableOptions::default().with_paging(PagingMode::Reveal);
        options.reveal_initial = 10;
        options.reveal_increment = 10;
        let mut view = table(rows, options);

        assert_eq!(view.current_page().len(), 10);
        assert!(view.has_more());
        view.show_more();
        assert_eq!(view.current_page().len(), 15);
        assert!(!view.has_more());
        view.reset_reveal();
        assert_eq!(view.render().reveal.map(|r| r.visible), Some(10));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut view = table(vec![person(1, "Ana", 30)], TableOptions::default());
        assert!(view.set_page_size(0).is_err());
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_sort_change_returns_to_first_page() {
        let rows: Vec<Person> = (0..40).map(|i| person(i, "Ana", i as i64)).collect();
        let mut view = table(rows, TableOptions::default());
        view.set_page_index(3);

        view.toggle_sort("age");
        assert_eq!(view.page_index(), 0);

        view.set_page_index(2);
        view.set_sort("age", SortOrder::Descending);
        assert_eq!(view.page_index(), 0);
        assert_eq!(view.current_page()[0].age, 39);
    }

    #[test]
    fn test_filter_and_sort_changes_reset_reveal_window() {
        let rows: Vec<Person> = (0..30).map(|i| person(i, "Ana", i as i64)).collect();
        let mut view = table(rows, TableOptions::default().with_paging(PagingMode::Reveal));

        view.set_column_filter("age", ColumnFilter::contains("1"));
        view.show_more();
        view.clear_column_filter("age");
        assert_eq!(view.current_page().len(), DEFAULT_REVEAL_INITIAL);

        view.show_more();
        view.toggle_sort("age");
        assert_eq!(view.current_page().len(), DEFAULT_REVEAL_INITIAL);
    }
}
