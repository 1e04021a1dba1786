//! Inputs supplied by the host page.

use std::fmt;
use std::sync::Arc;

use crate::pagination::Pagination;
use crate::selection::{Eligibility, IdFn, SelectionCallback, SelectionEngine, StatusFn};
use crate::widgets::{ActionSource, BodyLayout, BulkAction, Column, RowCallback};

/// Runs "select eligible rows only" against the table's current inputs.
pub type SelectTrigger = Arc<dyn Fn() + Send + Sync>;

/// Receives the [`SelectTrigger`] so the host can fire it from its own
/// controls.
pub type RegisterSelectTrigger = Arc<dyn Fn(SelectTrigger) + Send + Sync>;

/// Everything a host page hands to a [`DataTable`](crate::DataTable).
///
/// Selection is enabled when `on_selection_change` is set. The action
/// column appears when rows are clickable or `row_actions` is set.
pub struct TableProps<T> {
    pub data: Vec<T>,
    pub columns: Vec<Column<T>>,
    pub get_item_id: IdFn<T>,
    /// Host-owned selection, across all pages.
    pub selected_items: Vec<String>,
    pub on_selection_change: Option<SelectionCallback>,
    pub on_row_click: Option<RowCallback<T>>,
    pub row_actions: Option<ActionSource<T>>,
    pub hover_actions: Option<ActionSource<T>>,
    pub bulk_actions: Vec<BulkAction>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub unavailable_items: Vec<String>,
    pub get_item_status: Option<StatusFn<T>>,
    pub allowed_statuses: Vec<String>,
    pub on_select_succeeded_only: Option<RegisterSelectTrigger>,
    pub active_item_id: Option<String>,
    pub empty_message: String,
    pub aria_label: String,
}

impl<T: 'static> TableProps<T> {
    pub fn new(
        columns: Vec<Column<T>>,
        get_item_id: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            data: Vec::new(),
            columns,
            get_item_id: Arc::new(get_item_id),
            selected_items: Vec::new(),
            on_selection_change: None,
            on_row_click: None,
            row_actions: None,
            hover_actions: None,
            bulk_actions: Vec::new(),
            pagination: None,
            loading: false,
            unavailable_items: Vec::new(),
            get_item_status: None,
            allowed_statuses: Vec::new(),
            on_select_succeeded_only: None,
            active_item_id: None,
            empty_message: "No results found.".to_string(),
            aria_label: "Data table".to_string(),
        }
    }

    pub fn data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    pub fn selected_items(mut self, ids: Vec<String>) -> Self {
        self.selected_items = ids;
        self
    }

    pub fn on_selection_change(mut self, f: impl Fn(Vec<String>) + Send + Sync + 'static) -> Self {
        self.on_selection_change = Some(Arc::new(f));
        self
    }

    pub fn on_row_click(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    pub fn row_actions(mut self, source: ActionSource<T>) -> Self {
        self.row_actions = Some(source);
        self
    }

    pub fn hover_actions(mut self, source: ActionSource<T>) -> Self {
        self.hover_actions = Some(source);
        self
    }

    pub fn bulk_actions(mut self, actions: Vec<BulkAction>) -> Self {
        self.bulk_actions = actions;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn unavailable_items(mut self, ids: Vec<String>) -> Self {
        self.unavailable_items = ids;
        self
    }

    /// Only rows whose status is in `allowed` may be selected.
    pub fn status_gate(
        mut self,
        get_status: impl Fn(&T) -> String + Send + Sync + 'static,
        allowed: Vec<String>,
    ) -> Self {
        self.get_item_status = Some(Arc::new(get_status));
        self.allowed_statuses = allowed;
        self
    }

    pub fn on_select_succeeded_only(
        mut self,
        register: impl Fn(SelectTrigger) + Send + Sync + 'static,
    ) -> Self {
        self.on_select_succeeded_only = Some(Arc::new(register));
        self
    }

    pub fn active_item_id(mut self, id: Option<String>) -> Self {
        self.active_item_id = id;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = label.into();
        self
    }
}

impl<T> TableProps<T> {
    pub fn selection_enabled(&self) -> bool {
        self.on_selection_change.is_some()
    }

    pub fn has_actions(&self) -> bool {
        self.on_row_click.is_some() || self.row_actions.is_some()
    }

    pub fn body_layout(&self) -> BodyLayout {
        BodyLayout {
            selectable: self.selection_enabled(),
            has_hover_actions: self.hover_actions.is_some(),
            has_actions: self.has_actions(),
        }
    }

    pub fn eligibility(&self) -> Eligibility<T> {
        let eligibility = Eligibility::new().with_unavailable(self.unavailable_items.iter().cloned());
        match &self.get_item_status {
            Some(get_status) => {
                eligibility.with_status_gate(Arc::clone(get_status), self.allowed_statuses.clone())
            }
            None => eligibility,
        }
    }

    /// Selection engine over the current page.
    pub fn engine<'a>(&'a self, eligibility: &'a Eligibility<T>) -> SelectionEngine<'a, T> {
        SelectionEngine::new(&self.data, &self.selected_items, &self.get_item_id, eligibility)
    }

    pub(crate) fn find_row(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }
}

impl<T> fmt::Debug for TableProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProps")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("selected_items", &self.selected_items)
            .field("loading", &self.loading)
            .field("pagination", &self.pagination)
            .field("active_item_id", &self.active_item_id)
            .finish_non_exhaustive()
    }
}
