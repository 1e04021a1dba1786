//! Tri-state selection gated by per-row eligibility.
//!
//! The selection list is owned by the host page. [`SelectionEngine`] only
//! borrows it, computes the next list for each operation, and reports it
//! through the host's callback; it never stores a selection of its own.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Extracts a stable row id.
pub type IdFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Extracts a row's status for the eligibility gate.
pub type StatusFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Receives the full selected id list after every mutation.
pub type SelectionCallback = Arc<dyn Fn(Vec<String>) + Send + Sync>;

/// Derived tri-state indicator for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub is_indeterminate: bool,
    pub is_all_selected: bool,
}

impl SelectionState {
    /// `aria-checked` value for the header checkbox.
    pub fn aria_checked(&self) -> &'static str {
        if self.is_all_selected {
            "true"
        } else if self.is_indeterminate {
            "mixed"
        } else {
            "false"
        }
    }
}

/// Which rows may be selected.
///
/// A row is selectable when it is not listed as unavailable and, if a
/// status gate is configured, its status is one of the allowed statuses.
pub struct Eligibility<T> {
    unavailable: HashSet<String>,
    get_status: Option<StatusFn<T>>,
    allowed_statuses: Vec<String>,
}

impl<T> Default for Eligibility<T> {
    fn default() -> Self {
        Self {
            unavailable: HashSet::new(),
            get_status: None,
            allowed_statuses: Vec::new(),
        }
    }
}

impl<T> Clone for Eligibility<T> {
    fn clone(&self) -> Self {
        Self {
            unavailable: self.unavailable.clone(),
            get_status: self.get_status.clone(),
            allowed_statuses: self.allowed_statuses.clone(),
        }
    }
}

impl<T> fmt::Debug for Eligibility<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eligibility")
            .field("unavailable", &self.unavailable)
            .field("status_gate", &self.get_status.is_some())
            .field("allowed_statuses", &self.allowed_statuses)
            .finish()
    }
}

impl<T> Eligibility<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unavailable(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.unavailable = ids.into_iter().collect();
        self
    }

    pub fn with_status_gate(mut self, get_status: StatusFn<T>, allowed: Vec<String>) -> Self {
        self.get_status = Some(get_status);
        self.allowed_statuses = allowed;
        self
    }

    pub fn is_unavailable(&self, id: &str) -> bool {
        self.unavailable.contains(id)
    }

    /// Status half of the gate. Open when no gate or no allowed statuses.
    pub fn status_allows(&self, item: &T) -> bool {
        match &self.get_status {
            Some(get_status) if !self.allowed_statuses.is_empty() => {
                let status = get_status(item);
                self.allowed_statuses.iter().any(|s| *s == status)
            }
            _ => true,
        }
    }

    pub fn is_selectable(&self, id: &str, item: &T) -> bool {
        self.status_allows(item) && !self.is_unavailable(id)
    }
}

/// Selection operations over one page of rows.
pub struct SelectionEngine<'a, T> {
    page: &'a [T],
    selected: &'a [String],
    get_id: &'a IdFn<T>,
    eligibility: &'a Eligibility<T>,
    on_change: Option<&'a SelectionCallback>,
}

impl<'a, T> SelectionEngine<'a, T> {
    pub fn new(
        page: &'a [T],
        selected: &'a [String],
        get_id: &'a IdFn<T>,
        eligibility: &'a Eligibility<T>,
    ) -> Self {
        Self {
            page,
            selected,
            get_id,
            eligibility,
            on_change: None,
        }
    }

    /// Report mutations through `callback`.
    pub fn on_change(mut self, callback: &'a SelectionCallback) -> Self {
        self.on_change = Some(callback);
        self
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Whether the row with `id` may be toggled.
    ///
    /// Ids not on the current page are only checked against the
    /// unavailable list, so selections made on other pages can still be
    /// removed.
    pub fn is_selectable_id(&self, id: &str) -> bool {
        match self.page.iter().find(|item| (self.get_id)(item) == id) {
            Some(item) => self.eligibility.is_selectable(id, item),
            None => !self.eligibility.is_unavailable(id),
        }
    }

    /// Ids of selectable rows on the current page, in page order.
    pub fn selectable_ids(&self) -> Vec<String> {
        self.page
            .iter()
            .filter_map(|item| {
                let id = (self.get_id)(item);
                self.eligibility.is_selectable(&id, item).then_some(id)
            })
            .collect()
    }

    pub fn state(&self) -> SelectionState {
        let selectable = self.selectable_ids();
        let count = selectable.iter().filter(|id| self.is_selected(id)).count();
        let all = !selectable.is_empty() && count == selectable.len();
        SelectionState {
            is_all_selected: all,
            is_indeterminate: count > 0 && !all,
        }
    }

    /// Next list after toggling `id`, or `None` if the row is ineligible.
    pub fn next_for_item(&self, id: &str) -> Option<Vec<String>> {
        if !self.is_selectable_id(id) {
            return None;
        }
        let next = if self.is_selected(id) {
            self.selected.iter().filter(|s| *s != id).cloned().collect()
        } else {
            let mut next = self.selected.to_vec();
            next.push(id.to_string());
            next
        };
        Some(next)
    }

    /// Next list after toggling the whole page.
    ///
    /// Selects every selectable row unless all are already selected, in
    /// which case the current page's rows are removed. Selections on other
    /// pages are preserved either way.
    pub fn next_for_all(&self) -> Vec<String> {
        if self.state().is_all_selected {
            let page_ids: HashSet<String> = self.page.iter().map(|i| (self.get_id)(i)).collect();
            self.selected
                .iter()
                .filter(|id| !page_ids.contains(*id))
                .cloned()
                .collect()
        } else {
            self.with_selectable_added(self.selected.to_vec())
        }
    }

    /// Next list for "select eligible only": every selectable row on the
    /// page, and no other row on the page. Other pages are untouched.
    pub fn next_for_eligible_only(&self) -> Vec<String> {
        let page_ids: HashSet<String> = self.page.iter().map(|i| (self.get_id)(i)).collect();
        let kept = self
            .selected
            .iter()
            .filter(|id| !page_ids.contains(*id))
            .cloned()
            .collect();
        self.with_selectable_added(kept)
    }

    fn with_selectable_added(&self, mut next: Vec<String>) -> Vec<String> {
        for id in self.selectable_ids() {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        next
    }

    /// Toggle one row. Ineligible rows are ignored and nothing is reported.
    pub fn toggle_item_selection(&self, id: &str) -> Option<Vec<String>> {
        let next = self.next_for_item(id)?;
        self.emit(&next);
        Some(next)
    }

    pub fn toggle_all_selection(&self) -> Vec<String> {
        let next = self.next_for_all();
        self.emit(&next);
        next
    }

    pub fn select_succeeded_only(&self) -> Vec<String> {
        let next = self.next_for_eligible_only();
        self.emit(&next);
        next
    }

    fn emit(&self, next: &[String]) {
        if let Some(callback) = self.on_change {
            callback(next.to_vec());
        }
    }
}
