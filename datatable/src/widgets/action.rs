use std::fmt;
use std::sync::Arc;

/// Invoked with the clicked row.
pub type RowCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type IdsCallback = Arc<dyn Fn(&[String]) + Send + Sync>;
type IdsPredicate = Arc<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Key of the synthesized "View details" row action.
pub const VIEW_DETAILS_KEY: &str = "view-details";

/// Visual emphasis of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    #[default]
    Default,
    Destructive,
}

impl ActionVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ActionVariant::Default => "action-default",
            ActionVariant::Destructive => "action-destructive",
        }
    }
}

/// An action offered on a single row.
pub struct TableAction<T> {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub variant: ActionVariant,
    on_click: RowCallback<T>,
    condition: Option<Predicate<T>>,
    disabled: Option<Predicate<T>>,
}

impl<T> TableAction<T> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        on_click: impl Fn(&T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            variant: ActionVariant::Default,
            on_click: Arc::new(on_click),
            condition: None,
            disabled: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Only offer the action for rows matching `condition`.
    pub fn condition(mut self, condition: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Offer the action but disable it for rows matching `disabled`.
    pub fn disabled_when(mut self, disabled: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Arc::new(disabled));
        self
    }

    pub fn is_visible(&self, item: &T) -> bool {
        self.condition.as_ref().is_none_or(|c| c(item))
    }

    pub fn is_disabled(&self, item: &T) -> bool {
        self.disabled.as_ref().is_some_and(|d| d(item))
    }

    /// Forward the click to the host handler.
    pub fn invoke(&self, item: &T) {
        (self.on_click)(item);
    }
}

impl<T> Clone for TableAction<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            variant: self.variant,
            on_click: Arc::clone(&self.on_click),
            condition: self.condition.clone(),
            disabled: self.disabled.clone(),
        }
    }
}

impl<T> fmt::Debug for TableAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableAction")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

/// Produces the actions for a row.
///
/// Static lists and per-row functions share one shape: a function of the
/// row, or `None` when asked without a row.
pub struct ActionSource<T>(Arc<dyn Fn(Option<&T>) -> Vec<TableAction<T>> + Send + Sync>);

impl<T: 'static> ActionSource<T> {
    /// The same actions for every row.
    pub fn fixed(actions: Vec<TableAction<T>>) -> Self {
        Self(Arc::new(move |_: Option<&T>| actions.clone()))
    }

    /// Actions computed per row. Yields nothing without a row.
    pub fn per_item(f: impl Fn(&T) -> Vec<TableAction<T>> + Send + Sync + 'static) -> Self {
        Self(Arc::new(move |item: Option<&T>| item.map(&f).unwrap_or_default()))
    }

    pub fn resolve(&self, item: Option<&T>) -> Vec<TableAction<T>> {
        (self.0)(item)
    }
}

impl<T> Clone for ActionSource<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for ActionSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionSource")
    }
}

/// Actions offered for `item`: "View details" when rows are clickable,
/// then the host's actions, filtered by their conditions.
pub fn resolve_row_actions<T: 'static>(
    item: &T,
    on_row_click: Option<&RowCallback<T>>,
    source: Option<&ActionSource<T>>,
) -> Vec<TableAction<T>> {
    let mut actions = Vec::new();
    if let Some(on_row_click) = on_row_click {
        let on_row_click = Arc::clone(on_row_click);
        let view = TableAction::new(VIEW_DETAILS_KEY, "View details", move |item: &T| {
            on_row_click(item)
        });
        actions.push(view.icon("eye"));
    }
    if let Some(source) = source {
        actions.extend(source.resolve(Some(item)));
    }
    actions.retain(|action| action.is_visible(item));
    actions
}

/// An action over the current selection.
#[derive(Clone)]
pub struct BulkAction {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub variant: ActionVariant,
    on_click: IdsCallback,
    disabled: Option<IdsPredicate>,
}

impl BulkAction {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        on_click: impl Fn(&[String]) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            variant: ActionVariant::Default,
            on_click: Arc::new(on_click),
            disabled: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled_when(
        mut self,
        disabled: impl Fn(&[String]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.disabled = Some(Arc::new(disabled));
        self
    }

    pub fn is_disabled(&self, ids: &[String]) -> bool {
        self.disabled.as_ref().is_some_and(|d| d(ids))
    }

    pub fn invoke(&self, ids: &[String]) {
        (self.on_click)(ids);
    }
}

impl fmt::Debug for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
