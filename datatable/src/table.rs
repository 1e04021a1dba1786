//! The top-level data table container.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tabledom::{Element, Key, LayoutEvent};

use crate::autoscroll::ActiveRowScroller;
use crate::config::TableConfig;
use crate::layout::{ContainerRef, ContainerRegistry, RegistrationId};
use crate::pagination::{
    render_pagination, PageSizePreference, PaginationPlacement, StickyBounds, StickyPagination,
};
use crate::props::{SelectTrigger, TableProps};
use crate::scroll::{self, MountedTracker, ScrollState, ScrollTracker};
use crate::selection::{SelectionEngine, SelectionState};
use crate::shadow::{FallbackGuard, ShadowFallback};
use crate::widgets::{
    render_body, render_bulk_bar, render_empty, render_header, render_row, render_skeleton,
    resolve_row_actions, HeaderContext, RowContext, TableAction,
};

/// Unique identifier for a DataTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data-table-{}", self.0)
    }
}

/// Process-wide collaborators injected into every table on mount.
#[derive(Debug, Clone)]
pub struct TableEnvironment {
    pub registry: Arc<ContainerRegistry>,
    pub fallback: ShadowFallback,
    pub preference: Option<Arc<PageSizePreference>>,
}

impl TableEnvironment {
    /// A registry plus a fallback loop scanning it.
    pub fn new(config: &TableConfig) -> Self {
        let registry = Arc::new(ContainerRegistry::new());
        let fallback = ShadowFallback::new(registry.clone(), config.shadow, config.fallback_interval);
        Self {
            registry,
            fallback,
            preference: None,
        }
    }

    pub fn with_preference(mut self, preference: Arc<PageSizePreference>) -> Self {
        self.preference = Some(preference);
        self
    }
}

/// Resources held while mounted. Dropping releases all of them.
struct MountedTable {
    tracker: MountedTracker,
    _fallback: FallbackGuard,
    registry: Arc<ContainerRegistry>,
    registration: RegistrationId,
    preference: Option<Arc<PageSizePreference>>,
}

impl Drop for MountedTable {
    fn drop(&mut self) {
        self.registry.unregister(self.registration);
    }
}

/// An interactive data table.
///
/// Composes the scroll tracker, sticky pagination, selection, and
/// active-row auto-scroll around host-supplied [`TableProps`]. The host
/// attaches its scroll element through [`container`](Self::container),
/// forwards layout events, and calls [`render`](Self::render) whenever
/// [`take_dirty`](Self::take_dirty) reports a change.
pub struct DataTable<T> {
    id: TableId,
    config: TableConfig,
    props: Arc<RwLock<TableProps<T>>>,
    container: ContainerRef,
    tracker: ScrollTracker,
    sticky: RwLock<StickyPagination>,
    hovered: RwLock<Option<String>>,
    scroller: Mutex<ActiveRowScroller>,
    mounted: Mutex<Option<MountedTable>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T: Clone + Send + Sync + 'static> DataTable<T> {
    pub fn new(props: TableProps<T>, config: TableConfig) -> Self {
        let container = ContainerRef::new();
        let table = Self {
            id: TableId::new(),
            tracker: ScrollTracker::new(container.clone(), config.shadow),
            sticky: RwLock::new(StickyPagination::new(container.clone())),
            hovered: RwLock::new(None),
            scroller: Mutex::new(ActiveRowScroller::new(config.autoscroll, config.frame_interval)),
            mounted: Mutex::new(None),
            dirty: Arc::new(AtomicBool::new(true)),
            props: Arc::new(RwLock::new(props)),
            container,
            config,
        };
        table.register_select_trigger();
        table
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Slot for the host's scroll element.
    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    /// Check and clear the dirty flag.
    pub fn take_dirty(&self) -> bool {
        let own = self.dirty.swap(false, Ordering::SeqCst);
        let scroll = self.tracker.take_dirty();
        own || scroll
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start observing: measurement retries, frame-coalesced scroll
    /// tracking, the shared fallback loop, and sticky pagination.
    ///
    /// Must be called from within a tokio runtime. Mounting twice is a no-op.
    pub fn mount(&self, env: &TableEnvironment) {
        let Ok(mut mounted) = self.mounted.lock() else {
            return;
        };
        if mounted.is_some() {
            return;
        }

        let tracker = scroll::mount(
            self.tracker.clone(),
            self.config.retry_delays.clone(),
            self.config.frame_interval,
        );
        *mounted = Some(MountedTable {
            tracker,
            _fallback: env.fallback.acquire(),
            registry: env.registry.clone(),
            registration: env.registry.register(self.container.clone()),
            preference: env.preference.clone(),
        });
        drop(mounted);

        if let Ok(mut sticky) = self.sticky.write() {
            sticky.connect();
        }
        log::debug!("{}: mounted", self.id);
        self.sync_active_row();
    }

    /// Disconnect every observer and release shared resources.
    pub fn unmount(&self) {
        let previous = self.mounted.lock().ok().and_then(|mut m| m.take());
        if previous.is_none() {
            return;
        }
        drop(previous);

        if let Ok(mut sticky) = self.sticky.write() {
            sticky.disconnect();
        }
        if let Ok(mut scroller) = self.scroller.lock() {
            scroller.cancel();
        }
        log::debug!("{}: unmounted", self.id);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.lock().map(|m| m.is_some()).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Host events
    // -------------------------------------------------------------------------

    /// Forward a layout event from the scroll container or window.
    pub fn notify(&self, event: LayoutEvent) {
        {
            let Ok(mounted) = self.mounted.lock() else { return };
            let Some(mounted) = mounted.as_ref() else { return };
            mounted.tracker.notify(event);
        }

        if event == LayoutEvent::Resize {
            let changed = self
                .sticky
                .write()
                .map(|mut s| s.on_container_resize())
                .unwrap_or(false);
            if changed {
                self.mark_dirty();
            }
        }
        if matches!(event, LayoutEvent::Resize | LayoutEvent::Mutation) {
            self.sync_active_row();
        }
    }

    /// The in-flow pagination bar entered or left the viewport.
    pub fn on_pagination_intersection(&self, is_intersecting: bool) {
        let changed = self
            .sticky
            .write()
            .map(|mut s| s.on_intersection(is_intersecting))
            .unwrap_or(false);
        if changed {
            self.mark_dirty();
        }
    }

    pub fn sticky_bounds(&self) -> Option<StickyBounds> {
        self.sticky.read().ok().and_then(|s| s.bounds())
    }

    // -------------------------------------------------------------------------
    // Props
    // -------------------------------------------------------------------------

    /// Read the current props.
    pub fn with_props<R>(&self, f: impl FnOnce(&TableProps<T>) -> R) -> Option<R> {
        self.props.read().ok().map(|p| f(&p))
    }

    /// Mutate props, then re-derive everything that depends on them.
    pub fn update(&self, f: impl FnOnce(&mut TableProps<T>)) {
        if let Ok(mut props) = self.props.write() {
            f(&mut props);
        }
        self.register_select_trigger();
        self.sync_active_row();
        self.mark_dirty();
    }

    pub fn set_data(&self, data: Vec<T>) {
        self.update(|p| p.data = data);
    }

    pub fn set_selected_items(&self, ids: Vec<String>) {
        self.update(|p| p.selected_items = ids);
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|p| p.loading = loading);
    }

    pub fn set_active_item_id(&self, id: Option<String>) {
        self.update(|p| p.active_item_id = id);
    }

    fn register_select_trigger(&self) {
        let register = self
            .props
            .read()
            .ok()
            .and_then(|p| p.on_select_succeeded_only.clone());
        let Some(register) = register else { return };

        let props = Arc::downgrade(&self.props);
        let trigger: SelectTrigger = Arc::new(move || {
            if let Some(props) = props.upgrade() {
                commit_selection(&props, |engine| Some(engine.next_for_eligible_only()));
            }
        });
        register(trigger);
    }

    fn sync_active_row(&self) {
        let Some((active, enabled)) = self.with_props(|p| {
            (p.active_item_id.clone(), !p.loading && !p.data.is_empty())
        }) else {
            return;
        };
        if let Ok(mut scroller) = self.scroller.lock() {
            scroller.on_active_change(active.as_deref(), &self.container, enabled);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selection_state(&self) -> SelectionState {
        self.with_props(|p| p.engine(&p.eligibility()).state())
            .unwrap_or_default()
    }

    /// Toggle one row. Returns the reported list, or `None` when ignored.
    pub fn toggle_item_selection(&self, id: &str) -> Option<Vec<String>> {
        commit_selection(&self.props, |engine| engine.next_for_item(id))
    }

    pub fn toggle_all_selection(&self) -> Option<Vec<String>> {
        commit_selection(&self.props, |engine| Some(engine.next_for_all()))
    }

    pub fn select_succeeded_only(&self) -> Option<Vec<String>> {
        commit_selection(&self.props, |engine| Some(engine.next_for_eligible_only()))
    }

    pub fn clear_selection(&self) -> Option<Vec<String>> {
        commit_selection(&self.props, |_| Some(Vec::new()))
    }

    // -------------------------------------------------------------------------
    // Row interaction
    // -------------------------------------------------------------------------

    /// Primary click on the row at page `index`.
    pub fn click_row(&self, index: usize) -> bool {
        let target = self.with_props(|p| {
            Some((p.find_row(index)?.clone(), p.on_row_click.clone()?))
        });
        let Some((item, on_click)) = target.flatten() else {
            return false;
        };
        on_click(&item);
        true
    }

    /// Keyboard on a focused row. Enter and Space activate it.
    pub fn handle_row_key(&self, index: usize, key: Key) -> bool {
        key.is_activation() && self.click_row(index)
    }

    pub fn set_hovered_row(&self, id: Option<&str>) {
        if let Ok(mut hovered) = self.hovered.write()
            && hovered.as_deref() != id
        {
            *hovered = id.map(str::to_string);
            self.mark_dirty();
        }
    }

    pub fn hovered_row(&self) -> Option<String> {
        self.hovered.read().ok().and_then(|h| h.clone())
    }

    /// Invoke a dropdown action on the row at `index`.
    pub fn invoke_row_action(&self, index: usize, action_key: &str) -> bool {
        let target = self.with_props(|p| {
            let item = p.find_row(index)?;
            let actions = resolve_row_actions(item, p.on_row_click.as_ref(), p.row_actions.as_ref());
            Some((item.clone(), find_enabled(actions, item, action_key)?))
        });
        invoke(target.flatten())
    }

    /// Invoke a hover-overlay action on the row at `index`.
    pub fn invoke_hover_action(&self, index: usize, action_key: &str) -> bool {
        let target = self.with_props(|p| {
            let item = p.find_row(index)?;
            let actions = p.hover_actions.as_ref()?.resolve(Some(item));
            Some((item.clone(), find_enabled(actions, item, action_key)?))
        });
        invoke(target.flatten())
    }

    /// Invoke a bulk action with the current selection.
    pub fn invoke_bulk_action(&self, action_key: &str) -> bool {
        let target = self.with_props(|p| {
            let action = p.bulk_actions.iter().find(|a| a.key == action_key)?;
            if p.selected_items.is_empty() || action.is_disabled(&p.selected_items) {
                return None;
            }
            Some((action.clone(), p.selected_items.clone()))
        });
        let Some((action, ids)) = target.flatten() else {
            return false;
        };
        action.invoke(&ids);
        true
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Request `page`. Out-of-range and current-page requests are ignored.
    pub fn go_to_page(&self, page: usize) -> bool {
        let target = self.with_props(|p| {
            let pagination = p.pagination.as_ref()?;
            Some((pagination.target(page)?, pagination.on_page_change.clone()))
        });
        let Some((page, on_change)) = target.flatten() else {
            return false;
        };
        on_change(page);
        true
    }

    /// Request a new page size, persisting it when a preference store is
    /// mounted. Sizes outside the configured bounds are rejected.
    pub fn change_page_size(&self, size: usize) -> bool {
        let preference = self
            .mounted
            .lock()
            .ok()
            .and_then(|m| m.as_ref().and_then(|m| m.preference.clone()));
        let accepted = match preference {
            Some(preference) => preference.set_page_size(size),
            None => self.config.page_size.is_valid(size),
        };
        if !accepted {
            return false;
        }

        let callback = self
            .with_props(|p| p.pagination.as_ref()?.on_page_size_change.clone())
            .flatten();
        if let Some(callback) = callback {
            callback(size);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    pub fn render(&self) -> Element {
        let Ok(props) = self.props.read() else {
            return Element::div().id(self.id.to_string()).class("data-table");
        };
        let prefix = self.id.to_string();
        let scroll = self.tracker.state();
        let layout = props.body_layout();
        let column_count = layout.column_count(props.columns.len());
        let eligibility = props.eligibility();
        let engine = props.engine(&eligibility);
        let selection = engine.state();

        let header = render_header(
            &props.columns,
            &HeaderContext {
                selectable: layout.selectable,
                selection,
                select_all_disabled: engine.selectable_ids().is_empty(),
                has_hover_actions: layout.has_hover_actions,
                has_actions: layout.has_actions,
                show_shadow: scroll.show_right_shadow,
            },
        );

        let body = if props.loading {
            let rows = props
                .pagination
                .as_ref()
                .map_or(self.config.page_size.default, |p| p.info.page_size)
                .min(self.config.max_skeleton_rows);
            render_skeleton(&props.columns, &layout, rows)
        } else if props.data.is_empty() {
            render_empty(column_count, &props.empty_message)
        } else {
            self.render_rows(&props, &engine, scroll)
        };

        let row_count = props
            .pagination
            .as_ref()
            .map_or(props.data.len(), |p| p.info.total_items)
            + 1;

        let grid = Element::new("table")
            .id(format!("{prefix}-grid"))
            .class("table")
            .role("grid")
            .aria("label", props.aria_label.clone())
            .aria("busy", props.loading)
            .aria("rowcount", row_count)
            .aria("colcount", column_count)
            .attr_if(layout.selectable, "aria-multiselectable", "true")
            .child(header)
            .child(body);

        let scroll_container = Element::div()
            .id(format!("{prefix}-scroll"))
            .class("table-scroll-container")
            .class_if(scroll.has_horizontal_scroll, "has-horizontal-scroll")
            .data("scroll-container", "true")
            .style("overflow-x", "auto")
            .child(grid);

        let live_region = Element::div()
            .role("status")
            .class("sr-only")
            .aria("live", "polite")
            .aria("atomic", true)
            .text(if props.loading { "Loading table data" } else { "" });

        let mut root = Element::div()
            .id(prefix.clone())
            .class("data-table")
            .child(live_region);

        if layout.selectable && !props.selected_items.is_empty() && !props.bulk_actions.is_empty() {
            root = root.child(render_bulk_bar(&props.selected_items, &props.bulk_actions));
        }

        root = root.child(scroll_container);

        if let Some(pagination) = props.pagination.as_ref().filter(|p| p.info.should_render()) {
            let options = pagination
                .on_page_size_change
                .as_ref()
                .map(|_| self.config.page_size.options.as_slice());
            root = root.child(render_pagination(
                &pagination.info,
                options,
                &prefix,
                PaginationPlacement::InFlow,
            ));
            if let Some(bounds) = self.sticky_bounds() {
                root = root.child(render_pagination(
                    &pagination.info,
                    options,
                    &prefix,
                    PaginationPlacement::Floating(bounds),
                ));
            }
        }

        root
    }

    fn render_rows(
        &self,
        props: &TableProps<T>,
        engine: &SelectionEngine<'_, T>,
        scroll: ScrollState,
    ) -> Element {
        let layout = props.body_layout();
        let eligibility = props.eligibility();
        let hovered = self.hovered_row();

        let rows = props.data.iter().enumerate().map(|(index, item)| {
            let id = (props.get_item_id)(item);
            let actions = if layout.has_actions {
                resolve_row_actions(item, props.on_row_click.as_ref(), props.row_actions.as_ref())
            } else {
                Vec::new()
            };
            let hover_actions: Vec<TableAction<T>> = props
                .hover_actions
                .as_ref()
                .map(|source| source.resolve(Some(item)))
                .unwrap_or_default()
                .into_iter()
                .filter(|action| action.is_visible(item))
                .collect();

            let ctx = RowContext {
                index,
                id: &id,
                selection_enabled: layout.selectable,
                selected: engine.is_selected(&id),
                selectable: eligibility.is_selectable(&id, item),
                active: props.active_item_id.as_deref() == Some(id.as_str()),
                hovered: hovered.as_deref() == Some(id.as_str()),
                clickable: props.on_row_click.is_some(),
                show_shadow: scroll.show_right_shadow,
                has_hover_actions: layout.has_hover_actions,
                has_actions: layout.has_actions,
            };
            render_row(item, &props.columns, &ctx, &actions, &hover_actions)
        });

        render_body(rows.collect())
    }
}

impl<T> Drop for DataTable<T> {
    fn drop(&mut self) {
        if let Ok(mut mounted) = self.mounted.lock() {
            mounted.take();
        }
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("container", &self.container)
            .field("scroll", &self.tracker.state())
            .finish_non_exhaustive()
    }
}

/// Compute the next selection under the read lock, then report it with
/// the lock released so the host may write props back from the callback.
fn commit_selection<T>(
    props: &RwLock<TableProps<T>>,
    compute: impl FnOnce(&SelectionEngine<'_, T>) -> Option<Vec<String>>,
) -> Option<Vec<String>> {
    let (next, callback) = {
        let props = props.read().ok()?;
        let callback = props.on_selection_change.clone()?;
        let eligibility = props.eligibility();
        let engine = props.engine(&eligibility);
        (compute(&engine)?, callback)
    };
    callback(next.clone());
    Some(next)
}

fn find_enabled<T>(actions: Vec<TableAction<T>>, item: &T, key: &str) -> Option<TableAction<T>> {
    actions
        .into_iter()
        .find(|a| a.key == key)
        .filter(|a| a.is_visible(item) && !a.is_disabled(item))
}

fn invoke<T>(target: Option<(T, TableAction<T>)>) -> bool {
    match target {
        Some((item, action)) => {
            action.invoke(&item);
            true
        }
        None => false,
    }
}
