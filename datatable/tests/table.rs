use std::sync::{Arc, Mutex};
use std::time::Duration;

use datatable::prelude::*;
use datatable::testing::SyntheticContainer;
use datatable::widgets::VIEW_DETAILS_KEY;
use tabledom::{find_all_by_class, find_by_data, find_element, Rect, ScrollMetrics};

#[derive(Debug, Clone)]
struct Payment {
    id: String,
    amount: u64,
    status: &'static str,
}

fn payments(n: usize) -> Vec<Payment> {
    (1..=n)
        .map(|i| Payment {
            id: format!("pay_{i}"),
            amount: i as u64 * 1000,
            status: if i % 2 == 0 { "failed" } else { "succeeded" },
        })
        .collect()
}

fn columns() -> Vec<Column<Payment>> {
    vec![
        Column::new("id", "Payment", |p: &Payment, _| Element::text_span(p.id.clone())),
        Column::new("amount", "Amount", |p: &Payment, _| {
            Element::text_span(format!("${}.00", p.amount / 100))
        })
        .align(Alignment::Right),
    ]
}

/// Records every callback the table fires.
#[derive(Default)]
struct Host {
    selections: Mutex<Vec<Vec<String>>>,
    clicks: Mutex<Vec<String>>,
    pages: Mutex<Vec<usize>>,
    page_sizes: Mutex<Vec<usize>>,
    actions: Mutex<Vec<String>>,
}

impl Host {
    fn last_selection(&self) -> Option<Vec<String>> {
        self.selections.lock().unwrap().last().cloned()
    }
}

fn props(host: &Arc<Host>, rows: usize) -> TableProps<Payment> {
    let selections = host.clone();
    let clicks = host.clone();
    TableProps::new(columns(), |p: &Payment| p.id.clone())
        .data(payments(rows))
        .on_selection_change(move |ids| selections.selections.lock().unwrap().push(ids))
        .on_row_click(move |p: &Payment| clicks.clicks.lock().unwrap().push(p.id.clone()))
}

fn paginated(host: &Arc<Host>, info: PageInfo) -> Pagination {
    let pages = host.clone();
    let sizes = host.clone();
    Pagination::new(
        info,
        Arc::new(move |page: usize| pages.pages.lock().unwrap().push(page)),
    )
    .with_page_size_change(Arc::new(move |size: usize| {
        sizes.page_sizes.lock().unwrap().push(size)
    }))
}

fn attached(table: &DataTable<Payment>) -> Arc<SyntheticContainer> {
    let container = Arc::new(SyntheticContainer::with_horizontal(1200.0, 800.0, 0.0));
    container.set_bounding_rect(Rect::new(24.0, 100.0, 800.0, 400.0));
    table.container().attach(container.clone());
    container
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn test_render_grid_attributes() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(props(&host, 3).aria_label("Payments"), TableConfig::default());
    let root = table.render();

    let grid = find_element(&root, &format!("{}-grid", table.id())).expect("grid");
    assert_eq!(grid.get_attr("role"), Some("grid"));
    assert_eq!(grid.get_attr("aria-label"), Some("Payments"));
    assert_eq!(grid.get_attr("aria-rowcount"), Some("4"));
    // checkbox + 2 data + actions
    assert_eq!(grid.get_attr("aria-colcount"), Some("4"));
    assert_eq!(grid.get_attr("aria-multiselectable"), Some("true"));
    assert_eq!(grid.get_attr("aria-busy"), Some("false"));
}

#[test]
fn test_render_rowcount_uses_total_items() {
    let host = Arc::new(Host::default());
    let props = props(&host, 20).pagination(paginated(&host, PageInfo::new(1, 41, 20)));
    let table = DataTable::new(props, TableConfig::default());
    let root = table.render();

    let grid = find_element(&root, &format!("{}-grid", table.id())).expect("grid");
    assert_eq!(grid.get_attr("aria-rowcount"), Some("42"));
}

#[test]
fn test_render_rows_carry_ids_and_index() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(props(&host, 3), TableConfig::default());
    let root = table.render();

    let row = find_by_data(&root, "row-id", "pay_2").expect("row");
    assert_eq!(row.get_attr("aria-rowindex"), Some("3"));
    assert_eq!(row.get_attr("tabindex"), Some("0"));
    assert_eq!(row.get_attr("aria-selected"), Some("false"));
}

#[test]
fn test_render_loading_skeleton_is_capped() {
    let host = Arc::new(Host::default());
    let props = props(&host, 0)
        .loading(true)
        .pagination(paginated(&host, PageInfo::new(1, 500, 50)));
    let table = DataTable::new(props, TableConfig::default());
    let root = table.render();

    assert_eq!(find_all_by_class(&root, "skeleton-row").len(), 10);
    assert!(root.text_content().contains("Loading table data"));
}

#[test]
fn test_render_empty_message() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(
        props(&host, 0).empty_message("No payments yet."),
        TableConfig::default(),
    );
    let root = table.render();

    let empty = find_all_by_class(&root, "empty-state");
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].get_attr("colspan"), Some("4"));
    assert_eq!(empty[0].text_content(), "No payments yet.");
}

#[test]
fn test_render_ineligible_checkbox_disabled() {
    let host = Arc::new(Host::default());
    let props = props(&host, 2).status_gate(|p: &Payment| p.status.to_string(), vec!["succeeded".into()]);
    let table = DataTable::new(props, TableConfig::default());
    let root = table.render();

    let row = find_by_data(&root, "row-id", "pay_2").expect("row");
    let checkbox = find_by_data(row, "action", "toggle-row").expect("checkbox");
    assert!(checkbox.is_disabled());
}

#[test]
fn test_render_bulk_bar_only_with_selection() {
    let host = Arc::new(Host::default());
    let bulk = vec![BulkAction::new("refund", "Refund", |_: &[String]| {})];
    let table = DataTable::new(props(&host, 3).bulk_actions(bulk), TableConfig::default());
    assert!(find_all_by_class(&table.render(), "bulk-actions").is_empty());

    table.set_selected_items(vec!["pay_1".into(), "pay_3".into()]);
    let root = table.render();
    let bar = find_all_by_class(&root, "bulk-actions");
    assert_eq!(bar.len(), 1);
    assert!(bar[0].text_content().contains("2 selected"));
}

#[test]
fn test_render_header_tri_state() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(
        props(&host, 3).selected_items(vec!["pay_1".into()]),
        TableConfig::default(),
    );
    let root = table.render();
    let select_all = find_by_data(&root, "action", "toggle-all").expect("select all");
    assert_eq!(select_all.get_attr("aria-checked"), Some("mixed"));
    assert_eq!(select_all.get_data("state"), Some("indeterminate"));
}

#[test]
fn test_render_hides_pagination_for_single_page() {
    let host = Arc::new(Host::default());
    let props = props(&host, 5).pagination(paginated(&host, PageInfo::new(1, 5, 20)));
    let table = DataTable::new(props, TableConfig::default());
    let root = table.render();
    assert!(find_element(&root, &format!("{}-pagination", table.id())).is_none());
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_toggle_item_reports_to_host() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(props(&host, 3), TableConfig::default());

    table.toggle_item_selection("pay_2");
    assert_eq!(host.last_selection(), Some(vec!["pay_2".to_string()]));
}

#[test]
fn test_toggle_unavailable_is_ignored() {
    let host = Arc::new(Host::default());
    let props = props(&host, 3).unavailable_items(vec!["pay_2".into()]);
    let table = DataTable::new(props, TableConfig::default());

    assert_eq!(table.toggle_item_selection("pay_2"), None);
    assert!(host.selections.lock().unwrap().is_empty());
}

#[test]
fn test_callback_may_write_props_back() {
    let host = Arc::new(Host::default());
    let table = Arc::new(DataTable::new(
        TableProps::new(columns(), |p: &Payment| p.id.clone()).data(payments(3)),
        TableConfig::default(),
    ));
    let weak = Arc::downgrade(&table);
    let sink = host.clone();
    table.update(|p| {
        p.on_selection_change = Some(Arc::new(move |ids: Vec<String>| {
            sink.selections.lock().unwrap().push(ids.clone());
            if let Some(table) = weak.upgrade() {
                table.set_selected_items(ids);
            }
        }));
    });

    table.toggle_all_selection();
    assert!(table.selection_state().is_all_selected);
    table.toggle_all_selection();
    assert_eq!(table.selection_state(), SelectionState::default());
}

#[test]
fn test_clear_selection() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(
        props(&host, 3).selected_items(vec!["pay_1".into(), "elsewhere".into()]),
        TableConfig::default(),
    );
    assert_eq!(table.clear_selection(), Some(vec![]));
}

#[test]
fn test_registered_trigger_selects_eligible_rows() {
    let host = Arc::new(Host::default());
    let trigger: Arc<Mutex<Option<SelectTrigger>>> = Arc::default();
    let slot = trigger.clone();
    let props = props(&host, 4)
        .status_gate(|p: &Payment| p.status.to_string(), vec!["succeeded".into()])
        .on_select_succeeded_only(move |t| *slot.lock().unwrap() = Some(t));
    let _table = DataTable::new(props, TableConfig::default());

    let fire = trigger.lock().unwrap().clone().expect("trigger registered");
    fire();
    assert_eq!(
        host.last_selection(),
        Some(vec!["pay_1".to_string(), "pay_3".to_string()])
    );
}

#[test]
fn test_trigger_outliving_table_is_noop() {
    let host = Arc::new(Host::default());
    let trigger: Arc<Mutex<Option<SelectTrigger>>> = Arc::default();
    let slot = trigger.clone();
    let props = props(&host, 2).on_select_succeeded_only(move |t| *slot.lock().unwrap() = Some(t));
    drop(DataTable::new(props, TableConfig::default()));

    let fire = trigger.lock().unwrap().clone().expect("trigger registered");
    fire();
    assert!(host.selections.lock().unwrap().is_empty());
}

// =============================================================================
// Interaction Tests
// =============================================================================

#[test]
fn test_click_and_keyboard_activation() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(props(&host, 3), TableConfig::default());

    assert!(table.click_row(0));
    assert!(table.handle_row_key(1, Key::Enter));
    assert!(table.handle_row_key(2, Key::Char(' ')));
    assert!(!table.handle_row_key(2, Key::Char('x')));
    assert!(!table.click_row(10));

    assert_eq!(*host.clicks.lock().unwrap(), vec!["pay_1", "pay_2", "pay_3"]);
}

#[test]
fn test_view_details_action_routes_to_row_click() {
    let host = Arc::new(Host::default());
    let table = DataTable::new(props(&host, 2), TableConfig::default());

    assert!(table.invoke_row_action(1, VIEW_DETAILS_KEY));
    assert_eq!(*host.clicks.lock().unwrap(), vec!["pay_2"]);
}

#[test]
fn test_disabled_row_action_is_not_invoked() {
    let host = Arc::new(Host::default());
    let sink = host.clone();
    let refund = TableAction::new("refund", "Refund", move |p: &Payment| {
        sink.actions.lock().unwrap().push(p.id.clone())
    })
    .disabled_when(|p: &Payment| p.status == "failed");
    let table = DataTable::new(
        props(&host, 2).row_actions(ActionSource::fixed(vec![refund])),
        TableConfig::default(),
    );

    assert!(table.invoke_row_action(0, "refund"));
    assert!(!table.invoke_row_action(1, "refund"));
    assert_eq!(*host.actions.lock().unwrap(), vec!["pay_1"]);
}

#[test]
fn test_hover_actions_follow_hovered_row() {
    let host = Arc::new(Host::default());
    let copy = TableAction::new("copy", "Copy ID", |_: &Payment| {});
    let table = DataTable::new(
        props(&host, 2).hover_actions(ActionSource::fixed(vec![copy])),
        TableConfig::default(),
    );
    table.take_dirty();

    table.set_hovered_row(Some("pay_2"));
    assert!(table.take_dirty());
    let root = table.render();
    let visible = find_all_by_class(&root, "is-visible");
    assert_eq!(visible.len(), 1);
    assert!(table.invoke_hover_action(1, "copy"));

    table.set_hovered_row(Some("pay_2"));
    assert!(!table.take_dirty());
}

#[test]
fn test_bulk_action_receives_selection() {
    let host = Arc::new(Host::default());
    let sink = host.clone();
    let bulk = BulkAction::new("export", "Export", move |ids: &[String]| {
        sink.actions.lock().unwrap().extend(ids.iter().cloned())
    });
    let table = DataTable::new(
        props(&host, 3)
            .bulk_actions(vec![bulk])
            .selected_items(vec!["pay_3".into()]),
        TableConfig::default(),
    );

    assert!(table.invoke_bulk_action("export"));
    assert!(!table.invoke_bulk_action("missing"));
    assert_eq!(*host.actions.lock().unwrap(), vec!["pay_3"]);
}

// =============================================================================
// Pagination Tests
// =============================================================================

#[test]
fn test_go_to_page_bounds() {
    let host = Arc::new(Host::default());
    let props = props(&host, 20).pagination(paginated(&host, PageInfo::new(3, 41, 20)));
    let table = DataTable::new(props, TableConfig::default());

    assert!(!table.go_to_page(4));
    assert!(!table.go_to_page(3));
    assert!(table.go_to_page(2));
    assert_eq!(*host.pages.lock().unwrap(), vec![2]);
}

#[test]
fn test_change_page_size_validates() {
    let host = Arc::new(Host::default());
    let props = props(&host, 20).pagination(paginated(&host, PageInfo::new(1, 100, 20)));
    let table = DataTable::new(props, TableConfig::default());

    assert!(!table.change_page_size(5));
    assert!(table.change_page_size(50));
    assert_eq!(*host.page_sizes.lock().unwrap(), vec![50]);
}

#[tokio::test(start_paused = true)]
async fn test_change_page_size_persists_when_mounted() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let preference = Arc::new(PageSizePreference::new(
        Arc::new(MemoryStore::new()),
        config.page_size.clone(),
    ));
    let env = TableEnvironment::new(&config).with_preference(preference.clone());
    let props = props(&host, 20).pagination(paginated(&host, PageInfo::new(1, 100, 20)));
    let table = DataTable::new(props, config);
    attached(&table);
    table.mount(&env);

    assert!(table.change_page_size(50));
    assert_eq!(preference.get_page_size(), 50);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_mount_tracks_shadow_state() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 3), config);
    let container = attached(&table);

    table.mount(&env);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(table.scroll_state().show_right_shadow);
    assert!(table.take_dirty());

    let root = table.render();
    assert!(!find_all_by_class(&root, "sticky-shadow").is_empty());
    assert!(!find_all_by_class(&root, "has-horizontal-scroll").is_empty());

    container.set_scroll_left(400.0);
    table.notify(LayoutEvent::Scroll);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!table.scroll_state().show_right_shadow);
    assert!(find_all_by_class(&table.render(), "sticky-shadow").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_mounted_tables_share_one_fallback_loop() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let a = DataTable::new(props(&host, 3), config.clone());
    let b = DataTable::new(props(&host, 3), config);
    attached(&a);
    attached(&b);

    a.mount(&env);
    b.mount(&env);
    assert_eq!(env.fallback.ref_count(), 2);
    assert_eq!(env.registry.len(), 2);

    a.unmount();
    assert!(env.fallback.is_running());
    drop(b);
    assert_eq!(env.fallback.ref_count(), 0);
    assert!(!env.fallback.is_running());
    assert!(env.registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_fallback_loop_styles_mounted_container() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 3), config);
    let container = attached(&table);
    table.mount(&env);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(container.sticky_style().map(|s| s.shadow), Some(true));
}

#[tokio::test(start_paused = true)]
async fn test_mount_twice_is_noop() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 3), config);
    attached(&table);

    table.mount(&env);
    table.mount(&env);
    assert_eq!(env.fallback.ref_count(), 1);
    assert!(table.is_mounted());

    table.unmount();
    assert!(!table.is_mounted());
    assert_eq!(env.fallback.ref_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sticky_pagination_detach_and_reattach() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let props = props(&host, 20).pagination(paginated(&host, PageInfo::new(2, 100, 20)));
    let table = DataTable::new(props, config);
    attached(&table);
    table.mount(&env);
    let floating_id = format!("{}-pagination-floating", table.id());

    table.on_pagination_intersection(false);
    let root = table.render();
    let floating = find_element(&root, &floating_id).expect("floating copy");
    assert_eq!(floating.get_style("left"), Some("24px"));
    assert_eq!(floating.get_style("width"), Some("800px"));

    table.on_pagination_intersection(true);
    assert!(find_element(&table.render(), &floating_id).is_none());
    assert!(host.pages.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_active_row_scrolls_into_view() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 50), config);
    let container = attached(&table);
    container.set_metrics(
        ScrollMetrics::horizontal(1200.0, 800.0, 0.0).with_vertical(2000.0, 400.0, 0.0),
    );
    container.set_row("pay_25", 1000.0, 40.0);
    table.mount(&env);

    table.set_active_item_id(Some("pay_25".into()));
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(container.metrics().scroll_top, 820.0);

    let root = table.render();
    let row = find_by_data(&root, "row-id", "pay_25").expect("row");
    assert_eq!(row.get_attr("aria-current"), Some("true"));
}

#[tokio::test(start_paused = true)]
async fn test_active_row_set_while_loading_scrolls_once_loaded() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 50), config);
    let container = attached(&table);
    container.set_metrics(
        ScrollMetrics::horizontal(1200.0, 800.0, 0.0).with_vertical(2000.0, 400.0, 0.0),
    );
    container.set_row("pay_25", 1000.0, 40.0);
    table.mount(&env);

    table.set_loading(true);
    table.set_active_item_id(Some("pay_25".into()));
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(container.metrics().scroll_top, 0.0);

    table.set_loading(false);
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(container.metrics().scroll_top, 820.0);
}

#[tokio::test(start_paused = true)]
async fn test_active_row_scrolls_after_row_is_laid_out() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 50), config);
    let container = attached(&table);
    container.set_metrics(
        ScrollMetrics::horizontal(1200.0, 800.0, 0.0).with_vertical(2000.0, 400.0, 0.0),
    );
    table.mount(&env);

    table.set_active_item_id(Some("pay_25".into()));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(container.metrics().scroll_top, 0.0);

    container.set_row("pay_25", 1000.0, 40.0);
    table.notify(LayoutEvent::Mutation);
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(container.metrics().scroll_top, 820.0);
}

#[tokio::test(start_paused = true)]
async fn test_active_row_does_not_rescroll_on_resize() {
    let host = Arc::new(Host::default());
    let config = TableConfig::default();
    let env = TableEnvironment::new(&config);
    let table = DataTable::new(props(&host, 50), config);
    let container = attached(&table);
    container.set_metrics(
        ScrollMetrics::horizontal(1200.0, 800.0, 0.0).with_vertical(2000.0, 400.0, 0.0),
    );
    container.set_row("pay_25", 1000.0, 40.0);
    table.mount(&env);

    table.set_active_item_id(Some("pay_25".into()));
    tokio::time::sleep(Duration::from_millis(600)).await;
    let writes = container.scroll_top_writes().len();

    container.set_metrics(
        ScrollMetrics::horizontal(1200.0, 800.0, 0.0).with_vertical(2000.0, 400.0, 0.0),
    );
    table.notify(LayoutEvent::Resize);
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(container.scroll_top_writes().len(), writes);
}
