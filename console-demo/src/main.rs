mod catalog;
mod console;
mod paths;

use std::fs::{self, File};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use datatable::prelude::*;
use datatable::testing::SyntheticContainer;
use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::{to_html, Rect, ScrollMetrics};

use crate::catalog::Payment;
use crate::console::{ConsoleState, SharedState};

/// Row height used by the simulated layout.
const ROW_HEIGHT: f64 = 48.0;

fn init_logging() {
    let path = paths::log_file().unwrap_or_else(|| "console-demo.log".into());
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

/// Stand-in for the browser viewport: a 960px wide, 480px tall scroll
/// container over a wider grid.
fn simulated_container(rows: &[Payment]) -> Arc<SyntheticContainer> {
    let container = Arc::new(SyntheticContainer::new());
    let content_height = rows.len() as f64 * ROW_HEIGHT;
    container.set_metrics(
        ScrollMetrics::horizontal(1280.0, 960.0, 0.0).with_vertical(content_height, 480.0, 0.0),
    );
    container.set_bounding_rect(Rect::new(32.0, 120.0, 960.0, 480.0));
    layout_rows(&container, rows);
    container
}

fn layout_rows(container: &SyntheticContainer, rows: &[Payment]) {
    for (index, row) in rows.iter().enumerate() {
        container.set_row(&row.id, index as f64 * ROW_HEIGHT, ROW_HEIGHT);
    }
}

/// Rebuild the table inputs from console state, as a re-render would.
fn sync(
    table: &DataTable<Payment>,
    container: &SyntheticContainer,
    payments: &[Payment],
    state: &SharedState,
) {
    let props = console::props(payments, state);
    layout_rows(container, &props.data);
    table.update(|p| *p = props);
}

fn print_frame(label: &str, table: &DataTable<Payment>) {
    let dirty = table.take_dirty();
    println!("<!-- {label} (changed: {dirty}) -->");
    println!("{}", to_html(&table.render()));
}

#[tokio::main]
async fn main() {
    init_logging();

    let payments = match catalog::load() {
        Ok(payments) => payments,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    log::info!("Loaded {} payments", payments.len());

    let config = TableConfig::default();
    let store: Arc<dyn PreferenceStore> = match paths::preferences_file() {
        Some(path) => Arc::new(FileStore::new(path)),
        None => {
            log::warn!("No config directory, page size will not persist");
            Arc::new(MemoryStore::new())
        }
    };
    let preference = Arc::new(PageSizePreference::new(store, config.page_size.clone()));
    let env = TableEnvironment::new(&config).with_preference(preference.clone());

    let state: SharedState = Arc::new(Mutex::new(ConsoleState::new(preference.get_page_size())));
    let table = DataTable::new(console::props(&payments, &state), config);
    let container = simulated_container(&table.with_props(|p| p.data.clone()).unwrap_or_default());
    table.container().attach(container.clone());
    table.mount(&env);

    tokio::time::sleep(Duration::from_millis(20)).await;
    print_frame("mounted", &table);

    // Select every succeeded payment on the page.
    let trigger = state.lock().ok().and_then(|s| s.select_succeeded.clone());
    if let Some(trigger) = trigger {
        trigger();
        sync(&table, &container, &payments, &state);
    }

    // Scroll right to the end of the grid; the sticky shadow goes away.
    container.set_scroll_left(320.0);
    table.notify(LayoutEvent::Scroll);
    tokio::time::sleep(Duration::from_millis(40)).await;
    log::info!("After scroll: {:?}", table.scroll_state());

    // Keyboard-open a row, which makes it active.
    table.handle_row_key(14, Key::Enter);
    sync(&table, &container, &payments, &state);
    tokio::time::sleep(Duration::from_millis(600)).await;

    // Pagination scrolls out of view.
    table.on_pagination_intersection(false);
    print_frame("pagination detached", &table);

    table.go_to_page(2);
    sync(&table, &container, &payments, &state);
    if table.change_page_size(50) {
        sync(&table, &container, &payments, &state);
    }
    table.on_pagination_intersection(true);
    print_frame("page size 50", &table);

    table.unmount();
    if let Ok(state) = state.lock() {
        for event in &state.events {
            println!("<!-- event: {event} -->");
        }
    }
}
