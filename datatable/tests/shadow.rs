use std::sync::Arc;
use std::time::Duration;

use datatable::config::ShadowConfig;
use datatable::layout::{ContainerRef, ContainerRegistry, ScrollContainer};
use datatable::shadow::ShadowFallback;
use datatable::testing::SyntheticContainer;

const INTERVAL: Duration = Duration::from_millis(100);

fn setup() -> (Arc<ContainerRegistry>, ShadowFallback) {
    let registry = Arc::new(ContainerRegistry::new());
    let fallback = ShadowFallback::new(registry.clone(), ShadowConfig::default(), INTERVAL);
    (registry, fallback)
}

fn register(registry: &ContainerRegistry, container: &Arc<SyntheticContainer>) {
    let slot = ContainerRef::new();
    slot.attach(container.clone());
    registry.register(slot);
}

// =============================================================================
// Tick Tests
// =============================================================================

#[test]
fn test_tick_converges_in_one_pass() {
    let (registry, fallback) = setup();
    let container = Arc::new(SyntheticContainer::with_horizontal(1000.0, 400.0, 0.0));
    register(&registry, &container);

    assert_eq!(fallback.tick(), 1);
    assert_eq!(container.sticky_style().map(|s| s.shadow), Some(true));

    container.set_scroll_left(600.0);
    assert_eq!(fallback.tick(), 1);
    assert_eq!(container.sticky_style().map(|s| s.shadow), Some(false));
}

#[test]
fn test_tick_skips_unchanged_styles() {
    let (registry, fallback) = setup();
    let container = Arc::new(SyntheticContainer::with_horizontal(1000.0, 400.0, 0.0));
    register(&registry, &container);

    fallback.tick();
    fallback.tick();
    fallback.tick();
    assert_eq!(container.style_writes(), 1);
    assert_eq!(fallback.ticks(), 3);
}

#[test]
fn test_tick_ignores_containers_without_sticky_cells() {
    let (registry, fallback) = setup();
    let container = Arc::new(SyntheticContainer::with_horizontal(1000.0, 400.0, 0.0));
    container.set_sticky_cells(0);
    register(&registry, &container);

    assert_eq!(fallback.tick(), 0);
    assert_eq!(container.sticky_style(), None);
}

#[test]
fn test_tick_covers_every_registered_container() {
    let (registry, fallback) = setup();
    let scrolled = Arc::new(SyntheticContainer::with_horizontal(1000.0, 400.0, 0.0));
    let fitting = Arc::new(SyntheticContainer::with_horizontal(400.0, 400.0, 0.0));
    register(&registry, &scrolled);
    register(&registry, &fitting);

    assert_eq!(fallback.tick(), 2);
    assert_eq!(scrolled.sticky_style().map(|s| s.shadow), Some(true));
    assert_eq!(fitting.sticky_style().map(|s| s.shadow), Some(false));
}

#[test]
fn test_unregistered_container_is_not_scanned() {
    let (registry, fallback) = setup();
    let container = Arc::new(SyntheticContainer::with_horizontal(1000.0, 400.0, 0.0));
    let slot = ContainerRef::new();
    slot.attach(container.clone());
    let id = registry.register(slot);
    registry.unregister(id);

    assert_eq!(fallback.tick(), 0);
    assert!(registry.is_empty());
}

// =============================================================================
// Reference Counting Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_first_guard_starts_loop() {
    let (_registry, fallback) = setup();
    assert!(!fallback.is_running());

    let guard = fallback.acquire();
    assert!(fallback.is_running());
    assert_eq!(fallback.ref_count(), 1);
    drop(guard);
}

#[tokio::test(start_paused = true)]
async fn test_loop_survives_until_last_guard() {
    let (_registry, fallback) = setup();
    let a = fallback.acquire();
    let b = fallback.acquire();
    assert_eq!(fallback.ref_count(), 2);

    drop(a);
    assert!(fallback.is_running());

    drop(b);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(fallback.ref_count(), 0);
    assert!(!fallback.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_loop_ticks_on_interval() {
    let (registry, fallback) = setup();
    let container = Arc::new(SyntheticContainer::with_horizontal(1000.0, 400.0, 0.0));
    register(&registry, &container);

    let _guard = fallback.acquire();
    tokio::time::sleep(INTERVAL * 3 + Duration::from_millis(10)).await;

    assert!(fallback.ticks() >= 3);
    assert_eq!(container.style_writes(), 1);

    container.set_scroll_left(600.0);
    tokio::time::sleep(INTERVAL).await;
    assert_eq!(container.sticky_style().map(|s| s.shadow), Some(false));
}

#[tokio::test(start_paused = true)]
async fn test_loop_stops_ticking_after_release() {
    let (_registry, fallback) = setup();
    let guard = fallback.acquire();
    tokio::time::sleep(INTERVAL * 2).await;
    drop(guard);

    let ticks = fallback.ticks();
    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(fallback.ticks(), ticks);
}

#[tokio::test(start_paused = true)]
async fn test_reacquire_restarts_loop() {
    let (_registry, fallback) = setup();
    drop(fallback.acquire());
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(!fallback.is_running());

    let _guard = fallback.acquire();
    assert!(fallback.is_running());
}

#[test]
fn test_acquire_without_runtime_still_counts() {
    let (_registry, fallback) = setup();
    let guard = fallback.acquire();
    assert_eq!(fallback.ref_count(), 1);
    assert!(!fallback.is_running());
    drop(guard);
    assert_eq!(fallback.ref_count(), 0);
}
