//! Host layout seams.
//!
//! The engine never touches a layout engine directly. Hosts implement
//! [`ScrollContainer`] for each table's scrollable viewport and hand it to
//! the table through a [`ContainerRef`]; the shared fallback loop finds
//! containers through a [`Document`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tabledom::{Rect, ScrollMetrics};

/// Imperative filter applied to sticky cells that need a shadow.
pub const SHADOW_FILTER: &str = "drop-shadow(-4px 0 6px rgba(0,0,0,0.08))";

/// Transform that forces sticky cells onto their own compositing layer.
pub const SHADOW_TRANSFORM: &str = "translateZ(0)";

/// Style written directly onto sticky cells, bypassing the render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickyStyle {
    pub shadow: bool,
}

impl StickyStyle {
    pub fn new(shadow: bool) -> Self {
        Self { shadow }
    }

    /// Value for the `filter` property.
    pub fn filter(&self) -> &'static str {
        if self.shadow { SHADOW_FILTER } else { "none" }
    }

    /// Value for the `transform` property.
    pub fn transform(&self) -> &'static str {
        if self.shadow { SHADOW_TRANSFORM } else { "none" }
    }
}

/// A scrollable table viewport living in the host's layout engine.
pub trait ScrollContainer: Send + Sync {
    /// Current scroll geometry. Zeros mean "not laid out yet".
    fn metrics(&self) -> ScrollMetrics;

    /// Bounding box in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Bounding box of the row tagged `data-row-id="{row_id}"`, if rendered.
    fn row_rect(&self, row_id: &str) -> Option<Rect>;

    /// Move the vertical scroll position.
    fn set_scroll_top(&self, top: f64);

    /// Number of sticky-marked cells inside the container.
    fn sticky_cell_count(&self) -> usize;

    /// Style most recently written to the sticky cells, if any.
    fn sticky_style(&self) -> Option<StickyStyle>;

    /// Write `style` onto every sticky cell.
    fn apply_sticky_style(&self, style: StickyStyle);
}

/// A possibly-unattached handle to a table's scroll container.
///
/// Cloning shares the slot, so a table and its observers always see the
/// same attachment.
#[derive(Clone, Default)]
pub struct ContainerRef {
    slot: Arc<RwLock<Option<Arc<dyn ScrollContainer>>>>,
}

impl ContainerRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the host element.
    pub fn attach(&self, container: Arc<dyn ScrollContainer>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(container);
        }
    }

    /// Detach the host element (conditional unmount).
    pub fn detach(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    pub fn get(&self) -> Option<Arc<dyn ScrollContainer>> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    pub fn is_attached(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Enumerates every mounted scroll container.
pub trait Document: Send + Sync {
    fn scroll_containers(&self) -> Vec<Arc<dyn ScrollContainer>>;
}

/// Identifies a container registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

/// [`Document`] backed by explicit table registrations.
///
/// Tables register their [`ContainerRef`] on mount and unregister on
/// unmount; only attached refs are reported.
#[derive(Default)]
pub struct ContainerRegistry {
    entries: RwLock<Vec<(RegistrationId, ContainerRef)>>,
    next_id: AtomicU64,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, container: ContainerRef) -> RegistrationId {
        let id = RegistrationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut entries) = self.entries.write() {
            entries.push((id, container));
        }
        id
    }

    pub fn unregister(&self, id: RegistrationId) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|(entry_id, _)| *entry_id != id);
        }
    }

    /// Number of live registrations, attached or not.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Document for ContainerRegistry {
    fn scroll_containers(&self) -> Vec<Arc<dyn ScrollContainer>> {
        self.entries
            .read()
            .map(|entries| entries.iter().filter_map(|(_, r)| r.get()).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for ContainerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRegistry")
            .field("registrations", &self.len())
            .finish()
    }
}
