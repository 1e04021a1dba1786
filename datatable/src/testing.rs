//! Layout test doubles.
//!
//! [`SyntheticContainer`] stands in for a browser scroll container: tests set
//! geometry directly and inspect the imperative writes the engine made.

use std::collections::HashMap;
use std::sync::RwLock;

use tabledom::{Rect, ScrollMetrics};

use crate::layout::{ScrollContainer, StickyStyle};

#[derive(Debug, Default)]
struct SyntheticInner {
    metrics: ScrollMetrics,
    rect: Rect,
    /// Row offsets from the top of the scrolled content.
    rows: HashMap<String, (f64, f64)>,
    sticky_cells: usize,
    sticky_style: Option<StickyStyle>,
    style_writes: usize,
    scroll_top_writes: Vec<f64>,
}

/// Scroll container with settable geometry.
#[derive(Debug, Default)]
pub struct SyntheticContainer {
    inner: RwLock<SyntheticInner>,
}

impl SyntheticContainer {
    /// A container with no layout yet (all zeros) and one sticky cell.
    pub fn new() -> Self {
        let container = Self::default();
        container.set_sticky_cells(1);
        container
    }

    /// A laid-out container with horizontal geometry.
    pub fn with_horizontal(scroll_width: f64, client_width: f64, scroll_left: f64) -> Self {
        let container = Self::new();
        container.set_metrics(ScrollMetrics::horizontal(scroll_width, client_width, scroll_left));
        container
    }

    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        if let Ok(mut inner) = self.inner.write() {
            inner.metrics = metrics;
        }
    }

    pub fn set_scroll_left(&self, scroll_left: f64) {
        if let Ok(mut inner) = self.inner.write() {
            inner.metrics.scroll_left = scroll_left;
        }
    }

    pub fn set_bounding_rect(&self, rect: Rect) {
        if let Ok(mut inner) = self.inner.write() {
            inner.rect = rect;
        }
    }

    /// Place a row at `offset` pixels from the top of the content.
    pub fn set_row(&self, row_id: &str, offset: f64, height: f64) {
        if let Ok(mut inner) = self.inner.write() {
            inner.rows.insert(row_id.to_string(), (offset, height));
        }
    }

    pub fn set_sticky_cells(&self, count: usize) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sticky_cells = count;
        }
    }

    /// How many times a sticky style was written.
    pub fn style_writes(&self) -> usize {
        self.inner.read().map(|i| i.style_writes).unwrap_or(0)
    }

    /// Every `set_scroll_top` value, in order.
    pub fn scroll_top_writes(&self) -> Vec<f64> {
        self.inner
            .read()
            .map(|i| i.scroll_top_writes.clone())
            .unwrap_or_default()
    }
}

impl ScrollContainer for SyntheticContainer {
    fn metrics(&self) -> ScrollMetrics {
        self.inner.read().map(|i| i.metrics).unwrap_or_default()
    }

    fn bounding_rect(&self) -> Rect {
        self.inner.read().map(|i| i.rect).unwrap_or_default()
    }

    fn row_rect(&self, row_id: &str) -> Option<Rect> {
        let inner = self.inner.read().ok()?;
        let (offset, height) = inner.rows.get(row_id).copied()?;
        let y = inner.rect.y + offset - inner.metrics.scroll_top;
        Some(Rect::new(inner.rect.x, y, inner.rect.width, height))
    }

    fn set_scroll_top(&self, top: f64) {
        if let Ok(mut inner) = self.inner.write() {
            let clamped = top.clamp(0.0, inner.metrics.max_scroll_top());
            inner.metrics.scroll_top = clamped;
            inner.scroll_top_writes.push(clamped);
        }
    }

    fn sticky_cell_count(&self) -> usize {
        self.inner.read().map(|i| i.sticky_cells).unwrap_or(0)
    }

    fn sticky_style(&self) -> Option<StickyStyle> {
        self.inner.read().ok().and_then(|i| i.sticky_style)
    }

    fn apply_sticky_style(&self, style: StickyStyle) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sticky_style = Some(style);
            inner.style_writes += 1;
        }
    }
}
