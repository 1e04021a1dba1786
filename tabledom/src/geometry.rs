//! Geometry read back from the host layout engine.
//!
//! All values are CSS pixels. Hosts may report fractional values (zoomed
//! pages, sub-pixel layout), so everything is `f64`.

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical center line.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether `other` overlaps this rectangle by any positive area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Scroll geometry of a scrollable element.
///
/// Mirrors the `scroll*`/`client*` measurements a browser exposes. A host
/// that has not laid the element out yet reports zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_width: f64,
    pub client_width: f64,
    pub scroll_left: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    pub scroll_top: f64,
}

impl ScrollMetrics {
    /// Metrics for the horizontal axis only.
    pub fn horizontal(scroll_width: f64, client_width: f64, scroll_left: f64) -> Self {
        Self {
            scroll_width,
            client_width,
            scroll_left,
            ..Default::default()
        }
    }

    /// Set the vertical axis.
    pub fn with_vertical(mut self, scroll_height: f64, client_height: f64, scroll_top: f64) -> Self {
        self.scroll_height = scroll_height;
        self.client_height = client_height;
        self.scroll_top = scroll_top;
        self
    }

    /// True once layout has produced non-zero horizontal dimensions.
    pub fn is_measurable(&self) -> bool {
        self.scroll_width > 0.0 && self.client_width > 0.0
    }

    /// Largest valid `scroll_left`.
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Largest valid `scroll_top`.
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}
