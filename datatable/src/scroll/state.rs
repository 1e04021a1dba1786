use tabledom::ScrollMetrics;

use crate::config::ShadowConfig;
use crate::layout::StickyStyle;

/// Derived horizontal scroll state of a table viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// The sticky actions column should cast a shadow: content is hidden
    /// beneath it to the right.
    pub show_right_shadow: bool,
    /// The content overflows horizontally.
    pub has_horizontal_scroll: bool,
}

impl ScrollState {
    /// The shadow formula. Both the tracker and the fallback loop go
    /// through here, so they cannot disagree about the same geometry.
    pub fn from_metrics(metrics: &ScrollMetrics, config: &ShadowConfig) -> Self {
        if metrics.scroll_width <= metrics.client_width + config.tolerance {
            return Self::default();
        }

        let max_scroll = metrics.scroll_width - metrics.client_width;
        Self {
            show_right_shadow: metrics.scroll_left < max_scroll - config.threshold,
            has_horizontal_scroll: true,
        }
    }

    /// The imperative style matching this state.
    pub fn sticky_style(&self) -> StickyStyle {
        StickyStyle::new(self.show_right_shadow)
    }
}
