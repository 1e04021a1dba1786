//! Engine configuration.

use std::time::Duration;

use tabledom::Easing;

/// Pixel margins for the sticky-column shadow formula.
///
/// `tolerance` absorbs sub-pixel overflow that should not count as
/// scrollable; `threshold` hides the shadow slightly before the exact end
/// so it does not flicker at the boundary. Keep `threshold >= tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub threshold: f64,
    pub tolerance: f64,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            tolerance: 1.0,
        }
    }
}

/// Active-row auto-scroll settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// A row closer than this to the container edge is scrolled into view.
    pub margin: f64,
    /// Animation duration.
    pub duration: Duration,
    /// Animation curve.
    pub easing: Easing,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            margin: 80.0,
            duration: Duration::from_millis(500),
            easing: Easing::EaseInOutCubic,
        }
    }
}

/// Page-size bounds and selector options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeConfig {
    pub min: usize,
    pub max: usize,
    pub default: usize,
    pub options: Vec<usize>,
}

impl Default for PageSizeConfig {
    fn default() -> Self {
        Self {
            min: 10,
            max: 100,
            default: 20,
            options: vec![10, 20, 50, 100],
        }
    }
}

impl PageSizeConfig {
    /// Whether `size` is inside the accepted bounds.
    pub fn is_valid(&self, size: usize) -> bool {
        (self.min..=self.max).contains(&size)
    }
}

/// Configuration for a data table and its shared subsystems.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datatable::TableConfig;
///
/// let config = TableConfig::default()
///     .with_fallback_interval(Duration::from_millis(250))
///     .with_max_skeleton_rows(5);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Shadow formula margins, shared by the tracker and the fallback loop.
    pub shadow: ShadowConfig,

    /// Offsets from mount at which initial measurement is attempted.
    ///
    /// Default: 0, 50, 100, 200, 500, 1000, 2000 ms
    pub retry_delays: Vec<Duration>,

    /// Animation-frame cadence used to coalesce scroll and resize storms.
    ///
    /// Default: 16 ms
    pub frame_interval: Duration,

    /// Period of the shared shadow fallback loop.
    ///
    /// Default: 100 ms
    pub fallback_interval: Duration,

    pub autoscroll: AutoScrollConfig,

    pub page_size: PageSizeConfig,

    /// Upper bound on skeleton rows rendered while loading.
    ///
    /// Default: 10
    pub max_skeleton_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            shadow: ShadowConfig::default(),
            retry_delays: [0, 50, 100, 200, 500, 1000, 2000]
                .into_iter()
                .map(Duration::from_millis)
                .collect(),
            frame_interval: Duration::from_millis(16),
            fallback_interval: Duration::from_millis(100),
            autoscroll: AutoScrollConfig::default(),
            page_size: PageSizeConfig::default(),
            max_skeleton_rows: 10,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shadow margins.
    pub fn with_shadow(mut self, shadow: ShadowConfig) -> Self {
        self.shadow = shadow;
        self
    }

    /// Sets the initial measurement schedule.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Sets the frame interval.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Sets the fallback loop period.
    pub fn with_fallback_interval(mut self, interval: Duration) -> Self {
        self.fallback_interval = interval;
        self
    }

    /// Sets the auto-scroll behavior.
    pub fn with_autoscroll(mut self, autoscroll: AutoScrollConfig) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    /// Sets the page-size bounds.
    pub fn with_page_size(mut self, page_size: PageSizeConfig) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the skeleton row cap.
    pub fn with_max_skeleton_rows(mut self, rows: usize) -> Self {
        self.max_skeleton_rows = rows;
        self
    }
}
