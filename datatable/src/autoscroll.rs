//! Scroll the active row into view.
//!
//! Scrolling is stepped manually at frame cadence rather than delegated to
//! native smooth scrolling, which fixes both the duration and the curve.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::AutoScrollConfig;
use crate::layout::{ContainerRef, ScrollContainer};

/// An eased vertical scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: f64,
    pub to: f64,
    pub config: AutoScrollConfig,
}

impl ScrollAnimation {
    /// Offset after `elapsed`.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if self.config.duration.is_zero() {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.config.duration.as_secs_f64();
        self.config.easing.interpolate(self.from, self.to, t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.config.duration
    }

    /// Write the offset for `elapsed`. Returns true once finished.
    pub fn step(&self, container: &dyn ScrollContainer, elapsed: Duration) -> bool {
        container.set_scroll_top(self.value_at(elapsed));
        self.is_finished(elapsed)
    }
}

/// Plan a scroll that centers `row_id`, or `None` if the row is missing or
/// already comfortably inside the viewport.
pub fn plan_scroll(
    container: &dyn ScrollContainer,
    row_id: &str,
    config: &AutoScrollConfig,
) -> Option<ScrollAnimation> {
    let row = container.row_rect(row_id)?;
    let view = container.bounding_rect();
    let metrics = container.metrics();

    let comfortable =
        row.top() >= view.top() + config.margin && row.bottom() <= view.bottom() - config.margin;
    if comfortable {
        return None;
    }

    let from = metrics.scroll_top;
    let to = (from + row.center_y() - view.center_y()).clamp(0.0, metrics.max_scroll_top());
    if (to - from).abs() < 1.0 {
        return None;
    }
    Some(ScrollAnimation {
        from,
        to,
        config: *config,
    })
}

/// Follows the externally supplied active row id.
///
/// An id stays pending until it has been scrolled to or found already in
/// view. Pending ids are retried on every call, so an id set while loading
/// or before its row is laid out is picked up once it can be reached.
#[derive(Debug)]
pub struct ActiveRowScroller {
    config: AutoScrollConfig,
    frame_interval: Duration,
    settled: Option<String>,
    animation: Option<JoinHandle<()>>,
}

impl ActiveRowScroller {
    pub fn new(config: AutoScrollConfig, frame_interval: Duration) -> Self {
        Self {
            config,
            frame_interval,
            settled: None,
            animation: None,
        }
    }

    /// React to the active id. Nothing happens while `enabled` is false
    /// (loading or no data) or when the id has already been settled.
    ///
    /// The animation runs on the tokio runtime when one is available and
    /// replaces any animation still in flight. Returns the planned
    /// animation.
    pub fn on_active_change(
        &mut self,
        active: Option<&str>,
        container: &ContainerRef,
        enabled: bool,
    ) -> Option<ScrollAnimation> {
        let Some(id) = active else {
            self.settled = None;
            return None;
        };
        if self.settled.as_deref() == Some(id) || !enabled {
            return None;
        }
        let target = container.get()?;
        target.row_rect(id)?;

        self.settled = Some(id.to_string());
        let animation = plan_scroll(target.as_ref(), id, &self.config)?;

        self.cancel();
        self.animation = spawn_animation(animation, target, self.frame_interval);
        Some(animation)
    }

    /// Stop any running animation where it is.
    pub fn cancel(&mut self) {
        if let Some(task) = self.animation.take() {
            task.abort();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for ActiveRowScroller {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_animation(
    animation: ScrollAnimation,
    container: Arc<dyn ScrollContainer>,
    frame_interval: Duration,
) -> Option<JoinHandle<()>> {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        container.set_scroll_top(animation.to);
        return None;
    };

    Some(handle.spawn(async move {
        let start = Instant::now();
        loop {
            tokio::time::sleep(frame_interval).await;
            if animation.step(container.as_ref(), start.elapsed()) {
                break;
            }
        }
    }))
}
