//! Shared shadow fallback loop.
//!
//! Some rendering engines lag when the sticky column's shadow is toggled
//! declaratively. The fallback loop periodically recomputes the shadow for
//! every mounted scroll container and writes the style directly.
//!
//! One [`ShadowFallback`] is constructed per process and injected wherever
//! tables mount. Each table holds a [`FallbackGuard`] while mounted; the
//! interval runs only while at least one guard is alive.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::ShadowConfig;
use crate::layout::Document;
use crate::scroll::ScrollState;

struct LoopState {
    refs: usize,
    task: Option<JoinHandle<()>>,
    ticks: u64,
}

struct FallbackInner {
    document: Arc<dyn Document>,
    config: ShadowConfig,
    interval: Duration,
    state: Mutex<LoopState>,
}

/// Handle to the reference-counted fallback loop.
#[derive(Clone)]
pub struct ShadowFallback {
    inner: Arc<FallbackInner>,
}

impl ShadowFallback {
    pub fn new(document: Arc<dyn Document>, config: ShadowConfig, interval: Duration) -> Self {
        Self {
            inner: Arc::new(FallbackInner {
                document,
                config,
                interval,
                state: Mutex::new(LoopState {
                    refs: 0,
                    task: None,
                    ticks: 0,
                }),
            }),
        }
    }

    /// Register a mounted table. The first guard starts the interval.
    ///
    /// Outside a tokio runtime the guard is still counted but no interval
    /// runs; [`tick`](Self::tick) can be driven by hand.
    pub fn acquire(&self) -> FallbackGuard {
        if let Ok(mut state) = self.inner.state.lock() {
            state.refs += 1;
            if state.refs == 1 {
                state.task = self.spawn_interval();
            }
        }
        FallbackGuard {
            fallback: self.clone(),
        }
    }

    fn release(&self) {
        if let Ok(mut state) = self.inner.state.lock() {
            state.refs = state.refs.saturating_sub(1);
            if state.refs == 0
                && let Some(task) = state.task.take()
            {
                task.abort();
                log::debug!("ShadowFallback: last table unmounted, loop stopped");
            }
        }
    }

    fn spawn_interval(&self) -> Option<JoinHandle<()>> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::warn!("ShadowFallback: no tokio runtime, loop not started");
            return None;
        };

        let weak: Weak<FallbackInner> = Arc::downgrade(&self.inner);
        let period = self.inner.interval;
        log::debug!("ShadowFallback: loop started ({:?})", period);

        Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else { break };
                ShadowFallback { inner }.tick();
            }
        }))
    }

    /// One consistency pass over every container.
    ///
    /// Writes only where the applied style differs from the computed one,
    /// so repeated ticks against unchanged geometry are no-ops. Returns the
    /// number of containers written.
    pub fn tick(&self) -> usize {
        let mut written = 0;
        for container in self.inner.document.scroll_containers() {
            if container.sticky_cell_count() == 0 {
                continue;
            }
            let style =
                ScrollState::from_metrics(&container.metrics(), &self.inner.config).sticky_style();
            if container.sticky_style() != Some(style) {
                container.apply_sticky_style(style);
                written += 1;
            }
        }

        if let Ok(mut state) = self.inner.state.lock() {
            state.ticks += 1;
        }
        if written > 0 {
            log::trace!("ShadowFallback: corrected {} container(s)", written);
        }
        written
    }

    /// Live guards.
    pub fn ref_count(&self) -> usize {
        self.inner.state.lock().map(|s| s.refs).unwrap_or(0)
    }

    /// Whether the interval task is alive.
    pub fn is_running(&self) -> bool {
        self.inner
            .state
            .lock()
            .map(|s| s.task.as_ref().is_some_and(|t| !t.is_finished()))
            .unwrap_or(false)
    }

    /// Completed ticks since construction.
    pub fn ticks(&self) -> u64 {
        self.inner.state.lock().map(|s| s.ticks).unwrap_or(0)
    }
}

impl fmt::Debug for ShadowFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowFallback")
            .field("refs", &self.ref_count())
            .field("interval", &self.inner.interval)
            .finish()
    }
}

/// Keeps the fallback loop alive while a table is mounted.
pub struct FallbackGuard {
    fallback: ShadowFallback,
}

impl Drop for FallbackGuard {
    fn drop(&mut self) {
        self.fallback.release();
    }
}

impl fmt::Debug for FallbackGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackGuard").finish_non_exhaustive()
    }
}
