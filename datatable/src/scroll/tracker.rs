use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tabledom::LayoutEvent;

use crate::config::ShadowConfig;
use crate::layout::ContainerRef;

use super::frame::FrameScheduler;
use super::state::ScrollState;

#[derive(Debug)]
struct TrackerInner {
    state: ScrollState,
    config: ShadowConfig,
    /// Set once a measurement saw non-zero geometry.
    initialized: bool,
    frames: FrameScheduler,
    measurements: u64,
}

/// Derives [`ScrollState`] from a scroll container.
///
/// Cheap to clone; clones share state. Measurements against an unattached
/// or zero-sized container are skipped and leave the last state in place.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    container: ContainerRef,
    inner: Arc<RwLock<TrackerInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
    /// Guards late retries and frames after unmount.
    mounted: Arc<AtomicBool>,
}

impl ScrollTracker {
    pub fn new(container: ContainerRef, config: ShadowConfig) -> Self {
        Self {
            container,
            inner: Arc::new(RwLock::new(TrackerInner {
                state: ScrollState::default(),
                config,
                initialized: false,
                frames: FrameScheduler::new(),
                measurements: 0,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
            mounted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The container this tracker measures.
    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    /// Last derived state.
    pub fn state(&self) -> ScrollState {
        self.inner.read().map(|g| g.state).unwrap_or_default()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.read().map(|g| g.initialized).unwrap_or(false)
    }

    /// Number of measurements that produced a state.
    pub fn measurements(&self) -> u64 {
        self.inner.read().map(|g| g.measurements).unwrap_or(0)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub(crate) fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::SeqCst);
        if !mounted && let Ok(mut guard) = self.inner.write() {
            guard.frames.cancel();
        }
    }

    /// Check and clear the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Read geometry and recompute.
    ///
    /// Returns `None` without touching state when the container is detached
    /// or not laid out yet.
    pub fn measure(&self) -> Option<ScrollState> {
        let container = self.container.get()?;
        let metrics = container.metrics();
        if !metrics.is_measurable() {
            log::trace!("ScrollTracker: container not laid out yet");
            return None;
        }

        let mut guard = self.inner.write().ok()?;
        let next = ScrollState::from_metrics(&metrics, &guard.config);
        guard.measurements += 1;
        guard.initialized = true;
        if guard.state != next {
            guard.state = next;
            self.dirty.store(true, Ordering::SeqCst);
        }
        Some(next)
    }

    /// One initialization attempt. True once geometry is available.
    pub fn try_initialize(&self) -> bool {
        self.measure().is_some()
    }

    /// Handle a host event.
    ///
    /// Lifecycle events re-measure immediately since the geometry may be
    /// stale; everything else schedules a coalesced frame.
    pub fn notify(&self, event: LayoutEvent) {
        if event.is_lifecycle() {
            log::trace!("ScrollTracker: re-measuring after {:?}", event);
            self.measure();
            return;
        }
        if let Ok(mut guard) = self.inner.write()
            && guard.frames.request()
        {
            log::trace!("ScrollTracker: frame scheduled for {:?}", event);
        }
    }

    pub fn has_pending_frame(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.frames.is_pending())
            .unwrap_or(false)
    }

    /// Run the pending frame, if any. Returns whether a recomputation ran.
    pub fn flush_frame(&self) -> bool {
        let pending = self
            .inner
            .write()
            .map(|mut g| g.frames.take())
            .unwrap_or(false);
        if pending {
            self.measure();
        }
        pending
    }
}
