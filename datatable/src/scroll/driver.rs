use std::time::Duration;

use tabledom::LayoutEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::retry::RetrySchedule;
use super::tracker::ScrollTracker;

/// A tracker running on the tokio runtime.
///
/// Dropping the handle unmounts: pending retries and frames are abandoned
/// and both driver tasks are aborted.
#[derive(Debug)]
pub struct MountedTracker {
    tracker: ScrollTracker,
    events: mpsc::UnboundedSender<LayoutEvent>,
    init_task: JoinHandle<()>,
    event_task: JoinHandle<()>,
}

impl MountedTracker {
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// Forward a host event. Never blocks.
    pub fn notify(&self, event: LayoutEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for MountedTracker {
    fn drop(&mut self) {
        self.tracker.set_mounted(false);
        self.init_task.abort();
        self.event_task.abort();
    }
}

/// Start tracking.
///
/// Must be called from within a tokio runtime.
pub fn mount(
    tracker: ScrollTracker,
    retry_delays: Vec<Duration>,
    frame_interval: Duration,
) -> MountedTracker {
    tracker.set_mounted(true);
    let (events, rx) = mpsc::unbounded_channel();

    let init_task = tokio::spawn(initialize(tracker.clone(), RetrySchedule::new(retry_delays)));
    let event_task = tokio::spawn(run_events(tracker.clone(), rx, frame_interval));

    MountedTracker {
        tracker,
        events,
        init_task,
        event_task,
    }
}

/// Retry measurement until layout settles or the schedule runs out.
async fn initialize(tracker: ScrollTracker, mut schedule: RetrySchedule) {
    while let Some(wait) = schedule.next_wait() {
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        if !tracker.is_mounted() {
            return;
        }
        if tracker.try_initialize() {
            log::debug!(
                "ScrollTracker: initialized after {} attempt(s)",
                schedule.attempts()
            );
            return;
        }
    }
    log::debug!(
        "ScrollTracker: container never measurable, giving up after {} attempts",
        schedule.attempts()
    );
}

/// Coalesce events into at most one recomputation per frame.
async fn run_events(
    tracker: ScrollTracker,
    mut rx: mpsc::UnboundedReceiver<LayoutEvent>,
    frame_interval: Duration,
) {
    while let Some(event) = rx.recv().await {
        if !tracker.is_mounted() {
            break;
        }
        tracker.notify(event);
        if !tracker.has_pending_frame() {
            continue;
        }

        tokio::time::sleep(frame_interval).await;
        while let Ok(event) = rx.try_recv() {
            tracker.notify(event);
        }
        if tracker.is_mounted() {
            tracker.flush_frame();
        }
    }
}
