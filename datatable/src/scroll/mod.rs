//! Horizontal scroll tracking for the sticky actions column.
//!
//! [`ScrollTracker`] derives [`ScrollState`] from container geometry.
//! [`mount`] drives it on a tokio runtime: initial measurement retries,
//! then frame-coalesced recomputation for every [`LayoutEvent`] the host
//! forwards.
//!
//! [`LayoutEvent`]: tabledom::LayoutEvent

mod driver;
mod frame;
mod retry;
mod state;
mod tracker;

pub use driver::{mount, MountedTracker};
pub use frame::FrameScheduler;
pub use retry::RetrySchedule;
pub use state::ScrollState;
pub use tracker::ScrollTracker;
