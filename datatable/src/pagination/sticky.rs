use crate::layout::ContainerRef;

/// Last measured horizontal extent of the table container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyBounds {
    pub left: f64,
    pub width: f64,
}

/// Tracks whether pagination has scrolled out of view.
///
/// The host forwards intersection changes of the in-flow pagination bar and
/// resizes of the container. While detached, [`bounds`](Self::bounds)
/// positions the floating copy.
#[derive(Debug)]
pub struct StickyPagination {
    container: ContainerRef,
    bounds: Option<StickyBounds>,
    connected: bool,
}

impl StickyPagination {
    pub fn new(container: ContainerRef) -> Self {
        Self {
            container,
            bounds: None,
            connected: false,
        }
    }

    /// Start accepting observer notifications.
    pub fn connect(&mut self) {
        self.connected = true;
    }

    /// Stop accepting observer notifications and drop the floating copy.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.bounds = None;
    }

    /// The in-flow bar entered or left the viewport.
    ///
    /// Returns true if the floating copy's bounds changed.
    pub fn on_intersection(&mut self, is_intersecting: bool) -> bool {
        if !self.connected {
            return false;
        }
        let previous = self.bounds;
        self.bounds = if is_intersecting { None } else { self.measure() };
        let changed = previous != self.bounds;
        if changed {
            log::trace!("StickyPagination: bounds={:?}", self.bounds);
        }
        changed
    }

    /// The container resized. Re-measures only while detached; a container
    /// that cannot be measured keeps the last bounds.
    pub fn on_container_resize(&mut self) -> bool {
        if !self.connected || self.bounds.is_none() {
            return false;
        }
        let previous = self.bounds;
        if let Some(next) = self.measure() {
            self.bounds = Some(next);
        }
        previous != self.bounds
    }

    fn measure(&self) -> Option<StickyBounds> {
        let rect = self.container.get()?.bounding_rect();
        Some(StickyBounds {
            left: rect.left(),
            width: rect.width,
        })
    }

    pub fn bounds(&self) -> Option<StickyBounds> {
        self.bounds
    }

    pub fn is_detached(&self) -> bool {
        self.bounds.is_some()
    }
}
