/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Enter and Space activate the focused control.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

/// Host notifications that can invalidate measured geometry.
///
/// Scroll and resize arrive in storms; the rest are rare lifecycle signals
/// after which cached geometry may be stale (restored background tabs,
/// back/forward cache, window refocus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEvent {
    /// The container scrolled.
    Scroll,
    /// The container or window changed size.
    Resize,
    /// The container subtree changed (style, class, or children).
    Mutation,
    /// Document visibility changed.
    VisibilityChange,
    /// Page restored from the back/forward cache.
    PageShow,
    /// Window regained focus.
    Focus,
}

impl LayoutEvent {
    /// Lifecycle signals that warrant an immediate re-measure rather than
    /// waiting for the next coalesced frame.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            LayoutEvent::VisibilityChange | LayoutEvent::PageShow | LayoutEvent::Focus
        )
    }
}
