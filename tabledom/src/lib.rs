pub mod easing;
pub mod element;
pub mod event;
pub mod geometry;
pub mod render;

pub use easing::Easing;
pub use element::{find_all_by_class, find_by_data, find_element, Content, Element};
pub use event::{Key, LayoutEvent};
pub use geometry::{Rect, ScrollMetrics};
pub use render::to_html;
