use super::Element;

/// What an element holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<Element>),
}

impl Content {
    pub fn is_none(&self) -> bool {
        matches!(self, Content::None)
    }
}
