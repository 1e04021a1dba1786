use std::fmt;
use std::sync::Arc;

use tabledom::Element;

/// Renders one cell for a row at the given page index.
pub type CellRenderer<T> = Arc<dyn Fn(&T, usize) -> Element + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn class(&self) -> &'static str {
        match self {
            Alignment::Left => "text-left",
            Alignment::Center => "text-center",
            Alignment::Right => "text-right",
        }
    }
}

/// A CSS length for column sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    pub fn to_css(&self) -> String {
        match self {
            Length::Px(px) => format!("{px}px"),
            Length::Percent(pct) => format!("{pct}%"),
        }
    }
}

/// A table column definition.
///
/// Built by the host for each render; the engine only reads it.
///
/// # Examples
///
/// ```
/// use datatable::widgets::{Alignment, Column, Length};
/// use tabledom::Element;
///
/// struct Payment { amount: u64 }
///
/// let amount = Column::new("amount", "Amount", |p: &Payment, _| {
///     Element::text_span(p.amount.to_string())
/// })
/// .align(Alignment::Right)
/// .width(Length::Px(120.0));
/// ```
pub struct Column<T> {
    /// Unique key within the table.
    pub key: String,
    pub header: Element,
    pub width: Option<Length>,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    pub align: Alignment,
    /// Clip overflowing content with an ellipsis.
    pub truncate: bool,
    render: CellRenderer<T>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        render: impl Fn(&T, usize) -> Element + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: Element::text_span(header),
            width: None,
            min_width: None,
            max_width: None,
            align: Alignment::Left,
            truncate: true,
            render: Arc::new(render),
        }
    }

    /// Replace the text header with arbitrary content.
    pub fn header_element(mut self, header: Element) -> Self {
        self.header = header;
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, width: Length) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: Length) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.truncate = false;
        self
    }

    pub fn render(&self, item: &T, index: usize) -> Element {
        (self.render)(item, index)
    }

    /// Apply width constraints as inline style.
    pub(crate) fn size(&self, element: Element) -> Element {
        let mut element = element;
        if let Some(width) = self.width {
            element = element.style("width", width.to_css());
        }
        if let Some(width) = self.min_width {
            element = element.style("min-width", width.to_css());
        }
        if let Some(width) = self.max_width {
            element = element.style("max-width", width.to_css());
        }
        element
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            align: self.align,
            truncate: self.truncate,
            render: Arc::clone(&self.render),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}
