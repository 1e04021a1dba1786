use tabledom::Element;

use super::column::Column;

/// Which optional columns surround the data columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyLayout {
    pub selectable: bool,
    pub has_hover_actions: bool,
    pub has_actions: bool,
}

impl BodyLayout {
    /// Total rendered columns for `data_columns` data columns.
    pub fn column_count(&self, data_columns: usize) -> usize {
        data_columns
            + usize::from(self.selectable)
            + usize::from(self.has_hover_actions)
            + usize::from(self.has_actions)
    }
}

pub fn render_body(rows: Vec<Element>) -> Element {
    Element::new("tbody").children(rows)
}

/// Placeholder rows with the same shape as real ones.
pub fn render_skeleton<T>(columns: &[Column<T>], layout: &BodyLayout, rows: usize) -> Element {
    let bar = || Element::div().class("skeleton animate-pulse");

    let row = |index: usize| {
        let mut row = Element::new("tr")
            .role("row")
            .class("skeleton-row")
            .aria("rowindex", index + 2);
        if layout.selectable {
            row = row.child(Element::new("td").role("gridcell").class("select-cell").child(bar()));
        }
        for column in columns {
            let cell = Element::new("td")
                .role("gridcell")
                .class(column.align.class())
                .child(bar());
            row = row.child(column.size(cell));
        }
        if layout.has_hover_actions {
            row = row.child(Element::new("td").role("gridcell").class("hover-actions"));
        }
        if layout.has_actions {
            row = row.child(
                Element::new("td")
                    .role("gridcell")
                    .class("sticky-actions")
                    .child(bar()),
            );
        }
        row
    };

    Element::new("tbody")
        .aria("hidden", true)
        .children((0..rows).map(row))
}

/// Single full-width row with the empty-state message.
pub fn render_empty(column_count: usize, message: &str) -> Element {
    Element::new("tbody").child(
        Element::new("tr").role("row").aria("rowindex", 2).child(
            Element::new("td")
                .role("gridcell")
                .class("empty-state")
                .attr("colspan", column_count.to_string())
                .child(Element::text_span(message)),
        ),
    )
}
