use tabledom::Element;

use super::column::Column;

/// Render one data cell. Content comes entirely from the column.
pub fn render_cell<T>(
    column: &Column<T>,
    item: &T,
    index: usize,
    selected: bool,
    active: bool,
) -> Element {
    let cell = Element::new("td")
        .role("gridcell")
        .class("table-cell")
        .class(column.align.class())
        .class_if(column.truncate, "truncate")
        .class_if(active, "bg-active")
        .class_if(selected && !active, "bg-selected")
        .data("column", column.key.clone())
        .child(column.render(item, index));
    column.size(cell)
}
