use tabledom::Element;

use crate::selection::SelectionState;

use super::column::Column;
use super::STICKY_SHADOW_CLASS;

/// Inputs for the header row beyond the columns themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderContext {
    /// Render the leading select-all checkbox.
    pub selectable: bool,
    pub selection: SelectionState,
    /// No row on the page can be selected.
    pub select_all_disabled: bool,
    pub has_hover_actions: bool,
    pub has_actions: bool,
    pub show_shadow: bool,
}

pub fn render_header<T>(columns: &[Column<T>], ctx: &HeaderContext) -> Element {
    let mut row = Element::new("tr").role("row").aria("rowindex", 1);

    if ctx.selectable {
        let checkbox = Element::new("input")
            .attr("type", "checkbox")
            .class("select-all")
            .aria("label", "Select all rows")
            .aria("checked", ctx.selection.aria_checked())
            .attr_if(ctx.selection.is_all_selected, "checked", "")
            .data("action", "toggle-all")
            .data("state", checkbox_state(&ctx.selection))
            .disabled(ctx.select_all_disabled);
        row = row.child(
            Element::new("th")
                .role("columnheader")
                .class("select-cell")
                .child(checkbox),
        );
    }

    for column in columns {
        let cell = Element::new("th")
            .role("columnheader")
            .attr("scope", "col")
            .class("table-header-cell")
            .class(column.align.class())
            .data("column", column.key.clone())
            .child(column.header.clone());
        row = row.child(column.size(cell));
    }

    if ctx.has_hover_actions {
        row = row.child(
            Element::new("th")
                .role("columnheader")
                .class("hover-actions-header")
                .child(Element::text_span("Quick actions").class("sr-only")),
        );
    }

    if ctx.has_actions {
        row = row.child(
            Element::new("th")
                .role("columnheader")
                .class("sticky-actions")
                .class_if(ctx.show_shadow, STICKY_SHADOW_CLASS)
                .child(Element::text_span("Actions").class("sr-only")),
        );
    }

    Element::new("thead").child(row)
}

fn checkbox_state(selection: &SelectionState) -> &'static str {
    if selection.is_all_selected {
        "checked"
    } else if selection.is_indeterminate {
        "indeterminate"
    } else {
        "unchecked"
    }
}
