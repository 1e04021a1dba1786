use tabledom::Element;

use super::action::TableAction;
use super::cell::render_cell;
use super::column::Column;
use super::STICKY_SHADOW_CLASS;

/// Per-row render inputs.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// Position on the current page.
    pub index: usize,
    pub id: &'a str,
    /// The table shows selection checkboxes.
    pub selection_enabled: bool,
    pub selected: bool,
    /// The row passes the eligibility gate.
    pub selectable: bool,
    pub active: bool,
    pub hovered: bool,
    pub clickable: bool,
    pub show_shadow: bool,
    pub has_hover_actions: bool,
    pub has_actions: bool,
}

/// Render one body row.
///
/// Layout: optional checkbox, one cell per column, optional hover overlay,
/// optional sticky action dropdown.
pub fn render_row<T>(
    item: &T,
    columns: &[Column<T>],
    ctx: &RowContext<'_>,
    actions: &[TableAction<T>],
    hover_actions: &[TableAction<T>],
) -> Element {
    let mut row = Element::new("tr")
        .role("row")
        .class("table-row")
        .class_if(ctx.active, "is-active")
        .class_if(ctx.selected, "is-selected")
        .class_if(ctx.clickable, "is-clickable")
        .aria("rowindex", ctx.index + 2)
        .attr_if(ctx.clickable, "tabindex", "0")
        .data("row-id", ctx.id)
        .data("row-index", ctx.index.to_string());
    if ctx.selection_enabled {
        row = row.aria("selected", ctx.selected);
    }
    if ctx.active {
        row = row.aria("current", "true");
    }

    if ctx.selection_enabled {
        row = row.child(render_checkbox_cell(ctx));
    }

    for column in columns {
        row = row.child(render_cell(column, item, ctx.index, ctx.selected, ctx.active));
    }

    if ctx.has_hover_actions {
        row = row.child(render_hover_cell(item, ctx, hover_actions));
    }

    if ctx.has_actions {
        row = row.child(render_action_cell(item, ctx, actions));
    }

    row
}

fn render_checkbox_cell(ctx: &RowContext<'_>) -> Element {
    let checkbox = Element::new("input")
        .attr("type", "checkbox")
        .class("select-row")
        .class_if(!ctx.selectable, "checkbox-ineligible")
        .aria("label", "Select row")
        .aria("checked", ctx.selected)
        .attr_if(ctx.selected, "checked", "")
        .data("action", "toggle-row")
        .disabled(!ctx.selectable);

    Element::new("td")
        .role("gridcell")
        .class("select-cell")
        .class_if(!ctx.selectable, "cursor-not-allowed opacity-50")
        .child(checkbox)
}

fn action_button<T>(item: &T, action: &TableAction<T>, role: Option<&str>) -> Element {
    let mut button = Element::button(action.label.clone())
        .class(action.variant.class())
        .data("action-key", action.key.clone())
        .disabled(action.is_disabled(item));
    if let Some(icon) = &action.icon {
        button = button.data("icon", icon.clone());
    }
    if let Some(role) = role {
        button = button.role(role);
    }
    button
}

fn render_hover_cell<T>(item: &T, ctx: &RowContext<'_>, actions: &[TableAction<T>]) -> Element {
    Element::new("td")
        .role("gridcell")
        .class("hover-actions")
        .class_if(ctx.hovered, "is-visible")
        .aria("hidden", !ctx.hovered)
        .children(actions.iter().map(|action| action_button(item, action, None)))
}

fn render_action_cell<T>(item: &T, ctx: &RowContext<'_>, actions: &[TableAction<T>]) -> Element {
    let mut cell = Element::new("td")
        .role("gridcell")
        .class("sticky-actions")
        .class_if(ctx.show_shadow, STICKY_SHADOW_CLASS)
        .class_if(ctx.selected && !ctx.active, "bg-selected")
        .class_if(ctx.active, "bg-active");

    if !actions.is_empty() {
        cell = cell
            .child(
                Element::button("\u{22ef}")
                    .class("actions-trigger")
                    .aria("label", "Open actions menu")
                    .aria("haspopup", "menu"),
            )
            .child(
                Element::div()
                    .role("menu")
                    .class("actions-menu")
                    .children(
                        actions
                            .iter()
                            .map(|action| action_button(item, action, Some("menuitem"))),
                    ),
            );
    }
    cell
}
