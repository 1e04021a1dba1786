use tabledom::Element;

use super::action::BulkAction;

/// Toolbar shown while rows are selected.
pub fn render_bulk_bar(selected: &[String], actions: &[BulkAction]) -> Element {
    Element::div()
        .role("toolbar")
        .class("bulk-actions")
        .aria("label", "Bulk actions")
        .child(Element::text_span(format!("{} selected", selected.len())).class("bulk-count"))
        .child(
            Element::button("Clear selection")
                .class("bulk-clear")
                .data("action", "clear-selection"),
        )
        .children(actions.iter().map(|action| {
            let mut button = Element::button(action.label.clone())
                .class(action.variant.class())
                .data("bulk-key", action.key.clone())
                .disabled(action.is_disabled(selected));
            if let Some(icon) = &action.icon {
                button = button.data("icon", icon.clone());
            }
            button
        }))
}
