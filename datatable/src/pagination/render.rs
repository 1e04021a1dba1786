use tabledom::Element;

use super::{PageInfo, PageItem, StickyBounds};

/// Where a pagination bar is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaginationPlacement {
    /// Normal document flow below the table.
    InFlow,
    /// Fixed to the bottom of the viewport, aligned with the container.
    Floating(StickyBounds),
}

/// Render pagination controls.
///
/// Both placements share the same controls; only the wrapper differs.
/// Buttons carry `data-page` with the page they request.
pub fn render_pagination(
    info: &PageInfo,
    page_size_options: Option<&[usize]>,
    id_prefix: &str,
    placement: PaginationPlacement,
) -> Element {
    let controls = render_controls(info, page_size_options);
    match placement {
        PaginationPlacement::InFlow => Element::div()
            .id(format!("{id_prefix}-pagination"))
            .class("pagination")
            .child(controls),
        PaginationPlacement::Floating(bounds) => Element::div()
            .id(format!("{id_prefix}-pagination-floating"))
            .class("pagination pagination-floating")
            .style("position", "fixed")
            .style("bottom", "0")
            .style("left", format!("{}px", bounds.left))
            .style("width", format!("{}px", bounds.width))
            .style("z-index", "40")
            .child(controls),
    }
}

fn render_controls(info: &PageInfo, page_size_options: Option<&[usize]>) -> Element {
    let (start, end) = info.range();

    let summary = Element::text_span(format!(
        "Showing {}\u{2013}{} of {}",
        start, end, info.total_items
    ))
    .class("pagination-summary");

    let mut buttons = Element::div().class("pagination-pages").child(
        Element::button("Previous")
            .class("pagination-prev")
            .aria("label", "Go to previous page")
            .data("page", info.current_page.saturating_sub(1).to_string())
            .disabled(!info.has_previous()),
    );

    for item in info.page_items() {
        buttons = buttons.child(match item {
            PageItem::Page(page) => {
                let current = page == info.current_page;
                Element::button(page.to_string())
                    .class("pagination-page")
                    .class_if(current, "is-current")
                    .attr_if(current, "aria-current", "page")
                    .data("page", page.to_string())
            }
            PageItem::Ellipsis => Element::text_span("\u{2026}")
                .class("pagination-ellipsis")
                .aria("hidden", true),
        });
    }

    buttons = buttons.child(
        Element::button("Next")
            .class("pagination-next")
            .aria("label", "Go to next page")
            .data("page", (info.current_page + 1).to_string())
            .disabled(!info.has_next()),
    );

    let mut nav = Element::new("nav")
        .role("navigation")
        .aria("label", "Pagination")
        .child(summary);
    if let Some(options) = page_size_options {
        nav = nav.child(render_page_size_select(info.page_size, options));
    }
    nav.child(buttons)
}

fn render_page_size_select(current: usize, options: &[usize]) -> Element {
    Element::new("select")
        .class("pagination-size")
        .aria("label", "Rows per page")
        .children(options.iter().map(|&size| {
            Element::new("option")
                .attr("value", size.to_string())
                .attr_if(size == current, "selected", "")
                .text(size.to_string())
        }))
}
