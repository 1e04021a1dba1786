//! Table composition: header, body, row, and cell rendering.
//!
//! Every function here is a pure transformation from descriptors and
//! derived state to an [`Element`](tabledom::Element) tree. Interaction is
//! handled by [`DataTable`](crate::DataTable), which resolves targets via
//! the `data-*` attributes written here.

mod action;
mod body;
mod bulk;
mod cell;
mod column;
mod header;
mod row;

pub use action::{
    resolve_row_actions, ActionSource, ActionVariant, BulkAction, RowCallback, TableAction,
    VIEW_DETAILS_KEY,
};
pub use body::{render_body, render_empty, render_skeleton, BodyLayout};
pub use bulk::render_bulk_bar;
pub use cell::render_cell;
pub use column::{Alignment, CellRenderer, Column, Length};
pub use header::{render_header, HeaderContext};
pub use row::{render_row, RowContext};

/// Class toggled on sticky cells while content is hidden beneath them.
pub const STICKY_SHADOW_CLASS: &str = "sticky-shadow";
