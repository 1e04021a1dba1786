//! The payments list page: host state and the table inputs derived from it.

use std::fmt;
use std::sync::{Arc, Mutex};

use datatable::pagination::{PageInfo, Pagination};
use datatable::prelude::*;

use crate::catalog::{self, Payment};

pub type SharedState = Arc<Mutex<ConsoleState>>;

/// Page state owned by the console. The table only reports changes.
#[derive(Default)]
pub struct ConsoleState {
    pub page: usize,
    pub page_size: usize,
    pub selected: Vec<String>,
    pub active: Option<String>,
    /// Registered by the table for the "Select succeeded" button.
    pub select_succeeded: Option<SelectTrigger>,
    pub events: Vec<String>,
}

impl ConsoleState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            ..Self::default()
        }
    }

    fn record(&mut self, event: String) {
        log::info!("console: {}", event);
        self.events.push(event);
    }
}

impl fmt::Debug for ConsoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleState")
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("selected", &self.selected)
            .field("active", &self.active)
            .field("events", &self.events.len())
            .finish()
    }
}

fn with_state(state: &SharedState, f: impl FnOnce(&mut ConsoleState)) {
    if let Ok(mut state) = state.lock() {
        f(&mut state);
    }
}

pub fn columns() -> Vec<Column<Payment>> {
    vec![
        Column::new("id", "Payment", |p: &Payment, _| {
            Element::text_span(p.id.clone()).class("font-mono")
        })
        .width(Length::Px(140.0)),
        Column::new("customer", "Customer", |p: &Payment, _| {
            Element::text_span(p.customer.clone())
        })
        .min_width(Length::Px(180.0)),
        Column::new("amount", "Amount", |p: &Payment, _| {
            Element::text_span(p.formatted_amount())
        })
        .align(Alignment::Right)
        .no_truncate(),
        Column::new("status", "Status", |p: &Payment, _| {
            Element::span()
                .class("badge")
                .class(format!("badge-{}", p.status))
                .text(p.status.clone())
        }),
        Column::new("created", "Created", |p: &Payment, _| {
            Element::text_span(p.formatted_created())
        })
        .width(Length::Percent(15.0)),
    ]
}

fn row_actions(state: &SharedState) -> ActionSource<Payment> {
    let refunds = state.clone();
    let copies = state.clone();
    ActionSource::per_item(move |_: &Payment| {
        let refunds = refunds.clone();
        let copies = copies.clone();
        vec![
            TableAction::new("copy-id", "Copy ID", move |p: &Payment| {
                with_state(&copies, |s| s.record(format!("copied {}", p.id)))
            })
            .icon("copy"),
            TableAction::new("refund", "Refund payment", move |p: &Payment| {
                with_state(&refunds, |s| s.record(format!("refund requested for {}", p.id)))
            })
            .icon("rotate-ccw")
            .variant(ActionVariant::Destructive)
            .condition(|p: &Payment| p.status != "failed")
            .disabled_when(|p: &Payment| p.status != "succeeded"),
        ]
    })
}

fn hover_actions(state: &SharedState) -> ActionSource<Payment> {
    let state = state.clone();
    ActionSource::fixed(vec![
        TableAction::new("open-customer", "Open customer", move |p: &Payment| {
            with_state(&state, |s| s.record(format!("opened customer {}", p.customer)))
        })
        .icon("user"),
    ])
}

fn bulk_actions(payments: &[Payment], state: &SharedState) -> Vec<BulkAction> {
    let refundable: Vec<String> = payments
        .iter()
        .filter(|p| p.status == "succeeded")
        .map(|p| p.id.clone())
        .collect();
    let exports = state.clone();
    let refunds = state.clone();
    vec![
        BulkAction::new("export", "Export CSV", move |ids: &[String]| {
            with_state(&exports, |s| s.record(format!("exported {} payment(s)", ids.len())))
        })
        .icon("download"),
        BulkAction::new("refund", "Refund", move |ids: &[String]| {
            with_state(&refunds, |s| s.record(format!("bulk refund of {} payment(s)", ids.len())))
        })
        .variant(ActionVariant::Destructive)
        .disabled_when(move |ids: &[String]| ids.iter().any(|id| !refundable.contains(id))),
    ]
}

/// Table inputs for the current state.
pub fn props(payments: &[Payment], state: &SharedState) -> TableProps<Payment> {
    let (page, page_size, selected, active) = match state.lock() {
        Ok(s) => (s.page, s.page_size, s.selected.clone(), s.active.clone()),
        Err(_) => (1, 20, Vec::new(), None),
    };

    let on_page = state.clone();
    let on_size = state.clone();
    let pagination = Pagination::new(
        PageInfo::new(page, payments.len(), page_size),
        Arc::new(move |page: usize| {
            with_state(&on_page, |s| {
                s.page = page;
                s.record(format!("page {page}"));
            })
        }),
    )
    .with_page_size_change(Arc::new(move |size: usize| {
        with_state(&on_size, |s| {
            s.page_size = size;
            s.page = 1;
            s.record(format!("page size {size}"));
        })
    }));

    let on_select = state.clone();
    let on_click = state.clone();
    let on_trigger = state.clone();
    let in_flight: Vec<String> = payments
        .iter()
        .filter(|p| p.status == "pending")
        .map(|p| p.id.clone())
        .collect();

    TableProps::new(columns(), |p: &Payment| p.id.clone())
        .data(catalog::page(payments, page, page_size))
        .selected_items(selected)
        .on_selection_change(move |ids| {
            with_state(&on_select, |s| {
                s.record(format!("{} selected", ids.len()));
                s.selected = ids;
            })
        })
        .on_row_click(move |p: &Payment| {
            with_state(&on_click, |s| {
                s.active = Some(p.id.clone());
                s.record(format!("opened {}", p.id));
            })
        })
        .row_actions(row_actions(state))
        .hover_actions(hover_actions(state))
        .bulk_actions(bulk_actions(payments, state))
        .pagination(pagination)
        .unavailable_items(in_flight)
        .status_gate(|p: &Payment| p.status.clone(), vec!["succeeded".to_string()])
        .on_select_succeeded_only(move |trigger| {
            with_state(&on_trigger, |s| s.select_succeeded = Some(trigger))
        })
        .active_item_id(active)
        .empty_message("No payments match these filters.")
        .aria_label("Payments")
}
