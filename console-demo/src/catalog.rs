//! Sample payments shown by the console.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

const FIXTURE: &str = include_str!("../data/payments.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid payments fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    pub customer: String,
    /// Minor units.
    pub amount: u64,
    pub currency: String,
    pub status: String,
    pub created: DateTime<Utc>,
}

impl Payment {
    pub fn formatted_amount(&self) -> String {
        format!(
            "${}.{:02} {}",
            self.amount / 100,
            self.amount % 100,
            self.currency.to_uppercase()
        )
    }

    pub fn formatted_created(&self) -> String {
        self.created.format("%b %d, %Y %H:%M").to_string()
    }
}

pub fn load() -> Result<Vec<Payment>, CatalogError> {
    Ok(serde_json::from_str(FIXTURE)?)
}

/// One page of `payments`, 1-based.
pub fn page(payments: &[Payment], page: usize, page_size: usize) -> Vec<Payment> {
    payments
        .iter()
        .skip(page.saturating_sub(1) * page_size)
        .take(page_size)
        .cloned()
        .collect()
}
