//! Purchase-history modal state.

use crate::format::{format_currency, format_date};
use crate::models::{Customer, CustomerPurchase};

/// Modal over a selected customer's purchase history.
///
/// The modal is active exactly while a customer is selected. Closing it
/// deselects the customer rather than merely hiding the dialog, so the
/// next open derives a fresh gated query from the new selection.
#[derive(Debug, Clone, Default)]
pub struct PurchaseModalState {
    customer: Option<Customer>,
}

impl PurchaseModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a customer (the full record, not just its id) and open the
    /// modal for them.
    pub fn open_for(&mut self, customer: Customer) {
        self.customer = Some(customer);
    }

    /// Close the modal, deselecting the customer.
    pub fn close(&mut self) {
        self.customer = None;
    }

    pub fn is_open(&self) -> bool {
        self.customer.is_some()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Gate parameter for the purchases query: `None` keeps it disabled.
    pub fn customer_id(&self) -> Option<i64> {
        self.customer.as_ref().map(|c| c.id)
    }

    pub fn title(&self) -> Option<String> {
        self.customer
            .as_ref()
            .map(|c| format!("{}님의 구매 내역", c.name))
    }

    pub fn summary(&self) -> Option<String> {
        self.customer.as_ref().map(|c| {
            format!(
                "총 구매 횟수: {}회 | 총 구매 금액: {}",
                c.count,
                format_currency(c.total_amount)
            )
        })
    }
}

/// One history line: product, date, quantity, price.
pub fn purchase_line(purchase: &CustomerPurchase) -> String {
    let date = format_date(&purchase.date).unwrap_or_else(|_| purchase.date.clone());
    format!(
        "{} · {} · 수량: {}개 · {}",
        purchase.product,
        date,
        purchase.quantity,
        format_currency(purchase.price)
    )
}
