//! Customer list interaction state: three-way sort cycle, draft vs applied
//! search, reset.

use crate::format::format_currency;
use crate::models::{Customer, CustomersParams, SortOrder};

/// Interaction state of the searchable, sortable customer list.
///
/// The search box holds a *draft* that only becomes the *applied* filter on
/// an explicit submit (button or Enter); typing alone never changes the
/// derived request parameters.
#[derive(Debug, Clone, Default)]
pub struct CustomerListState {
    sort: Option<SortOrder>,
    draft: String,
    applied: String,
}

impl CustomerListState {
    pub fn new() -> Self {
        Self::default()
    }

    // -- sorting -----------------------------------------------------------

    /// Advance the sort toggle: unset → descending → ascending → unset.
    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            None => Some(SortOrder::Desc),
            Some(SortOrder::Desc) => Some(SortOrder::Asc),
            Some(SortOrder::Asc) => None,
        };
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn sort_label(&self) -> &'static str {
        match self.sort {
            None => "정렬",
            Some(SortOrder::Desc) => "내림차순",
            Some(SortOrder::Asc) => "오름차순",
        }
    }

    // -- search ------------------------------------------------------------

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Commit the draft as the applied search filter.
    pub fn submit_search(&mut self) {
        self.applied = self.draft.clone();
    }

    /// The filter actually in effect, if any.
    pub fn applied_search(&self) -> Option<&str> {
        if self.applied.is_empty() {
            None
        } else {
            Some(&self.applied)
        }
    }

    /// Clear draft, applied filter, and sort in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -- derived request ---------------------------------------------------

    /// Request parameters for the current state. An empty applied search
    /// is omitted entirely rather than sent as an empty string.
    pub fn params(&self) -> CustomersParams {
        CustomersParams {
            sort_by: self.sort,
            name: self.applied_search().map(str::to_string),
        }
    }
}

/// One table row: id, name, purchase count, formatted total.
pub fn row_line(customer: &Customer) -> String {
    format!(
        "{:>4}  {}  {}회  {}",
        customer.id,
        customer.name,
        customer.count,
        format_currency(customer.total_amount)
    )
}
