//! Purchase-frequency chart state: date-range filtering and bucket
//! rendering.

use crate::error::Result;
use crate::format::{day_start_utc, format_date_padded, group_thousands};
use crate::models::{FrequencyParams, PriceRange};

const BAR_WIDTH: u32 = 24;

/// Interaction state of the histogram's date-range filter.
///
/// Both draft endpoints must be set before the filter can be applied;
/// applying normalizes each bare date to its UTC day-start timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrequencyChartState {
    draft_from: String,
    draft_to: String,
    applied: Option<(String, String)>,
}

impl FrequencyChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_draft_from(&mut self, date: impl Into<String>) {
        self.draft_from = date.into();
    }

    pub fn set_draft_to(&mut self, date: impl Into<String>) {
        self.draft_to = date.into();
    }

    pub fn draft_from(&self) -> &str {
        &self.draft_from
    }

    pub fn draft_to(&self) -> &str {
        &self.draft_to
    }

    /// The apply action is enabled only once both endpoints are set.
    pub fn can_apply(&self) -> bool {
        !self.draft_from.is_empty() && !self.draft_to.is_empty()
    }

    /// Apply the drafted range. A no-op while [`can_apply`](Self::can_apply)
    /// is false; fails if a draft is not a valid `YYYY-MM-DD` date.
    pub fn apply(&mut self) -> Result<()> {
        if !self.can_apply() {
            return Ok(());
        }
        let from = day_start_utc(&self.draft_from)?;
        let to = day_start_utc(&self.draft_to)?;
        self.applied = Some((from, to));
        Ok(())
    }

    /// Clear the applied range and both draft fields together.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn applied(&self) -> Option<(&str, &str)> {
        self.applied
            .as_ref()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Request parameters for the current state: both endpoints when a
    /// range is applied, neither otherwise.
    pub fn params(&self) -> FrequencyParams {
        match &self.applied {
            Some((from, to)) => FrequencyParams {
                from: Some(from.clone()),
                to: Some(to.clone()),
            },
            None => FrequencyParams::default(),
        }
    }

    /// Caption for an applied range, e.g.
    /// `"2024년 07월 15일 ~ 2024년 07월 20일 데이터"`.
    pub fn caption(&self) -> Option<String> {
        let (from, to) = self.applied.as_ref()?;
        let from = format_date_padded(from).ok()?;
        let to = format_date_padded(to).ok()?;
        Some(format!("{} ~ {} 데이터", from, to))
    }
}

/// Localize a bucket label: `"0-20000"` (or `"0 - 20000"`) →
/// `"0원 - 20,000원"`. A bound that is not a number passes through as-is.
pub fn bucket_label(range: &str) -> String {
    let mut bounds = range.splitn(2, '-').map(str::trim);
    let min = bounds.next().unwrap_or("");
    let Some(max) = bounds.next() else {
        return range.trim().to_string();
    };
    format!("{} - {}", localize_bound(min), localize_bound(max))
}

fn localize_bound(bound: &str) -> String {
    match bound.parse::<i64>() {
        Ok(n) => format!("{}원", group_thousands(n)),
        Err(_) => bound.to_string(),
    }
}

/// Render the histogram as text rows: localized label, scaled bar, count.
pub fn render_rows(data: &[PriceRange]) -> Vec<String> {
    let max = data.iter().map(|b| b.count).max().unwrap_or(0);
    data.iter()
        .map(|bucket| {
            let bar = if bucket.count == 0 || max == 0 {
                0
            } else {
                (bucket.count * BAR_WIDTH / max).max(1)
            };
            format!(
                "{:<20} {} {}개",
                bucket_label(&bucket.range),
                "#".repeat(bar as usize),
                bucket.count
            )
        })
        .collect()
}
