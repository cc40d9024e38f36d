use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Column holding the skip-traced cell phone number.
pub const CELL_COLUMN: &str = "Cell";

/// Column holding the primary skip-traced email address.
pub const EMAIL_COLUMN: &str = "Email 1";

/// Coverage statistics derived from a merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_leads: usize,
    pub pct_cell: u8,
    pub pct_email: u8,
}

impl SummaryMetrics {
    pub fn pct_cell_display(&self) -> String {
        format!("{}%", self.pct_cell)
    }

    pub fn pct_email_display(&self) -> String {
        format!("{}%", self.pct_email)
    }
}

/// Compute lead count and skip-trace coverage for a merged table.
///
/// Percentages are floored integers. A table with zero rows reports 0% for
/// both, and a missing `Cell` or `Email 1` column counts as zero coverage
/// rather than failing.
pub fn summarize(merged: &Table) -> SummaryMetrics {
    let total_leads = merged.row_count();

    SummaryMetrics {
        total_leads,
        pct_cell: percentage(merged.non_null_count(CELL_COLUMN), total_leads),
        pct_email: percentage(merged.non_null_count(EMAIL_COLUMN), total_leads),
    }
}

fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        0
    } else {
        (count * 100 / total) as u8
    }
}
