pub mod joiner;
pub mod normalizer;
pub mod summary;

pub use joiner::left_join;
pub use normalizer::{ContactNormalizer, JOIN_KEYS};
pub use summary::{summarize, SummaryMetrics};

use crate::error::Result;
use crate::table::Table;

/// Run the full merge pipeline on two already-parsed tables: normalize the
/// contacts table, left-join marketing against it, and compute coverage
/// metrics. Pure; no IO.
pub fn merge_tables(marketing: &Table, contacts: Table) -> Result<(Table, SummaryMetrics)> {
    normalizer::ensure_join_keys(marketing, "marketing list")?;
    let contacts = ContactNormalizer::new().normalize(contacts, "contacts list")?;
    let merged = left_join(marketing, &contacts);
    let metrics = summarize(&merged);
    Ok((merged, metrics))
}
