use crate::error::{LeadMergeError, Result};
use crate::table::Table;

/// The composite key both tables are joined on, in marketing-list naming.
pub const JOIN_KEYS: [&str; 6] = [
    "Owner 1 First Name",
    "Owner 1 Last Name",
    "Mailing Address",
    "Mailing City",
    "Mailing State",
    "Mailing Zip",
];

/// Contact columns irrelevant to the join (the property address, not the
/// mailing address) that are dropped before merging.
const DROPPED_COLUMNS: [&str; 4] = ["Street Address", "City", "State", "Zip"];

/// Fixed rename mapping from skip-tracing naming to marketing-list naming.
const RENAMES: [(&str, &str); 6] = [
    ("First Name", "Owner 1 First Name"),
    ("Last Name", "Owner 1 Last Name"),
    ("Mail Street Address", "Mailing Address"),
    ("Mail City", "Mailing City"),
    ("Mail State", "Mailing State"),
    ("Mail Zip", "Mailing Zip"),
];

/// Columns a skip-tracing contacts export must carry.
const CONTACT_REQUIRED: [&str; 10] = [
    "First Name",
    "Last Name",
    "Street Address",
    "City",
    "State",
    "Zip",
    "Mail Street Address",
    "Mail City",
    "Mail State",
    "Mail Zip",
];

/// Verify a marketing table carries all six join-key columns.
pub fn ensure_join_keys(marketing: &Table, file: &str) -> Result<()> {
    let missing = marketing.missing_columns(&JOIN_KEYS);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LeadMergeError::SchemaMismatch {
            file: file.to_string(),
            missing_columns: missing,
        })
    }
}

/// Projects and renames a skip-tracing contacts table into marketing-list
/// naming so the two sides share a key.
pub struct ContactNormalizer;

impl ContactNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Drop the four property-address columns and rename the six identity
    /// columns. Fails with `SchemaMismatch` naming every absent required
    /// column. All other columns (Cell, Email 1, skip-trace attributes) pass
    /// through untouched.
    pub fn normalize(&self, contacts: Table, file: &str) -> Result<Table> {
        let missing = contacts.missing_columns(&CONTACT_REQUIRED);
        if !missing.is_empty() {
            return Err(LeadMergeError::SchemaMismatch {
                file: file.to_string(),
                missing_columns: missing,
            });
        }

        let kept: Vec<usize> = (0..contacts.column_count())
            .filter(|&i| !DROPPED_COLUMNS.contains(&contacts.columns()[i].as_str()))
            .collect();

        let columns = kept
            .iter()
            .map(|&i| rename_column(&contacts.columns()[i]))
            .collect();

        let mut normalized = Table::new(columns);
        for row in contacts.rows() {
            normalized.push_row(kept.iter().map(|&i| row[i].clone()).collect());
        }

        Ok(normalized)
    }
}

impl Default for ContactNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn rename_column(name: &str) -> String {
    RENAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| name.to_string())
}
