use crate::merge::normalizer::JOIN_KEYS;
use crate::table::Table;
use std::collections::HashMap;

/// Left outer join of `marketing` against a normalized contacts table on the
/// six-column composite key.
///
/// Key comparison is exact and case-sensitive on the stored text. A null in
/// any key field on either side means the row never matches; two nulls are
/// not equal. Duplicate keys on the contacts side fan out, one output row per
/// match, so the output has at least as many rows as `marketing`.
///
/// Output columns are all marketing columns in order (the key columns stay in
/// their marketing positions), followed by every non-key contacts column.
/// Rows without a match carry nulls in every contact-derived column.
///
/// Both tables are expected to carry their key columns; callers validate the
/// schemas first.
pub fn left_join(marketing: &Table, contacts: &Table) -> Table {
    let marketing_keys: Vec<usize> = JOIN_KEYS
        .iter()
        .filter_map(|k| marketing.column_index(k))
        .collect();
    let contact_keys: Vec<usize> = JOIN_KEYS
        .iter()
        .filter_map(|k| contacts.column_index(k))
        .collect();

    // Contact columns the join carries over: everything except the key.
    let carried: Vec<usize> = (0..contacts.column_count())
        .filter(|i| !contact_keys.contains(i))
        .collect();

    let mut columns: Vec<String> = marketing.columns().to_vec();
    columns.extend(carried.iter().map(|&i| contacts.columns()[i].clone()));

    // Index contacts rows by key. Rows with a null key field are unmatchable
    // and stay out of the index.
    let mut index: HashMap<Vec<&str>, Vec<usize>> = HashMap::new();
    for (row_index, row) in contacts.rows().iter().enumerate() {
        if let Some(key) = row_key(row, &contact_keys) {
            index.entry(key).or_default().push(row_index);
        }
    }

    let mut merged = Table::new(columns);
    for row in marketing.rows() {
        let matches = row_key(row, &marketing_keys)
            .and_then(|key| index.get(&key))
            .map(|rows| rows.as_slice())
            .unwrap_or(&[]);

        if matches.is_empty() {
            let mut out = row.clone();
            out.extend(std::iter::repeat(None).take(carried.len()));
            merged.push_row(out);
        } else {
            for &contact_row in matches {
                let mut out = row.clone();
                out.extend(
                    carried
                        .iter()
                        .map(|&i| contacts.rows()[contact_row][i].clone()),
                );
                merged.push_row(out);
            }
        }
    }

    merged
}

/// The key values of a row, or `None` if any key field is null.
fn row_key<'a>(row: &'a [Option<String>], key_indices: &[usize]) -> Option<Vec<&'a str>> {
    key_indices
        .iter()
        .map(|&i| row.get(i).and_then(|cell| cell.as_deref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_row(first: &str, zip: &str) -> Vec<Option<String>> {
        vec![
            Some(first.to_string()),
            Some("Doe".to_string()),
            Some("1 Main St".to_string()),
            Some("Springfield".to_string()),
            Some("IL".to_string()),
            Some(zip.to_string()),
        ]
    }

    fn marketing_table(rows: Vec<Vec<Option<String>>>) -> Table {
        let mut columns: Vec<String> = JOIN_KEYS.iter().map(|k| k.to_string()).collect();
        columns.push("APN".to_string());
        let mut table = Table::new(columns);
        for mut row in rows {
            row.push(Some("123-456".to_string()));
            table.push_row(row);
        }
        table
    }

    fn contacts_table(rows: Vec<(Vec<Option<String>>, Option<&str>)>) -> Table {
        let mut columns: Vec<String> = JOIN_KEYS.iter().map(|k| k.to_string()).collect();
        columns.push("Cell".to_string());
        let mut table = Table::new(columns);
        for (mut row, cell) in rows {
            row.push(cell.map(|c| c.to_string()));
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_row_preservation_without_fanout() {
        let marketing = marketing_table(vec![key_row("Jane", "62704"), key_row("John", "62704")]);
        let contacts = contacts_table(vec![(key_row("Jane", "62704"), Some("555-1234"))]);

        let merged = left_join(&marketing, &contacts);

        assert_eq!(merged.row_count(), marketing.row_count());
        assert_eq!(merged.value(0, "Cell"), Some("555-1234"));
        assert_eq!(merged.value(1, "Cell"), None);
    }

    #[test]
    fn test_duplicate_contact_keys_fan_out() {
        let marketing = marketing_table(vec![key_row("Jane", "62704")]);
        let contacts = contacts_table(vec![
            (key_row("Jane", "62704"), Some("555-1111")),
            (key_row("Jane", "62704"), Some("555-2222")),
        ]);

        let merged = left_join(&marketing, &contacts);

        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.value(0, "Cell"), Some("555-1111"));
        assert_eq!(merged.value(1, "Cell"), Some("555-2222"));
        // Marketing columns are duplicated onto both fan-out rows.
        assert_eq!(merged.value(0, "APN"), Some("123-456"));
        assert_eq!(merged.value(1, "APN"), Some("123-456"));
    }

    #[test]
    fn test_join_is_case_sensitive() {
        let marketing = marketing_table(vec![key_row("Jane", "62704")]);
        let contacts = contacts_table(vec![(key_row("JANE", "62704"), Some("555-1234"))]);

        let merged = left_join(&marketing, &contacts);

        assert_eq!(merged.row_count(), 1);
        assert_eq!(merged.value(0, "Cell"), None);
    }

    #[test]
    fn test_null_key_never_matches_null_key() {
        let mut null_key = key_row("Jane", "62704");
        null_key[2] = None; // Mailing Address

        let marketing = marketing_table(vec![null_key.clone()]);
        let contacts = contacts_table(vec![(null_key, Some("555-1234"))]);

        let merged = left_join(&marketing, &contacts);

        assert_eq!(merged.row_count(), 1);
        assert_eq!(merged.value(0, "Cell"), None);
    }

    #[test]
    fn test_column_order_marketing_first() {
        let marketing = marketing_table(vec![key_row("Jane", "62704")]);
        let contacts = contacts_table(vec![(key_row("Jane", "62704"), Some("555-1234"))]);

        let merged = left_join(&marketing, &contacts);

        let mut expected: Vec<String> = JOIN_KEYS.iter().map(|k| k.to_string()).collect();
        expected.push("APN".to_string());
        expected.push("Cell".to_string());
        assert_eq!(merged.columns(), expected.as_slice());
    }

    #[test]
    fn test_empty_marketing_table() {
        let marketing = marketing_table(vec![]);
        let contacts = contacts_table(vec![(key_row("Jane", "62704"), Some("555-1234"))]);

        let merged = left_join(&marketing, &contacts);
        assert!(merged.is_empty());
        assert_eq!(merged.column_count(), 8);
    }
}
