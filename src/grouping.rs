//! Split partition and group extraction.

use std::collections::BTreeMap;

use crate::core::{Group, Row, SplitData};

/// Partition rows by `group_id mod modulus`: remainder 0 goes to validation.
///
/// Whole groups move together since the key is the group id, so no group
/// straddles both splits. Row order is preserved within each split.
pub fn split_rows(rows: Vec<Row>, modulus: i64) -> SplitData<Row> {
    let (valid, train): (Vec<Row>, Vec<Row>) = rows
        .into_iter()
        .partition(|row| row.group_id.rem_euclid(modulus) == 0);

    tracing::debug!("Split rows: {} train, {} valid", train.len(), valid.len());

    SplitData::new(train, valid)
}

/// Group rows by `group_id`, ascending by id, texts in source order.
///
/// Groups with fewer than two members are kept; they simply yield no pairs.
pub fn extract_groups(rows: &[Row]) -> Vec<Group> {
    let mut by_id: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for row in rows {
        by_id.entry(row.group_id).or_default().push(row.text.clone());
    }

    by_id
        .into_iter()
        .map(|(id, texts)| Group::new(id, texts))
        .collect()
}
