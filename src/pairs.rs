//! Ordered within-group pair enumeration.

use crate::core::{Group, Pair};

/// All 2-permutations of a group's members, in permutation order:
/// anchor index outer, partner index inner, skipping the diagonal.
pub fn enumerate_pairs(group: &Group) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(group.pair_count());
    for (i, anchor) in group.texts.iter().enumerate() {
        for (j, partner) in group.texts.iter().enumerate() {
            if i != j {
                pairs.push(Pair::new(group.id, anchor.as_str(), partner.as_str()));
            }
        }
    }
    pairs
}

/// Pairs of every group, concatenated in group order.
///
/// Pairs of one group are contiguous in the output.
pub fn enumerate_all(groups: &[Group]) -> Vec<Pair> {
    let total: usize = groups.iter().map(Group::pair_count).sum();
    let mut pairs = Vec::with_capacity(total);
    for group in groups {
        pairs.extend(enumerate_pairs(group));
    }
    pairs
}
