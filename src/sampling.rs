//! Cross-group negative sampling.
//!
//! Every pair of group `g` receives one negative drawn from the partner texts
//! of all other groups. The draw for `g` is a simple random sample (no index
//! repeats within `g`), while draws of different groups are independent, so
//! one text may serve as negative in several groups.

use std::collections::HashSet;

use rand::seq::index;
use rand::Rng;

use crate::core::Pair;
use crate::error::{PipelineError, Result};

/// Contiguous run of pairs belonging to one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupSpan {
    group_id: i64,
    start: usize,
    end: usize,
}

impl GroupSpan {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

fn group_spans(pairs: &[Pair]) -> Result<Vec<GroupSpan>> {
    let mut spans: Vec<GroupSpan> = Vec::new();
    let mut seen: HashSet<i64> = HashSet::new();
    for (i, pair) in pairs.iter().enumerate() {
        match spans.last_mut() {
            Some(span) if span.group_id == pair.group_id => span.end = i + 1,
            _ => {
                if !seen.insert(pair.group_id) {
                    return Err(PipelineError::validation(
                        i + 1,
                        format!("pairs of group {} are not contiguous", pair.group_id),
                    ));
                }
                spans.push(GroupSpan {
                    group_id: pair.group_id,
                    start: i,
                    end: i + 1,
                });
            }
        }
    }
    Ok(spans)
}

/// Draw one negative partner text per pair, aligned with `pairs`.
///
/// `pairs` must hold each group's pairs contiguously, as produced by
/// [`crate::pairs::enumerate_all`]. Fails with [`PipelineError::Sampling`]
/// when a group has more pairs than there are other-group texts.
pub fn sample_negatives<R: Rng + ?Sized>(pairs: &[Pair], rng: &mut R) -> Result<Vec<String>> {
    let spans = group_spans(pairs)?;
    let total = pairs.len();
    let mut negatives: Vec<String> = Vec::with_capacity(total);

    for span in &spans {
        let requested = span.len();
        let available = total - requested;
        if requested > available {
            return Err(PipelineError::Sampling {
                group_id: span.group_id,
                requested,
                available,
            });
        }

        // Indices into the pool with this group's span cut out
        for k in index::sample(rng, available, requested) {
            let source = if k < span.start { k } else { k + requested };
            negatives.push(pairs[source].partner.clone());
        }
    }

    tracing::debug!(
        "Sampled {} negatives across {} groups",
        negatives.len(),
        spans.len()
    );

    Ok(negatives)
}
