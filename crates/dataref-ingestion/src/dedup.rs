//! Collapse the raw matches of one article to one record per identifier.
//!
//! All renditions are deduplicated together, after merging. Deduplicating
//! each rendition first and merging afterwards can keep a weaker PDF mention
//! over a stronger XML one, so there is exactly one pass here.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::RawMatch;
use crate::scoring::score_context;

/// Keep one match per `(article_id, dataset_id)`.
///
/// Within a group the winner has the highest score, then the lowest
/// `start_idx`, then the preferred source (XML before PDF). Groups come out in
/// the order their key was first seen. `pattern_type` is not part of the key.
pub fn deduplicate(matches: Vec<RawMatch>) -> Vec<RawMatch> {
    let mut groups: Vec<Vec<RawMatch>> = Vec::new();
    let mut slots: HashMap<(String, String), usize> = HashMap::new();

    for mut m in matches {
        if m.score.is_none() {
            m.score = Some(score_context(&m.context));
        }
        let key = (m.article_id.clone(), m.dataset_id.clone());
        match slots.get(&key) {
            Some(&slot) => groups[slot].push(m),
            None => {
                slots.insert(key, groups.len());
                groups.push(vec![m]);
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|mut group| {
            group.sort_by(rank);
            group.into_iter().next()
        })
        .collect()
}

/// Ordering where the preferred representative sorts first.
pub fn rank(a: &RawMatch, b: &RawMatch) -> Ordering {
    b.score
        .unwrap_or(0)
        .cmp(&a.score.unwrap_or(0))
        .then_with(|| a.start_idx.cmp(&b.start_idx))
        .then_with(|| a.source.preference_rank().cmp(&b.source.preference_rank()))
}
