//! Cross-chunk match deduplication
//!
//! Overlap regions are scanned twice, once by each adjacent window, so
//! the same match can surface in two per-chunk results. Merging keys
//! each match by `(start, text)` within its category and keeps only the
//! first occurrence, preserving first-seen order.

use obscura_core::{CategoryId, DetectionResult};
use std::collections::HashSet;

/// Merge per-chunk detection results into one deduplicated result
pub fn merge(parts: impl IntoIterator<Item = DetectionResult>) -> DetectionResult {
    let mut merged = DetectionResult::new();
    let mut seen: HashSet<(CategoryId, usize, String)> = HashSet::new();

    for part in parts {
        for (category, hits) in part.iter() {
            for m in &hits.matches {
                if seen.insert((category, m.start, m.text.clone())) {
                    merged.record(m.clone());
                }
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use obscura_core::Match;

    #[test]
    fn duplicates_from_overlap_are_dropped() {
        let mut a = DetectionResult::new();
        a.record(Match::new(CategoryId::Email, "a@b.co", 40));

        // Same match rediscovered by the next window
        let mut b = DetectionResult::new();
        b.record(Match::new(CategoryId::Email, "a@b.co", 40));
        b.record(Match::new(CategoryId::Email, "c@d.co", 90));

        let merged = merge([a, b]);
        let hits = merged.hits(CategoryId::Email).unwrap();

        assert_eq!(hits.count, 2);
        assert_eq!(hits.matches[0].start, 40);
        assert_eq!(hits.matches[1].start, 90);
    }

    #[test]
    fn same_text_at_different_offsets_is_kept() {
        let mut a = DetectionResult::new();
        a.record(Match::new(CategoryId::Phone, "555-123-4567", 10));
        a.record(Match::new(CategoryId::Phone, "555-123-4567", 200));

        let merged = merge([a]);
        assert_eq!(merged.hits(CategoryId::Phone).unwrap().count, 2);
    }

    #[test]
    fn categories_are_not_deduplicated_against_each_other() {
        // A span satisfying two categories stays in both
        let mut a = DetectionResult::new();
        a.record(Match::new(CategoryId::ZipCode, "12345", 7));
        a.record(Match::new(CategoryId::Passport, "12345", 7));

        let merged = merge([a]);
        assert_eq!(merged.total(), 2);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge([]).is_empty());
    }
}
