//! Priority-ordered multi-category detection

use crate::chunker::{ceil_char_boundary, floor_char_boundary};
use crate::registry::CategoryRegistry;
use crate::validators;
use obscura_core::{CategoryId, DetectionResult, Match};
use std::collections::HashSet;
use tracing::debug;

/// Bytes of context inspected on each side of a candidate by the
/// structural-noise filter
const CONTEXT_WINDOW: usize = 10;

/// Runs every category rule over a text span in priority order,
/// applying the structural-noise, context and checksum filters to each
/// candidate. Categories are independent detectors: overlap between
/// matches of different categories is preserved, never resolved.
#[derive(Debug, Clone, Copy)]
pub struct Detector<'r> {
    registry: &'r CategoryRegistry,
}

impl<'r> Detector<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self { registry }
    }

    /// Detect matches in `text`, restricted to `enabled` when given
    pub fn detect(&self, text: &str, enabled: Option<&HashSet<CategoryId>>) -> DetectionResult {
        self.detect_at(text, 0, enabled)
    }

    /// Detect matches in a span whose first byte sits at document
    /// offset `origin`; recorded offsets are document-global
    pub fn detect_at(
        &self,
        text: &str,
        origin: usize,
        enabled: Option<&HashSet<CategoryId>>,
    ) -> DetectionResult {
        let mut result = DetectionResult::new();

        for category in self.registry.categories() {
            if let Some(set) = enabled {
                if !set.contains(&category.id) {
                    continue;
                }
            }

            for found in category.pattern.find_iter(text) {
                let candidate = found.as_str();

                if self.is_structural_noise(text, found.start(), found.end(), candidate) {
                    debug!(
                        category = %category.id,
                        candidate,
                        "suppressed structural field name"
                    );
                    continue;
                }

                if category.context_sensitive && validators::is_common_term(candidate) {
                    debug!(category = %category.id, candidate, "suppressed common term");
                    continue;
                }

                if !category.validator.accepts(candidate) {
                    debug!(category = %category.id, candidate, "checksum rejected");
                    continue;
                }

                result.record(Match::new(category.id, candidate, origin + found.start()));
            }
        }

        result
    }

    fn is_structural_noise(&self, text: &str, start: usize, end: usize, candidate: &str) -> bool {
        let before_from = floor_char_boundary(text, start.saturating_sub(CONTEXT_WINDOW));
        let after_to = ceil_char_boundary(text, end + CONTEXT_WINDOW);

        validators::is_structural_noise(candidate, &text[before_from..start], &text[end..after_to])
    }
}
