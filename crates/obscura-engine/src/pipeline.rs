//! Scan pipeline
//!
//! Entry point tying chunker, detector and deduplicator together.
//! Documents at or under the chunk threshold are scanned in a single
//! pass; larger documents go through the chunk loop with a per-chunk
//! progress hook. Either path yields the same matches.

use crate::chunker;
use crate::dedup;
use crate::detector::Detector;
use crate::registry::CategoryRegistry;
use obscura_core::{DetectionResult, Error, Result};
use std::ops::ControlFlow;
use tracing::debug;

/// Chunking thresholds, in bytes
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Documents larger than this are chunked
    pub chunk_threshold: usize,

    /// Window size for chunked scans
    pub window: usize,

    /// Overlap between adjacent windows; bounds the longest match that
    /// chunking can recover
    pub overlap: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_threshold: 50_000,
            window: 10_000,
            overlap: 500,
        }
    }
}

/// Document scanner over a fixed registry
pub struct Scanner<'r> {
    detector: Detector<'r>,
    config: ScanConfig,
}

impl<'r> Scanner<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self::with_config(registry, ScanConfig::default())
    }

    pub fn with_config(registry: &'r CategoryRegistry, config: ScanConfig) -> Self {
        Self {
            detector: Detector::new(registry),
            config,
        }
    }

    /// Scan a whole document
    pub fn scan(&self, text: &str) -> Result<DetectionResult> {
        self.scan_with_progress(text, |_, _| ControlFlow::Continue(()))
    }

    /// Scan a whole document, reporting progress once per chunk
    ///
    /// `on_chunk` receives a completion percentage (0-100) and a short
    /// message. Returning `ControlFlow::Break` stops the loop; matches
    /// accumulated so far are merged and returned, so a cancelled scan
    /// still yields a valid partial result. Small documents complete in
    /// one pass without invoking the hook.
    pub fn scan_with_progress(
        &self,
        text: &str,
        mut on_chunk: impl FnMut(u8, &str) -> ControlFlow<()>,
    ) -> Result<DetectionResult> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        if text.len() <= self.config.chunk_threshold {
            return Ok(self.detector.detect(text, None));
        }

        let chunks = chunker::split(text, self.config.window, self.config.overlap);
        let total = chunks.len();
        debug!(total, "scanning oversized document in chunks");

        let mut parts = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            let mut part = self.detector.detect_at(chunk.text, chunk.origin, None);

            // A window cut mid-token can match a truncated artifact at
            // either edge. A match touching an interior cut is always
            // fully contained in the adjacent window (it is shorter
            // than the overlap), so drop the edge copy here and let
            // that window report it.
            let first = i == 0;
            let last = i + 1 == total;
            let chunk_end = chunk.origin + chunk.text.len();
            part.retain(|m| {
                (first || m.start > chunk.origin) && (last || m.end() < chunk_end)
            });

            parts.push(part);

            let percent = ((i + 1) * 100 / total) as u8;
            let message = format!("scanned chunk {} of {}", i + 1, total);
            if on_chunk(percent, &message).is_break() {
                debug!(completed = i + 1, total, "scan cancelled");
                break;
            }
        }

        Ok(dedup::merge(parts))
    }
}
