//! Boundary-safe document chunking
//!
//! Splits oversized documents into overlapping windows so per-pass
//! rule cost stays bounded. The overlap guarantees any match shorter
//! than the overlap width is fully contained in at least one window;
//! duplicates from the overlap region are dropped by the deduplicator.

use obscura_core::Chunk;

/// Largest char-boundary offset not exceeding `at`
pub(crate) fn floor_char_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while at > 0 && !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

/// Smallest char-boundary offset not below `at`
pub(crate) fn ceil_char_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while at < text.len() && !text.is_char_boundary(at) {
        at += 1;
    }
    at
}

/// Split `text` into overlapping windows of at most `window` bytes
///
/// Windows advance by `window - overlap`; the final window is truncated
/// to the document end. Cut points are snapped down to UTF-8 character
/// boundaries, so a window may be a few bytes short of `window`.
pub fn split(text: &str, window: usize, overlap: usize) -> Vec<Chunk<'_>> {
    assert!(window > overlap, "window must exceed overlap");

    let step = window - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let end = floor_char_boundary(text, start + window);
        chunks.push(Chunk {
            text: &text[start..end],
            origin: start,
        });
        if end == text.len() {
            break;
        }
        let next = floor_char_boundary(text, start + step);
        // A step smaller than one wide char could snap back to `start`
        start = if next > start {
            next
        } else {
            ceil_char_boundary(text, start + step)
        };
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split("hello world", 100, 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].origin, 0);
    }

    #[test]
    fn windows_advance_by_step_and_overlap() {
        let text = "abcdefghij".repeat(10); // 100 bytes
        let chunks = split(&text, 40, 10);

        assert_eq!(chunks[0].origin, 0);
        assert_eq!(chunks[0].text.len(), 40);
        assert_eq!(chunks[1].origin, 30);
        assert_eq!(chunks[2].origin, 60);

        // Final window truncated to the document end
        let last = chunks.last().unwrap();
        assert_eq!(last.origin + last.text.len(), text.len());
    }

    #[test]
    fn origin_converts_local_offsets_to_global() {
        let text = "x".repeat(95) + "needle";
        let chunks = split(&text, 60, 20);

        for chunk in &chunks {
            if let Some(local) = chunk.text.find("needle") {
                assert_eq!(chunk.origin + local, 95);
            }
        }
    }

    #[test]
    fn cuts_snap_to_char_boundaries() {
        // 2-byte chars; window 7 would land mid-char
        let text = "éééééééééé"; // 20 bytes
        let chunks = split(text, 7, 2);

        for chunk in &chunks {
            assert!(!chunk.text.is_empty());
            assert!(chunk.text.chars().all(|c| c == 'é'));
        }
        // Coverage reaches the end of the document
        let last = chunks.last().unwrap();
        assert_eq!(last.origin + last.text.len(), text.len());
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split("", 10, 2).is_empty());
    }
}
