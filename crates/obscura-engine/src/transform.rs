//! Document rewriting
//!
//! Applies the selected redaction method to the validated match set.
//! Replacements are spliced in descending offset order so earlier
//! splices never invalidate the offsets of matches not yet applied;
//! with overlapping cross-category matches this means the outer
//! replacement lands first, which keeps the output well-defined.

use obscura_core::{
    CategoryId, DetectionResult, Error, Match, Method, ProcessingOutcome, Result, SecurityLevel,
};
use obscura_crypto::{Assurance, CryptoProvider};
use std::collections::HashSet;
use tracing::warn;

/// Fixed placeholder for [`Method::Redact`]
pub const REDACTED_TOKEN: &str = "[REDACTED]";

/// Minimum password length for [`Method::Encrypt`]
pub const MIN_PASSWORD_LEN: usize = 8;

/// Characters of a hash/encrypt token kept for display copies
const DISPLAY_TOKEN_LEN: usize = 32;

/// Shorten a token for presentation
///
/// Display copies only: a truncated encryption token loses the salt,
/// nonce and ciphertext needed for decryption, so the full token must
/// be the one that is stored.
pub fn display_token(token: &str) -> &str {
    // Engine tokens are ASCII, but the clamp keeps arbitrary input safe
    let mut end = token.len().min(DISPLAY_TOKEN_LEN);
    while end > 0 && !token.is_char_boundary(end) {
        end -= 1;
    }
    &token[..end]
}

/// Rewrites documents by replacing matches of enabled categories
pub struct Transformer {
    provider: CryptoProvider,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(CryptoProvider::new())
    }
}

impl Transformer {
    pub fn new(provider: CryptoProvider) -> Self {
        Self { provider }
    }

    /// Apply `method` to every match of an enabled category
    ///
    /// `original_count` in the outcome covers all detected matches
    /// regardless of enabled state; `processed_count` counts actual
    /// replacements. An empty enabled set is a no-op, not an error.
    pub fn apply(
        &self,
        document: &str,
        result: &DetectionResult,
        enabled: &HashSet<CategoryId>,
        method: Method,
        password: Option<&str>,
    ) -> Result<ProcessingOutcome> {
        if document.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        if method == Method::Encrypt {
            let password = password.unwrap_or_default();
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(Error::Policy(format!(
                    "encryption requires a password of at least {MIN_PASSWORD_LEN} characters"
                )));
            }
        }

        let mut selected: Vec<&Match> = result
            .iter()
            .filter(|(category, _)| enabled.contains(category))
            .flat_map(|(_, hits)| hits.matches.iter())
            .collect();

        if selected.is_empty() {
            warn!("no matches in enabled categories, document is unchanged");
        }

        selected.sort_by_key(|m| std::cmp::Reverse(m.start));

        let mut text = document.to_string();
        for m in &selected {
            let replacement = self.replacement(m, method, password)?;
            let end = splice_end(&text, m.start, m.end());
            text.replace_range(m.start..end, &replacement);
        }

        Ok(ProcessingOutcome {
            original_count: result.total(),
            processed_count: selected.len(),
            method,
            security_level: self.security_level(method),
            transformed_text: text,
        })
    }

    fn replacement(&self, m: &Match, method: Method, password: Option<&str>) -> Result<String> {
        Ok(match method {
            Method::Mask => "*".repeat(m.text.chars().count()),
            Method::Redact => REDACTED_TOKEN.to_string(),
            Method::Hash => {
                let tag = match self.provider.assurance() {
                    Assurance::Secure => "HASH",
                    Assurance::Demo => "HASH-DEMO",
                };
                format!("[{tag}:{}]", self.provider.digest(&m.text))
            }
            Method::Encrypt => {
                let tag = match self.provider.assurance() {
                    Assurance::Secure => "ENC",
                    Assurance::Demo => "ENC-DEMO",
                };
                let payload = self
                    .provider
                    .encrypt(&m.text, password.unwrap_or_default())?;
                format!("[{tag}:{payload}]")
            }
        })
    }

    fn security_level(&self, method: Method) -> SecurityLevel {
        match (method, self.provider.assurance()) {
            (Method::Hash | Method::Encrypt, Assurance::Secure) => SecurityLevel::High,
            (Method::Hash | Method::Encrypt, Assurance::Demo) => SecurityLevel::Low,
            (Method::Redact, _) => SecurityLevel::Medium,
            (Method::Mask, _) => SecurityLevel::Low,
        }
    }
}

/// Clamp a splice end to a char boundary of the current text
///
/// Overlapping cross-category matches shift the tail as outer
/// replacements land; the clamp keeps the later, inner splice inside
/// the rewritten text.
fn splice_end(text: &str, start: usize, end: usize) -> usize {
    let mut end = end.min(text.len());
    while end > start && !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Scanner;
    use crate::registry::CategoryRegistry;

    fn scan(text: &str) -> DetectionResult {
        let registry = CategoryRegistry::builtin().unwrap();
        Scanner::new(&registry).scan(text).unwrap()
    }

    fn all_categories() -> HashSet<CategoryId> {
        let registry = CategoryRegistry::builtin().unwrap();
        registry.categories().iter().map(|c| c.id).collect()
    }

    #[test]
    fn mask_replaces_with_equal_length_asterisks() {
        let text = "Contact john.doe@email.com now";
        let result = scan(text);
        let enabled = HashSet::from([CategoryId::Email]);

        let outcome = Transformer::default()
            .apply(text, &result, &enabled, Method::Mask, None)
            .unwrap();

        assert_eq!(outcome.transformed_text, "Contact ****************** now");
        assert_eq!(outcome.processed_count, 1);
        assert_eq!(outcome.security_level, SecurityLevel::Low);
    }

    #[test]
    fn masked_output_has_no_residual_matches() {
        let text = "mail a@bb.co card 4111-1111-1111-1111 ssn 219-09-1234";
        let result = scan(text);
        let enabled = all_categories();

        let outcome = Transformer::default()
            .apply(text, &result, &enabled, Method::Mask, None)
            .unwrap();

        let rescan = scan(&outcome.transformed_text);
        assert_eq!(rescan.total(), 0);
    }

    #[test]
    fn redact_uses_fixed_placeholder_and_counts() {
        let text = "mail a@bb.co or c@dd.co, ssn 219-09-1234";
        let result = scan(text);
        // Only email enabled; the SSN stays in original_count
        let enabled = HashSet::from([CategoryId::Email]);

        let outcome = Transformer::default()
            .apply(text, &result, &enabled, Method::Redact, None)
            .unwrap();

        assert_eq!(outcome.processed_count, 2);
        assert_eq!(outcome.original_count, result.total());
        assert!(outcome.original_count > outcome.processed_count);
        assert_eq!(
            outcome.transformed_text,
            "mail [REDACTED] or [REDACTED], ssn 219-09-1234"
        );
        assert_eq!(outcome.security_level, SecurityLevel::Medium);
    }

    #[test]
    fn hash_produces_tagged_fixed_length_tokens() {
        let text = "mail a@bb.co now";
        let result = scan(text);
        let enabled = HashSet::from([CategoryId::Email]);

        let outcome = Transformer::default()
            .apply(text, &result, &enabled, Method::Hash, None)
            .unwrap();

        assert!(outcome.transformed_text.starts_with("mail [HASH:"));
        assert!(!outcome.transformed_text.contains("a@bb.co"));
        assert_eq!(outcome.security_level, SecurityLevel::High);

        // Deterministic across runs
        let again = Transformer::default()
            .apply(text, &result, &enabled, Method::Hash, None)
            .unwrap();
        assert_eq!(outcome.transformed_text, again.transformed_text);
    }

    #[test]
    fn encrypt_requires_a_policy_compliant_password() {
        let text = "mail a@bb.co now";
        let result = scan(text);
        let enabled = HashSet::from([CategoryId::Email]);
        let transformer = Transformer::default();

        let missing = transformer.apply(text, &result, &enabled, Method::Encrypt, None);
        assert!(matches!(missing, Err(Error::Policy(_))));

        let short = transformer.apply(text, &result, &enabled, Method::Encrypt, Some("1234567"));
        assert!(matches!(short, Err(Error::Policy(_))));

        // Length is counted in characters, not bytes: 7 two-byte
        // characters are still a 7-character password
        let multibyte =
            transformer.apply(text, &result, &enabled, Method::Encrypt, Some("ééééééé"));
        assert!(matches!(multibyte, Err(Error::Policy(_))));

        // 8 characters pass even when they exceed 8 bytes
        let ok = transformer.apply(text, &result, &enabled, Method::Encrypt, Some("éééééééé"));
        assert!(ok.is_ok());
    }

    #[test]
    fn encrypted_tokens_round_trip_through_the_provider() {
        let text = "mail a@bb.co now";
        let result = scan(text);
        let enabled = HashSet::from([CategoryId::Email]);
        let provider = CryptoProvider::new();

        let outcome = Transformer::new(provider)
            .apply(text, &result, &enabled, Method::Encrypt, Some("hunter22hunter"))
            .unwrap();

        let token_start = outcome.transformed_text.find("[ENC:").unwrap();
        let payload = &outcome.transformed_text[token_start + 5..];
        let payload = &payload[..payload.find(']').unwrap()];

        assert_eq!(provider.decrypt(payload, "hunter22hunter").unwrap(), "a@bb.co");
    }

    #[test]
    fn demo_backend_tags_and_degrades_security_level() {
        let text = "mail a@bb.co now";
        let result = scan(text);
        let enabled = HashSet::from([CategoryId::Email]);

        let outcome = Transformer::new(CryptoProvider::demo())
            .apply(text, &result, &enabled, Method::Hash, None)
            .unwrap();

        assert!(outcome.transformed_text.contains("[HASH-DEMO:"));
        assert_eq!(outcome.security_level, SecurityLevel::Low);
    }

    #[test]
    fn empty_enabled_set_is_a_no_op() {
        let text = "mail a@bb.co now";
        let result = scan(text);

        let outcome = Transformer::default()
            .apply(text, &result, &HashSet::new(), Method::Mask, None)
            .unwrap();

        assert_eq!(outcome.processed_count, 0);
        assert_eq!(outcome.original_count, result.total());
        assert_eq!(outcome.transformed_text, text);
    }

    #[test]
    fn empty_document_is_rejected() {
        let result = DetectionResult::new();
        let outcome =
            Transformer::default().apply("  ", &result, &HashSet::new(), Method::Mask, None);

        assert!(matches!(outcome, Err(Error::EmptyInput)));
    }

    #[test]
    fn display_token_truncates_only_the_copy() {
        let token = "A".repeat(100);
        assert_eq!(display_token(&token).len(), 32);
        assert_eq!(display_token("short"), "short");
    }

    #[test]
    fn display_token_respects_char_boundaries() {
        // 2-byte chars put a boundary inside the display cut
        let token = "é".repeat(40);
        let display = display_token(&token);

        assert!(display.len() <= 32);
        assert!(token.starts_with(display));
        assert!(display.chars().all(|c| c == 'é'));
    }
}
