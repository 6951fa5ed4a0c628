//! Core detection and processing types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categories of sensitive information the engine can recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    /// Email address
    Email,

    /// URL
    Url,

    /// IPv4 address
    IpAddress,

    /// Social Security Number
    Ssn,

    /// Payment card number
    CreditCard,

    /// Phone number
    Phone,

    /// Calendar date
    Date,

    /// US ZIP code
    ZipCode,

    /// Street address
    StreetAddress,

    /// Passport number
    Passport,

    /// Driver's license number
    DriverLicense,

    /// Person name (two capitalized words)
    PersonName,
}

impl CategoryId {
    /// Stable string form, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Email => "email",
            CategoryId::Url => "url",
            CategoryId::IpAddress => "ip_address",
            CategoryId::Ssn => "ssn",
            CategoryId::CreditCard => "credit_card",
            CategoryId::Phone => "phone",
            CategoryId::Date => "date",
            CategoryId::ZipCode => "zip_code",
            CategoryId::StreetAddress => "street_address",
            CategoryId::Passport => "passport",
            CategoryId::DriverLicense => "driver_license",
            CategoryId::PersonName => "person_name",
        }
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validated match inside a document
///
/// Offsets are byte offsets into the original, unchunked document, so
/// `document[start..end()] == text` holds for every accepted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Category that produced this match
    pub category: CategoryId,

    /// The matched text
    pub text: String,

    /// Byte offset of the match start in the original document
    pub start: usize,
}

impl Match {
    pub fn new(category: CategoryId, text: impl Into<String>, start: usize) -> Self {
        Self {
            category,
            text: text.into(),
            start,
        }
    }

    /// Exclusive end offset of the match
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Matches recorded for a single category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHits {
    /// Matches in first-seen (document) order
    pub matches: Vec<Match>,

    /// Always equals `matches.len()`
    pub count: usize,
}

impl CategoryHits {
    pub fn push(&mut self, m: Match) {
        self.matches.push(m);
        self.count += 1;
    }
}

/// Detection output: category -> matches mapping
///
/// Iteration order is the stable category order, independent of the
/// order in which matches were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(flatten)]
    per_category: BTreeMap<CategoryId, CategoryHits>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted match under its category
    pub fn record(&mut self, m: Match) {
        self.per_category.entry(m.category).or_default().push(m);
    }

    /// Matches recorded for a category, if any
    pub fn hits(&self, category: CategoryId) -> Option<&CategoryHits> {
        self.per_category.get(&category)
    }

    /// Iterate over (category, hits) pairs
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &CategoryHits)> {
        self.per_category.iter().map(|(id, hits)| (*id, hits))
    }

    /// Keep only matches satisfying `keep`, dropping emptied categories
    pub fn retain(&mut self, mut keep: impl FnMut(&Match) -> bool) {
        for hits in self.per_category.values_mut() {
            hits.matches.retain(&mut keep);
            hits.count = hits.matches.len();
        }
        self.per_category.retain(|_, hits| !hits.matches.is_empty());
    }

    /// Total number of matches across all categories
    pub fn total(&self) -> usize {
        self.per_category.values().map(|h| h.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.per_category.values().all(|h| h.matches.is_empty())
    }
}

/// An offset-tagged window over a larger document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Window text, cut on character boundaries
    pub text: &'a str,

    /// Byte offset of the window start in the original document
    pub origin: usize,
}

/// How matched text is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Replace with a run of `*` of the same character length
    Mask,

    /// Replace with a one-way digest token
    Hash,

    /// Replace with a password-encrypted token
    Encrypt,

    /// Replace with a fixed placeholder literal
    Redact,
}

/// Coarse ranking of how strongly a transform protects the value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    None,
    Low,
    Medium,
    High,
}

/// Result of applying a transform to a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    /// Total matches detected, regardless of enabled state
    pub original_count: usize,

    /// Matches actually replaced
    pub processed_count: usize,

    /// Transform that was applied
    pub method: Method,

    /// Protection level of the applied transform
    pub security_level: SecurityLevel,

    /// The rewritten document
    pub transformed_text: String,
}
