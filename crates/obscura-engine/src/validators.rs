//! Candidate validators
//!
//! Filters applied to raw rule matches before they are accepted:
//! checksum and structure checks per category, plus the shared
//! common-word and structural-noise filters.

/// Per-category structural/checksum validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validator {
    /// Accept every rule match
    #[default]
    None,

    /// Mod-10 checksum over 13-19 digits
    Luhn,

    /// SSN area/group/serial exclusions
    SsnStructure,

    /// NANP-ish digit count check
    PhoneLength,
}

impl Validator {
    /// Whether `text` passes this validator
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Validator::None => true,
            Validator::Luhn => luhn_valid(text),
            Validator::SsnStructure => ssn_structure_valid(text),
            Validator::PhoneLength => phone_length_valid(text),
        }
    }
}

/// Luhn mod-10 check over the digits of `text`
///
/// Non-digits are stripped first; a digit count outside [13, 19] is an
/// immediate reject. Digits are walked left to right; positions where
/// `i % 2 == len % 2` are doubled (minus 9 when the double exceeds 9).
pub fn luhn_valid(text: &str) -> bool {
    let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let parity = digits.len() % 2;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == parity {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Reject SSNs with invalid area/group/serial parts
///
/// Area 000, 666 and 9xx are unassigned (9xx is reserved for ITINs);
/// group 00 and serial 0000 are never issued.
pub fn ssn_structure_valid(text: &str) -> bool {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 9 {
        return false;
    }

    if digits.starts_with("000") || digits.starts_with("666") || digits.starts_with('9') {
        return false;
    }

    if &digits[3..5] == "00" || &digits[5..9] == "0000" {
        return false;
    }

    true
}

/// Reject candidates whose digit count cannot be a phone number
pub fn phone_length_valid(text: &str) -> bool {
    let digit_count = text.chars().filter(|c| c.is_ascii_digit()).count();

    if !(10..=15).contains(&digit_count) {
        return false;
    }

    // 11 digits must carry the US/Canada country code
    if digit_count == 11 && !text.trim_start_matches(['+', ' ']).starts_with('1') {
        return false;
    }

    true
}

/// Field-name tokens that appear as serialization keys in loosely
/// structured key/value documents, case-folded.
const STRUCTURAL_TOKENS: &[&str] = &[
    "name",
    "first name",
    "last name",
    "full name",
    "email",
    "email address",
    "phone",
    "phone number",
    "address",
    "street address",
    "city",
    "state",
    "country",
    "zip",
    "zip code",
    "zipcode",
    "date",
    "date of birth",
    "url",
    "ip address",
    "credit card",
    "card number",
    "account number",
    "user",
    "username",
    "id",
    "type",
    "key",
    "value",
    "label",
    "title",
    "status",
];

/// Structural-noise filter: does this candidate look like a
/// serialization field name rather than a value?
///
/// Triggers only when the candidate sits in quote-colon context
/// (`"Candidate":`) and its case-folded text is an exact member of the
/// structural token list. A heuristic for loosely structured key/value
/// text, not a format-aware parse.
pub fn is_structural_noise(candidate: &str, preceding: &str, following: &str) -> bool {
    let quoted_before = preceding.ends_with('"') || preceding.ends_with('\'');
    if !quoted_before {
        return false;
    }

    let after_quote = match following.strip_prefix('"').or_else(|| following.strip_prefix('\'')) {
        Some(rest) => rest,
        None => return false,
    };
    if !after_quote.trim_start().starts_with(':') {
        return false;
    }

    let folded = candidate.to_lowercase();
    STRUCTURAL_TOKENS.contains(&folded.as_str())
}

/// Common words and business terms that satisfy broad rules (notably
/// the two-capitalized-words name rule) without being PII.
/// Membership is case-sensitive.
const COMMON_TERMS: &[&str] = &[
    "New York",
    "Los Angeles",
    "San Francisco",
    "Las Vegas",
    "United States",
    "North America",
    "South America",
    "New Jersey",
    "New Mexico",
    "North Carolina",
    "South Carolina",
    "North Dakota",
    "South Dakota",
    "West Virginia",
    "Rhode Island",
    "New Hampshire",
    "Customer Service",
    "Privacy Policy",
    "Terms Conditions",
    "Social Security",
    "Credit Card",
    "Account Number",
    "Thank You",
    "Best Regards",
    "Kind Regards",
    "Dear Sir",
    "Dear Madam",
    "Machine Learning",
    "Artificial Intelligence",
    "Data Protection",
    "General Data",
    "Human Resources",
    "Public Relations",
];

/// Context filter for context-sensitive categories
pub fn is_common_term(candidate: &str) -> bool {
    COMMON_TERMS.contains(&candidate)
}
