//! Category registry
//!
//! Fixed catalog of recognized PII categories. Rules are compiled once
//! at construction and the registry is read-only afterwards; enabling
//! or disabling categories is caller-side state.

use crate::validators::Validator;
use obscura_core::{CategoryId, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Immutable descriptor of one recognized category
#[derive(Debug)]
pub struct Category {
    pub id: CategoryId,

    /// Precompiled matching rule
    pub pattern: Regex,

    /// Human-readable name for legends
    pub display_name: &'static str,

    /// Highlight color for legends
    pub display_color: &'static str,

    /// Ascending scan order; ties break by declaration order
    pub priority: u32,

    /// Checksum/structure filter applied to candidates
    pub validator: Validator,

    /// Whether candidates are screened against the common-word list
    pub context_sensitive: bool,
}

impl Category {
    /// Whether this category's validator is a true checksum
    pub fn requires_checksum(&self) -> bool {
        self.validator == Validator::Luhn
    }

    /// Serializable summary for rendering collaborators
    pub fn descriptor(&self) -> CategoryDescriptor {
        CategoryDescriptor {
            id: self.id,
            display_name: self.display_name.to_string(),
            display_color: self.display_color.to_string(),
            priority: self.priority,
            requires_checksum: self.requires_checksum(),
            context_sensitive: self.context_sensitive,
        }
    }
}

/// Serializable category summary (no compiled rule)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub id: CategoryId,
    pub display_name: String,
    pub display_color: String,
    pub priority: u32,
    pub requires_checksum: bool,
    pub context_sensitive: bool,
}

/// The fixed, priority-ordered category catalog
#[derive(Debug)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build the built-in catalog, compiling every rule once
    pub fn builtin() -> Result<Self> {
        let mut categories = vec![
            Category {
                id: CategoryId::Email,
                pattern: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
                display_name: "Email address",
                display_color: "#e11d48",
                priority: 10,
                validator: Validator::None,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::Url,
                pattern: Regex::new(
                    r"https?://[-\w.]+(?::\d+)?(?:/[\w/_.]*(?:\?[\w&=%.]*)?(?:#\w*)?)?",
                )?,
                display_name: "URL",
                display_color: "#0ea5e9",
                priority: 20,
                validator: Validator::None,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::IpAddress,
                pattern: Regex::new(
                    r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
                )?,
                display_name: "IP address",
                display_color: "#8b5cf6",
                priority: 30,
                validator: Validator::None,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::Ssn,
                pattern: Regex::new(r"\b\d{3}[-\s]?\d{2}[-\s]?\d{4}\b")?,
                display_name: "Social Security Number",
                display_color: "#dc2626",
                priority: 40,
                validator: Validator::SsnStructure,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::CreditCard,
                pattern: Regex::new(r"\b(?:\d{4}[-\s]?){3}\d{4}\b")?,
                display_name: "Credit card number",
                display_color: "#f59e0b",
                priority: 50,
                validator: Validator::Luhn,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::Phone,
                pattern: Regex::new(r"\b(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")?,
                display_name: "Phone number",
                display_color: "#10b981",
                priority: 60,
                validator: Validator::PhoneLength,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::Date,
                pattern: Regex::new(
                    r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4})\b",
                )?,
                display_name: "Date",
                display_color: "#64748b",
                priority: 70,
                validator: Validator::None,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::ZipCode,
                pattern: Regex::new(r"\b\d{5}(?:-\d{4})?\b")?,
                display_name: "ZIP code",
                display_color: "#f97316",
                priority: 80,
                validator: Validator::None,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::StreetAddress,
                pattern: Regex::new(
                    r"\b\d+\s+[A-Za-z0-9\s,]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Circle|Cir)\b",
                )?,
                display_name: "Street address",
                display_color: "#14b8a6",
                priority: 90,
                validator: Validator::None,
                context_sensitive: false,
            },
            Category {
                id: CategoryId::Passport,
                pattern: Regex::new(r"\b[A-Z]{1,2}\d{6,9}\b")?,
                display_name: "Passport number",
                display_color: "#6366f1",
                priority: 100,
                validator: Validator::None,
                context_sensitive: true,
            },
            Category {
                id: CategoryId::DriverLicense,
                pattern: Regex::new(r"\b[A-Z]{1,2}\d{6,8}\b")?,
                display_name: "Driver's license",
                display_color: "#a855f7",
                priority: 110,
                validator: Validator::None,
                context_sensitive: true,
            },
            Category {
                id: CategoryId::PersonName,
                pattern: Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b")?,
                display_name: "Person name",
                display_color: "#ec4899",
                priority: 120,
                validator: Validator::None,
                context_sensitive: true,
            },
        ];

        // Declaration order above is already ascending, but the scan
        // order contract is priority-based, so enforce it. Stable sort
        // keeps declaration order for ties.
        categories.sort_by_key(|c| c.priority);

        Ok(Self { categories })
    }

    /// Categories in ascending priority order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Serializable descriptors in scan order
    pub fn descriptors(&self) -> Vec<CategoryDescriptor> {
        self.categories.iter().map(Category::descriptor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_compiles() {
        let registry = CategoryRegistry::builtin().unwrap();
        assert_eq!(registry.categories().len(), 12);
    }

    #[test]
    fn categories_are_in_ascending_priority_order() {
        let registry = CategoryRegistry::builtin().unwrap();
        let priorities: Vec<u32> = registry.categories().iter().map(|c| c.priority).collect();

        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn lookup_by_id() {
        let registry = CategoryRegistry::builtin().unwrap();
        let card = registry.get(CategoryId::CreditCard).unwrap();

        assert!(card.requires_checksum());
        assert!(!card.context_sensitive);
        assert!(registry.get(CategoryId::PersonName).unwrap().context_sensitive);
    }

    #[test]
    fn descriptors_serialize_for_legends() {
        let registry = CategoryRegistry::builtin().unwrap();
        let json = serde_json::to_value(registry.descriptors()).unwrap();

        let first = &json[0];
        assert_eq!(first["id"], "email");
        assert_eq!(first["priority"], 10);
        assert_eq!(first["requires_checksum"], false);
    }
}
