//! Obscura Detection and Transformation Engine
//!
//! This crate provides the scanning pipeline:
//! - A fixed, priority-ordered category registry with precompiled rules
//! - Checksum and context validators for false-positive suppression
//! - Boundary-safe chunking for oversized documents
//! - Cross-chunk match deduplication
//! - Document rewriting via mask / hash / encrypt / redact transforms

pub mod chunker;
pub mod dedup;
pub mod detector;
pub mod pipeline;
pub mod registry;
pub mod transform;
pub mod validators;

pub use detector::Detector;
pub use pipeline::{ScanConfig, Scanner};
pub use registry::{Category, CategoryDescriptor, CategoryRegistry};
pub use transform::{MIN_PASSWORD_LEN, REDACTED_TOKEN, Transformer, display_token};
pub use validators::Validator;
