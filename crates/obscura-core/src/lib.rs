//! Obscura Core Types
//!
//! This crate provides the fundamental types shared across Obscura:
//! - Match / detection result types
//! - Processing method and outcome types
//! - Core error taxonomy

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    CategoryHits, CategoryId, Chunk, DetectionResult, Match, Method, ProcessingOutcome,
    SecurityLevel,
};
