//! Obscura Crypto Provider
//!
//! Hashing and password-based authenticated encryption for match
//! transformation:
//! - SHA-256 digests truncated to a fixed display length
//! - PBKDF2-HMAC-SHA-256 key derivation with per-call random salt
//! - AES-256-GCM encryption with per-call random nonce
//! - An explicitly non-secure demo backend for hosts without the
//!   secure primitives; its output is tagged, never passed off as
//!   equivalent security

pub mod provider;

pub use provider::{Assurance, CryptoProvider, DIGEST_DISPLAY_LEN};
