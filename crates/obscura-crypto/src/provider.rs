//! Hashing and encryption backends

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use obscura_core::{Error, Result};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use tracing::warn;

/// Hex characters kept from a digest for display
pub const DIGEST_DISPLAY_LEN: usize = 16;

/// Random salt length in bytes
const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes
const NONCE_LEN: usize = 12;

/// PBKDF2 iteration count
const PBKDF2_ITERATIONS: u32 = 100_000;

/// How strongly the provider's output protects the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assurance {
    /// SHA-256 / AES-256-GCM path
    Secure,

    /// Rolling hash / XOR path, reversible and weak by design
    Demo,
}

/// Hashing and password-based encryption provider
///
/// The secure backend is the default. The demo backend exists for
/// hosts where the secure primitives cannot run; selecting it logs a
/// warning and every token it produces carries a distinct `-DEMO` tag
/// so degraded output is never mistaken for the real thing.
#[derive(Debug, Clone, Copy)]
pub struct CryptoProvider {
    assurance: Assurance,
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider {
    /// Provider backed by SHA-256 and AES-256-GCM
    pub fn new() -> Self {
        Self {
            assurance: Assurance::Secure,
        }
    }

    /// Provider backed by the non-secure fallback algorithms
    pub fn demo() -> Self {
        warn!("secure crypto primitives unavailable, using non-secure demo backend");
        Self {
            assurance: Assurance::Demo,
        }
    }

    pub fn assurance(&self) -> Assurance {
        self.assurance
    }

    /// One-way digest of `text`, truncated to [`DIGEST_DISPLAY_LEN`]
    /// hex characters
    pub fn digest(&self, text: &str) -> String {
        match self.assurance {
            Assurance::Secure => {
                let mut hasher = Sha256::new();
                hasher.update(text.as_bytes());
                let mut hex = hex_encode(&hasher.finalize());
                hex.truncate(DIGEST_DISPLAY_LEN);
                hex
            }
            Assurance::Demo => rolling_hash(text),
        }
    }

    /// Encrypt `plaintext` under `password`
    ///
    /// Secure backend output is `base64(salt || nonce || ciphertext)`
    /// with a fresh random salt and nonce per call. The full payload is
    /// required for decryption; truncate only display copies.
    pub fn encrypt(&self, plaintext: &str, password: &str) -> Result<String> {
        match self.assurance {
            Assurance::Secure => {
                let mut salt = [0u8; SALT_LEN];
                let mut nonce_bytes = [0u8; NONCE_LEN];
                let mut rng = rand::rng();
                rng.fill_bytes(&mut salt);
                rng.fill_bytes(&mut nonce_bytes);

                let key = derive_key(password, &salt);
                let cipher = Aes256Gcm::new_from_slice(&key)
                    .map_err(|e| Error::Crypto(e.to_string()))?;
                let ciphertext = cipher
                    .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
                    .map_err(|e| Error::Crypto(e.to_string()))?;

                let mut payload = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
                payload.extend_from_slice(&salt);
                payload.extend_from_slice(&nonce_bytes);
                payload.extend_from_slice(&ciphertext);
                Ok(BASE64.encode(payload))
            }
            Assurance::Demo => Ok(BASE64.encode(xor_cycle(plaintext.as_bytes(), password))),
        }
    }

    /// Reverse [`encrypt`](Self::encrypt) given the full payload and
    /// the same password
    pub fn decrypt(&self, payload: &str, password: &str) -> Result<String> {
        let raw = BASE64
            .decode(payload)
            .map_err(|e| Error::Crypto(format!("invalid payload encoding: {e}")))?;

        let plaintext = match self.assurance {
            Assurance::Secure => {
                if raw.len() < SALT_LEN + NONCE_LEN {
                    return Err(Error::Crypto("payload too short".into()));
                }
                let (salt, rest) = raw.split_at(SALT_LEN);
                let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

                let key = derive_key(password, salt);
                let cipher = Aes256Gcm::new_from_slice(&key)
                    .map_err(|e| Error::Crypto(e.to_string()))?;
                cipher
                    .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
                    .map_err(|_| Error::Crypto("decryption failed (wrong password?)".into()))?
            }
            Assurance::Demo => xor_cycle(&raw, password),
        };

        String::from_utf8(plaintext).map_err(|e| Error::Crypto(e.to_string()))
    }
}

/// PBKDF2-HMAC-SHA-256 key derivation producing a 256-bit key
fn derive_key(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// 32-bit multiply-accumulate hash for the demo backend
fn rolling_hash(text: &str) -> String {
    let mut h: u32 = 0;
    for b in text.as_bytes() {
        h = h.wrapping_mul(31).wrapping_add(*b as u32);
    }
    format!("{h:08x}")
}

/// Password-cycled XOR transform; its own inverse
fn xor_cycle(data: &[u8], password: &str) -> Vec<u8> {
    let key = password.as_bytes();
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, b)| b ^ key[i % key.len()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_truncated_hex() {
        let provider = CryptoProvider::new();
        let digest = provider.digest("4111111111111111");

        assert_eq!(digest.len(), DIGEST_DISPLAY_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_deterministic() {
        let provider = CryptoProvider::new();
        assert_eq!(provider.digest("a@b.co"), provider.digest("a@b.co"));
        assert_ne!(provider.digest("a@b.co"), provider.digest("c@d.co"));
    }

    #[test]
    fn encrypt_round_trips() {
        let provider = CryptoProvider::new();
        let token = provider.encrypt("555-123-4567", "correct horse").unwrap();

        assert_ne!(token, "555-123-4567");
        let plain = provider.decrypt(&token, "correct horse").unwrap();
        assert_eq!(plain, "555-123-4567");
    }

    #[test]
    fn encrypt_uses_fresh_salt_and_nonce() {
        let provider = CryptoProvider::new();
        let a = provider.encrypt("secret", "password1").unwrap();
        let b = provider.encrypt("secret", "password1").unwrap();

        // Same plaintext and password, different payloads
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_password_fails_authentication() {
        let provider = CryptoProvider::new();
        let token = provider.encrypt("secret", "password1").unwrap();

        assert!(provider.decrypt(&token, "password2").is_err());
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let provider = CryptoProvider::new();
        let token = provider.encrypt("secret", "password1").unwrap();
        let truncated = &token[..16];

        assert!(provider.decrypt(truncated, "password1").is_err());
    }

    #[test]
    fn demo_backend_round_trips() {
        let provider = CryptoProvider::demo();
        assert_eq!(provider.assurance(), Assurance::Demo);

        let token = provider.encrypt("secret", "password1").unwrap();
        assert_eq!(provider.decrypt(&token, "password1").unwrap(), "secret");
    }

    #[test]
    fn demo_digest_is_short_and_stable() {
        let provider = CryptoProvider::demo();
        let digest = provider.digest("hello");

        assert_eq!(digest.len(), 8);
        assert_eq!(digest, provider.digest("hello"));
    }
}
