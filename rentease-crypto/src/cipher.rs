//! Authenticated encryption of session payloads.
//!
//! ChaCha20-Poly1305 with a fresh 96-bit random nonce per encryption. The
//! Poly1305 tag makes any change to the stored envelope detectable: a failed
//! authentication check surfaces as a typed error, never as silently-wrong
//! plaintext.

use chacha20poly1305::aead::rand_core::RngCore;
use chacha20poly1305::aead::{Aead, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};
use crate::key::SessionKey;

/// Size of the ChaCha20-Poly1305 nonce in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Size of the Poly1305 tag appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

/// An encrypted payload in the form it is persisted.
///
/// Serializes as `{"nonce": "<base64>", "data": "<base64>"}`, which is the
/// exact string a storage slot holds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Random 96-bit nonce, unique per encryption.
    #[serde(with = "b64_nonce")]
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the Poly1305 tag appended.
    #[serde(rename = "data", with = "b64")]
    pub ciphertext: Vec<u8>,
}

/// Encrypts a payload under `key` with a fresh random nonce.
pub fn encrypt(key: &SessionKey, plaintext: &[u8]) -> CryptoResult<EncryptedEnvelope> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("chacha20poly1305 seal failed: {e}")))?;

    Ok(EncryptedEnvelope {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypts an envelope, verifying the authentication tag.
///
/// Fails if the ciphertext or nonce was modified, truncated, or produced
/// under a different key.
pub fn decrypt(key: &SessionKey, envelope: &EncryptedEnvelope) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), envelope.ciphertext.as_ref())
        .map_err(|_| CryptoError::Decryption("wrong key or tampered data".to_string()))
}

mod b64 {
    //! Base64 string form for envelope byte fields.

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
    }
}

mod b64_nonce {
    use serde::Deserializer;

    use super::NONCE_SIZE;
    pub use super::b64::serialize;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; NONCE_SIZE], D::Error> {
        let bytes = super::b64::deserialize(deserializer)?;
        <[u8; NONCE_SIZE]>::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::custom(format!("nonce must be {NONCE_SIZE} bytes")))
    }
}
