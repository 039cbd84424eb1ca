//! Encryption layer for RentEase session storage.
//!
//! Everything the session store needs to keep a persisted session
//! confidential and tamper-evident:
//!
//! - **ChaCha20-Poly1305** authenticated encryption with a random
//!   96-bit nonce per operation ([`encrypt`] / [`decrypt`])
//! - **Argon2id** passphrase key derivation ([`SessionKey::derive`])
//! - **Zeroizing key handling** ([`SessionKey`] wipes itself on drop and
//!   redacts itself in debug output)
//!
//! # Key provisioning
//!
//! There is deliberately no default or built-in key. The embedding
//! application supplies a [`SessionKey`] sourced from per-installation
//! secret material: generated on first run, configured as hex, or derived
//! from a user passphrase. The cipher's guarantees hold only while the key
//! stays secret.

mod cipher;
mod error;
mod key;

pub use cipher::{EncryptedEnvelope, NONCE_SIZE, TAG_SIZE, decrypt, encrypt};
pub use error::{CryptoError, CryptoResult};
pub use key::{KEY_SIZE, KdfParams, SALT_SIZE, Salt, SessionKey};
