//! Passphrase-based encryption for documents that need real confidentiality.
//!
//! Unlike [`crate::secure_storage`]'s obfuscation, this is actual
//! cryptography: PBKDF2-HMAC-SHA256 key derivation with a random salt per
//! encryption, then AES-256-GCM with a random nonce.
//!
//! Payload layout (base64-encoded): MAGIC (4 bytes) || salt (16 bytes) ||
//! nonce (12 bytes) || ciphertext. Everything needed for decryption except
//! the passphrase travels with the payload.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::error::{CoreError, Result};

/// Salt size for key derivation
const SALT_SIZE: usize = 16;

/// Nonce size for AES-GCM (96 bits)
const NONCE_SIZE: usize = 12;

/// Derived key size (256 bits for AES-256)
const KEY_SIZE: usize = 32;

/// PBKDF2 iteration count. Deliberately slow to resist brute force.
const PBKDF2_ROUNDS: u32 = 210_000;

/// Magic bytes to identify encrypted payloads
const ENCRYPTED_MAGIC: &[u8] = b"ASV1";

fn derive_key(passphrase: &str, salt: &[u8]) -> [u8; KEY_SIZE] {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    key
}

/// Encrypt a document with a passphrase.
///
/// Returns a base64 string containing magic, salt, nonce, and ciphertext.
/// Salt and nonce are freshly random on every call, so encrypting the same
/// plaintext twice yields different payloads.
pub fn encrypt_document(passphrase: &str, plaintext: &str) -> Result<String> {
    use rand::RngCore;
    use rand::rngs::OsRng;

    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);

    let key = derive_key(passphrase, &salt);
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::Crypto(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CoreError::Crypto(format!("Encryption failed: {}", e)))?;

    // Combine: magic || salt || nonce || ciphertext
    let mut payload =
        Vec::with_capacity(ENCRYPTED_MAGIC.len() + SALT_SIZE + NONCE_SIZE + ciphertext.len());
    payload.extend_from_slice(ENCRYPTED_MAGIC);
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(payload))
}

/// Decrypt a payload produced by [`encrypt_document`].
///
/// Fails with a typed error on a wrong passphrase, a tampered payload, or a
/// payload that was never ours (missing magic bytes).
pub fn decrypt_document(passphrase: &str, payload: &str) -> Result<String> {
    let decoded = BASE64
        .decode(payload.trim())
        .map_err(|e| CoreError::Crypto(format!("Invalid payload encoding: {}", e)))?;

    if decoded.len() < ENCRYPTED_MAGIC.len() + SALT_SIZE + NONCE_SIZE + 1 {
        return Err(CoreError::Crypto("Encrypted payload too short".into()));
    }

    if &decoded[..ENCRYPTED_MAGIC.len()] != ENCRYPTED_MAGIC {
        return Err(CoreError::Crypto(
            "Invalid payload format (missing magic bytes)".into(),
        ));
    }

    let salt_start = ENCRYPTED_MAGIC.len();
    let nonce_start = salt_start + SALT_SIZE;
    let nonce_end = nonce_start + NONCE_SIZE;

    let key = derive_key(passphrase, &decoded[salt_start..nonce_start]);
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::Crypto(format!("Failed to create cipher: {}", e)))?;

    let nonce = Nonce::from_slice(&decoded[nonce_start..nonce_end]);
    let plaintext = cipher
        .decrypt(nonce, &decoded[nonce_end..])
        .map_err(|_| CoreError::Crypto("Decryption failed".into()))?;

    String::from_utf8(plaintext)
        .map_err(|_| CoreError::Crypto("Decrypted payload is not valid UTF-8".into()))
}
