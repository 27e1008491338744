//! AES-256-GCM sealing of opaque payloads.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, DerivedKey, KdfParams};

/// AES-GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Seals `plaintext` under `key`, returning `nonce || ciphertext || tag`.
///
/// Every call draws a fresh random nonce from the OS RNG, so sealing the same
/// plaintext twice never produces the same output.
pub fn encrypt_with_key(key: &DerivedKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Opens a `nonce || ciphertext || tag` payload produced by [`encrypt_with_key`].
///
/// Truncated input and tag mismatches both surface as
/// [`CryptoError::Authentication`].
pub fn decrypt_with_key(key: &DerivedKey, payload: &[u8]) -> CryptoResult<Vec<u8>> {
    if payload.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Authentication);
    }
    let (nonce, sealed) = payload.split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::Authentication)
}

/// Derives the wallet key from `passphrase` and `salt` and seals `plaintext`.
///
/// Returns the standard base64 text stored in the wallet file's `Data` field.
pub fn encrypt(plaintext: &[u8], passphrase: &str, salt: &str) -> CryptoResult<String> {
    let key = derive_key(passphrase, salt, &KdfParams::default());
    let sealed = encrypt_with_key(&key, plaintext)?;
    Ok(STANDARD.encode(sealed))
}

/// Reverses [`encrypt`].
///
/// A blob that is not strict standard base64 (whitespace included) fails with
/// [`CryptoError::Encoding`]; any
/// wrong passphrase, wrong salt or tampering fails with
/// [`CryptoError::Authentication`].
pub fn decrypt(blob: &str, passphrase: &str, salt: &str) -> CryptoResult<Vec<u8>> {
    let payload = STANDARD
        .decode(blob)
        .map_err(|e| CryptoError::Encoding(e.to_string()))?;
    let key = derive_key(passphrase, salt, &KdfParams::default());
    decrypt_with_key(&key, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> DerivedKey {
        DerivedKey::from_bytes([7u8; 32])
    }

    #[test]
    fn sealed_layout_is_nonce_then_ciphertext_then_tag() {
        let sealed = encrypt_with_key(&test_key(), b"hello").unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + 5 + TAG_SIZE);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = test_key();
        let sealed = encrypt_with_key(&key, b"").unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + TAG_SIZE);
        assert!(decrypt_with_key(&key, &sealed).unwrap().is_empty());
    }

    #[test]
    fn truncated_payload_is_authentication_failure() {
        let key = test_key();
        let sealed = encrypt_with_key(&key, b"hello").unwrap();
        let err = decrypt_with_key(&key, &sealed[..NONCE_SIZE + 3]).unwrap_err();
        assert_eq!(err, CryptoError::Authentication);
    }

    #[test]
    fn nonces_differ_between_calls() {
        let key = test_key();
        let a = encrypt_with_key(&key, b"same").unwrap();
        let b = encrypt_with_key(&key, b"same").unwrap();
        assert_ne!(a[..NONCE_SIZE], b[..NONCE_SIZE]);
    }
}
