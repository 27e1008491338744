//! Passphrase-based key derivation.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// PBKDF2 iteration count used by every wallet file.
pub const DEFAULT_ITERATIONS: u32 = 4096;

/// Tunables for PBKDF2-HMAC-SHA512.
///
/// Existing wallets are only readable with [`KdfParams::default`]; other values
/// exist for tests and known-answer vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// A 256-bit symmetric key. Wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    /// Wraps raw key material.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Derives a 32-byte key from `passphrase` and `salt` with PBKDF2-HMAC-SHA512.
pub fn derive_key(passphrase: &str, salt: &str, params: &KdfParams) -> DerivedKey {
    let mut out = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha512>(
        passphrase.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut out,
    );
    let key = DerivedKey(out);
    out.zeroize();
    key
}
