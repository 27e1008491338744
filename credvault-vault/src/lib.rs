//! Encrypted credential wallet.
//!
//! A [`Vault`] owns an ordered list of [`Entry`] records and persists them as a
//! single AES-256-GCM sealed blob. The wallet file is a small JSON envelope:
//!
//! ```text
//! { "Salt": "<12 random alphanumerics>", "Data": "<base64(nonce || sealed entry list)>" }
//! ```
//!
//! The key is derived from the session passphrase and the stored salt with
//! PBKDF2-HMAC-SHA512. The salt is generated on first save and never changes
//! afterwards. The passphrase itself is never written anywhere.
//!
//! # Concurrency
//!
//! Everything here is synchronous and meant for a single owner. There is no
//! file locking: two processes saving the same wallet path concurrently will
//! race and the last rename wins.

pub mod config;
mod envelope;
mod search;
mod transfer;

use chrono::Utc;
use credvault_crypto::{generate_salt, CryptoError};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zeroize::Zeroizing;

pub use config::WalletConfig;
pub use credvault_model::{Entry, ValidationError};

use envelope::WalletFile;

// ============================================================================
// Error types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("invalid entry: {0}")]
    Validation(#[from] ValidationError),
    #[error("the id already exists in wallet: {0}")]
    Duplicate(String),
    #[error("entry not found with this id: {0}")]
    NotFound(String),
    #[error("invalid passphrase or corrupted wallet")]
    Authentication,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("format error: {0}")]
    Format(String),
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl From<CryptoError> for VaultError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Authentication => VaultError::Authentication,
            CryptoError::Encoding(msg) => VaultError::Format(msg),
            CryptoError::Encryption(msg) => VaultError::Crypto(msg),
        }
    }
}

pub type VaultResult<T> = Result<T, VaultError>;

// ============================================================================
// Vault: one wallet file and its decrypted entries
// ============================================================================

/// A wallet: its file location, session passphrase, salt and entries.
pub struct Vault {
    path: PathBuf,
    passphrase: Zeroizing<String>,
    /// `None` until the wallet is loaded from disk or saved for the first time.
    salt: Option<String>,
    entries: Vec<Entry>,
}

impl Vault {
    /// Creates an empty, unloaded vault bound to `path`.
    pub fn new(path: impl Into<PathBuf>, passphrase: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            passphrase: Zeroizing::new(passphrase.into()),
            salt: None,
            entries: Vec::new(),
        }
    }

    /// Creates a vault for the named wallet in the configured wallet directory.
    ///
    /// `wallet` falls back to the configured default wallet name.
    pub fn from_config(
        config: &WalletConfig,
        wallet: Option<&str>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self::new(config.wallet_path(wallet), passphrase)
    }

    /// Creates a vault bound to `path` and loads it.
    pub fn open(path: impl Into<PathBuf>, passphrase: impl Into<String>) -> VaultResult<Self> {
        let mut vault = Self::new(path, passphrase);
        vault.load()?;
        Ok(vault)
    }

    /// Reads and decrypts the wallet file.
    ///
    /// A missing file is a fresh wallet and loads as empty. On any failure the
    /// in-memory entries and salt are left untouched.
    pub fn load(&mut self) -> VaultResult<()> {
        let Some(file) = WalletFile::read(&self.path)? else {
            debug!(path = %self.path.display(), "no wallet file, starting empty");
            return Ok(());
        };

        let plaintext = Zeroizing::new(credvault_crypto::decrypt(
            &file.data,
            &self.passphrase,
            &file.salt,
        )?);
        let entries = envelope::decode_entries(&plaintext)?;

        info!(path = %self.path.display(), entries = entries.len(), "wallet loaded");
        self.salt = Some(file.salt);
        self.entries = entries;
        Ok(())
    }

    /// Encrypts the entries and atomically replaces the wallet file.
    ///
    /// The first save generates the salt; later saves reuse it.
    pub fn save(&mut self) -> VaultResult<()> {
        let salt = self.salt.get_or_insert_with(generate_salt).clone();

        let plaintext = Zeroizing::new(envelope::encode_entries(&self.entries)?);
        let data = credvault_crypto::encrypt(&plaintext, &self.passphrase, &salt)?;
        let file = WalletFile { salt, data };

        envelope::write_atomic(&self.path, &file.to_bytes()?)?;
        info!(path = %self.path.display(), entries = self.entries.len(), "wallet saved");
        Ok(())
    }

    /// Validates and appends a new entry, stamping both timestamps.
    pub fn add_entry(&mut self, mut entry: Entry) -> VaultResult<()> {
        entry.validate()?;
        if self.search_entry_by_id(&entry.id).is_some() {
            return Err(VaultError::Duplicate(entry.id));
        }

        let now = now();
        entry.created_at = now;
        entry.updated_at = now;
        self.entries.push(entry);
        Ok(())
    }

    /// Removes the entry with `id`.
    pub fn delete_entry(&mut self, id: &str) -> VaultResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Replaces the stored entry sharing `entry.id`, keeping its position.
    ///
    /// Only `updated_at` is stamped. `created_at` is taken from the caller's
    /// value as-is, so carry it over from the stored entry.
    pub fn update_entry(&mut self, mut entry: Entry) -> VaultResult<()> {
        let index = self
            .position(&entry.id)
            .ok_or_else(|| VaultError::NotFound(entry.id.clone()))?;
        entry.validate()?;

        entry.updated_at = now();
        self.entries[index] = entry;
        Ok(())
    }

    /// Looks up an entry by id.
    pub fn search_entry_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct non-empty group names in first-seen order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !entry.group.is_empty() && !groups.contains(&entry.group.as_str()) {
                groups.push(&entry.group);
            }
        }
        groups
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The wallet salt, once loaded or generated.
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.path)
            .field("salt", &self.salt)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}
