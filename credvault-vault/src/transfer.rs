//! Plaintext import and export of entries.
//!
//! The transfer format is the same JSON entry list that is sealed inside the
//! wallet file, unencrypted. Exported data contains every password and OTP
//! seed in the clear.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::envelope::{decode_entries, encode_entries, write_atomic};
use crate::{Vault, VaultResult};

impl Vault {
    /// Adds every entry of a transfer document, in order.
    ///
    /// Not transactional: on the first rejected entry the error is returned and
    /// the entries added before it stay in the vault. Each imported entry gets
    /// fresh timestamps, exactly like [`Vault::add_entry`].
    pub fn import(&mut self, data: &[u8]) -> VaultResult<()> {
        let entries = decode_entries(data)?;
        let count = entries.len();
        for entry in entries {
            self.add_entry(entry)?;
        }
        debug!(entries = count, "entries imported");
        Ok(())
    }

    /// Serializes every entry, secrets included, to the transfer format.
    pub fn export(&self) -> VaultResult<Vec<u8>> {
        let data = encode_entries(self.entries())?;
        debug!(entries = self.len(), "entries exported");
        Ok(data)
    }

    /// [`Vault::import`] from a transfer file.
    pub fn import_file(&mut self, path: &Path) -> VaultResult<()> {
        let data = fs::read(path)?;
        self.import(&data)
    }

    /// [`Vault::export`] to a transfer file, written atomically and
    /// readable by the owner only on Unix.
    pub fn export_file(&self, path: &Path) -> VaultResult<()> {
        write_atomic(path, &self.export()?)
    }
}
