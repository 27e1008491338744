//! On-disk wallet envelope and the entry-list payload inside it.

use credvault_model::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::{VaultError, VaultResult};

/// The JSON object stored in a `.gpm` file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WalletFile {
    #[serde(rename = "Salt", alias = "salt")]
    pub salt: String,
    /// `base64(nonce || AES-256-GCM(entry list JSON))`.
    #[serde(rename = "Data", alias = "data")]
    pub data: String,
}

impl WalletFile {
    /// Reads the envelope at `path`, or `None` if there is no file.
    pub fn read(path: &Path) -> VaultResult<Option<Self>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file = serde_json::from_slice(&content)
            .map_err(|e| VaultError::Format(format!("wallet envelope: {e}")))?;
        Ok(Some(file))
    }

    pub fn to_bytes(&self) -> VaultResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| VaultError::Format(e.to_string()))
    }
}

/// Serializes entries into the payload / transfer JSON.
pub(crate) fn encode_entries(entries: &[Entry]) -> VaultResult<Vec<u8>> {
    serde_json::to_vec(entries).map_err(|e| VaultError::Format(e.to_string()))
}

/// Parses the payload / transfer JSON. A `null` document is an empty list.
pub(crate) fn decode_entries(data: &[u8]) -> VaultResult<Vec<Entry>> {
    let entries: Option<Vec<Entry>> = serde_json::from_slice(data)
        .map_err(|e| VaultError::Format(format!("entry list: {e}")))?;
    Ok(entries.unwrap_or_default())
}

/// Replaces `path` with `contents` without ever exposing a partial file.
///
/// Writes a sibling temp file (mode 0600 on Unix), fsyncs it, then renames it
/// over the target. The previous file stays intact until the rename.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> VaultResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".credvault-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| VaultError::Io(e.error))?;

    sync_dir(dir)?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
