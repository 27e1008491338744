//! Wallet configuration.
//!
//! An explicit, immutable value handed to constructors. Nothing in this crate
//! reads configuration from process globals or the environment.

use credvault_crypto::{CharClasses, PasswordPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{VaultError, VaultResult};

/// Extension of wallet files inside the wallet directory.
pub const WALLET_EXTENSION: &str = "gpm";

/// Where wallets live and how new passwords are generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Directory holding `<name>.gpm` wallet files.
    pub wallet_dir: PathBuf,

    /// Wallet opened when none is named.
    pub wallet_default: String,

    pub password_length: usize,
    pub password_letter: bool,
    pub password_digit: bool,
    pub password_special: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            wallet_dir: default_wallet_dir(),
            wallet_default: "default".to_string(),
            password_length: 16,
            password_letter: true,
            password_digit: true,
            password_special: false,
        }
    }
}

impl WalletConfig {
    /// Returns the defaults, overlaid with the JSON file at `path` if given.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: Option<&Path>) -> VaultResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = fs::read(path)?;
        serde_json::from_slice(&data)
            .map_err(|e| VaultError::Format(format!("config {}: {e}", path.display())))
    }

    /// Writes this configuration as JSON.
    pub fn save(&self, path: &Path) -> VaultResult<()> {
        let data =
            serde_json::to_vec_pretty(self).map_err(|e| VaultError::Format(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Creates the wallet directory if needed (mode 0700 on Unix).
    pub fn ensure_wallet_dir(&self) -> VaultResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&self.wallet_dir)?;
        Ok(())
    }

    /// Path of the wallet called `name`, or of the default wallet.
    pub fn wallet_path(&self, name: Option<&str>) -> PathBuf {
        let name = name.unwrap_or(self.wallet_default.as_str());
        self.wallet_dir.join(format!("{name}.{WALLET_EXTENSION}"))
    }

    /// Password generation policy described by this configuration.
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            length: self.password_length,
            classes: CharClasses {
                letters: self.password_letter,
                digits: self.password_digit,
                specials: self.password_special,
            },
        }
    }
}

fn default_wallet_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if cfg!(target_os = "macos") {
        home.join("Library").join("Preferences").join("gpm")
    } else if cfg!(windows) {
        home.join("AppData").join("Local").join("gpm")
    } else {
        home.join(".config").join("gpm")
    }
}
