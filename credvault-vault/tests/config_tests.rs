use credvault_crypto::CharClasses;
use credvault_vault::{Entry, Vault, VaultError, WalletConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn defaults() {
    let config = WalletConfig::default();
    assert_eq!(config.wallet_default, "default");
    assert_eq!(config.password_length, 16);
    assert!(config.password_letter);
    assert!(config.password_digit);
    assert!(!config.password_special);
    assert!(config.wallet_dir.ends_with("gpm"));
}

#[test]
fn load_without_file_is_default() {
    assert_eq!(WalletConfig::load(None).unwrap(), WalletConfig::default());
}

#[test]
fn save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = WalletConfig {
        wallet_dir: dir.path().join("wallets"),
        wallet_default: "personal".into(),
        password_length: 24,
        password_letter: false,
        password_digit: true,
        password_special: true,
    };
    config.save(&path).unwrap();

    assert_eq!(WalletConfig::load(Some(path.as_path())).unwrap(), config);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"wallet_default": "work", "password_length": 32}"#).unwrap();

    let config = WalletConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.wallet_default, "work");
    assert_eq!(config.password_length, 32);
    assert!(config.password_letter);
    assert_eq!(config.wallet_dir, WalletConfig::default().wallet_dir);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = WalletConfig::load(Some(dir.path().join("nope.json").as_path())).unwrap_err();
    assert!(matches!(err, VaultError::Io(_)));
}

#[test]
fn malformed_file_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "wallet_dir = 3").unwrap();
    assert!(matches!(
        WalletConfig::load(Some(path.as_path())),
        Err(VaultError::Format(_))
    ));
}

#[test]
fn wallet_path_uses_name_or_default() {
    let config = WalletConfig {
        wallet_dir: "/wallets".into(),
        ..WalletConfig::default()
    };
    assert_eq!(
        config.wallet_path(None),
        std::path::PathBuf::from("/wallets/default.gpm")
    );
    assert_eq!(
        config.wallet_path(Some("work")),
        std::path::PathBuf::from("/wallets/work.gpm")
    );
}

#[test]
fn password_policy_follows_config() {
    let config = WalletConfig {
        password_length: 40,
        password_letter: false,
        password_digit: true,
        password_special: false,
        ..WalletConfig::default()
    };
    let policy = config.password_policy();
    assert_eq!(policy.length, 40);
    assert_eq!(
        policy.classes,
        CharClasses {
            letters: false,
            digits: true,
            specials: false
        }
    );

    let password = policy.generate();
    assert_eq!(password.len(), 40);
    assert!(password.bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn vault_from_config_saves_in_wallet_dir() {
    let dir = TempDir::new().unwrap();
    let config = WalletConfig {
        wallet_dir: dir.path().join("nested").join("wallets"),
        ..WalletConfig::default()
    };
    config.ensure_wallet_dir().unwrap();

    let mut vault = Vault::from_config(&config, Some("work"), "secret");
    vault.add_entry(Entry::new("mail")).unwrap();
    vault.save().unwrap();

    assert!(config.wallet_dir.join("work.gpm").is_file());
    let reopened = Vault::open(config.wallet_path(Some("work")), "secret").unwrap();
    assert_eq!(reopened.len(), 1);
}

#[cfg(unix)]
#[test]
fn wallet_dir_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let config = WalletConfig {
        wallet_dir: dir.path().join("wallets"),
        ..WalletConfig::default()
    };
    config.ensure_wallet_dir().unwrap();

    let mode = fs::metadata(&config.wallet_dir).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o700);
}
