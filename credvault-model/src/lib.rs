//! Credential entry model for credvault.
//!
//! An [`Entry`] is one login record: display name, URI, user, password, an
//! optional TOTP seed, a free-form group and comment, plus the creation and
//! last-update timestamps stamped by the owning vault.
//!
//! Entries serialize to the JSON shape shared by the encrypted wallet payload
//! and the plaintext import/export format.
//!
//! The capitalized keys of older wallets (`Name`, `ID`, `User`, ...) are read
//! as aliases. A record carrying both spellings of one field is rejected as a
//! duplicate field rather than resolved.

mod entry;
mod error;

pub use entry::Entry;
pub use error::{ValidationError, ValidationResult};
