//! Random strings for salts and generated passwords.
//!
//! Drawn from the thread-local CSPRNG, never from a time-seeded generator.

use rand::Rng;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SPECIALS: &[u8] = b"~=+%^*/()[]{}/!@#$?|";

/// Length of the salt stored in a wallet file.
pub const SALT_LENGTH: usize = 12;

/// Character classes a random string may draw from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub letters: bool,
    pub digits: bool,
    pub specials: bool,
}

impl CharClasses {
    pub const ALPHANUMERIC: Self = Self {
        letters: true,
        digits: true,
        specials: false,
    };

    /// The alphabet for these classes. Selecting nothing means letters and digits.
    fn alphabet(&self) -> Vec<u8> {
        let mut chars = Vec::new();
        if self.letters {
            chars.extend_from_slice(LETTERS);
        }
        if self.digits {
            chars.extend_from_slice(DIGITS);
        }
        if self.specials {
            chars.extend_from_slice(SPECIALS);
        }
        if chars.is_empty() {
            chars.extend_from_slice(DIGITS);
            chars.extend_from_slice(LETTERS);
        }
        chars
    }
}

/// Returns `length` characters drawn uniformly from `classes`.
pub fn random_string(length: usize, classes: CharClasses) -> String {
    let alphabet = classes.alphabet();
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect()
}

/// Generates a fresh wallet salt: 12 letters and digits.
pub fn generate_salt() -> String {
    random_string(SALT_LENGTH, CharClasses::ALPHANUMERIC)
}

/// Shape of a generated password.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub classes: CharClasses,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            classes: CharClasses::ALPHANUMERIC,
        }
    }
}

impl PasswordPolicy {
    /// Generates a password following this policy.
    pub fn generate(&self) -> String {
        random_string(self.length, self.classes)
    }
}
