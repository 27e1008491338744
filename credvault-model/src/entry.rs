//! The credential record and its identity rules.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use url::Url;

use crate::error::{ValidationError, ValidationResult};

/// Last id handed out in this process, so ids stay strictly increasing even
/// when the clock resolution is coarser than the call rate.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// One credential record.
///
/// Keys are written in the lowercase wallet format; the capitalized keys used by
/// older wallet files are accepted on read. Missing keys default to empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(alias = "Name")]
    pub name: String,

    /// Unique within a vault. Assigned once by [`Entry::generate_id`].
    #[serde(alias = "ID")]
    pub id: String,

    /// Empty, or an absolute URI with a host.
    #[serde(alias = "URI")]
    pub uri: String,

    #[serde(rename = "login", alias = "User")]
    pub user: String,

    #[serde(alias = "Password")]
    pub password: String,

    /// Base32 TOTP seed, empty when the entry has no second factor.
    #[serde(rename = "otp", alias = "OTP")]
    pub otp_seed: String,

    #[serde(alias = "Group")]
    pub group: String,

    #[serde(alias = "Comment")]
    pub comment: String,

    /// Unix seconds. Stamped by the vault on insert.
    #[serde(rename = "create", alias = "Create")]
    pub created_at: i64,

    /// Unix seconds. Stamped by the vault on insert and update.
    #[serde(rename = "lastUpdate", alias = "LastUpdate")]
    pub updated_at: i64,
}

impl Entry {
    /// Creates an entry with a fresh id and the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut entry = Self {
            name: name.into(),
            ..Self::default()
        };
        entry.generate_id();
        entry
    }

    /// Assigns a new id derived from the nanosecond clock.
    pub fn generate_id(&mut self) {
        self.id = next_id().to_string();
    }

    /// Checks the invariants every stored entry must hold.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !self.uri.is_empty() && !has_host(&self.uri) {
            return Err(ValidationError::InvalidUri(self.uri.clone()));
        }
        Ok(())
    }

    /// Whether the entry carries a TOTP seed.
    pub fn has_otp(&self) -> bool {
        !self.otp_seed.is_empty()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("otp_seed", &if self.has_otp() { "<redacted>" } else { "" })
            .field("group", &self.group)
            .field("comment", &self.comment)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// True for an absolute `scheme://host...` URI with a non-empty host.
///
/// `Url::parse` alone is too lenient here: it strips surrounding whitespace and
/// invents an authority for special schemes written as `http:host` or
/// `http:\\host`. The raw text must already carry `//` after the scheme.
fn has_host(uri: &str) -> bool {
    if uri.trim() != uri {
        return false;
    }
    let Some((_, rest)) = uri.split_once(':') else {
        return false;
    };
    if !rest.starts_with("//") {
        return false;
    }
    Url::parse(uri)
        .ok()
        .and_then(|url| url.host_str().map(|host| !host.is_empty()))
        .unwrap_or(false)
}

fn next_id() -> i64 {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
    let prev = LAST_ID
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
            Some(now.max(prev.saturating_add(1)))
        })
        .unwrap_or_else(|prev| prev);
    now.max(prev.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase() {
        let ids: Vec<i64> = (0..1000).map(|_| next_id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ids_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..500).map(|_| next_id()).collect::<Vec<_>>()))
            .collect();
        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn host_check() {
        assert!(has_host("http://localhost:8081"));
        assert!(has_host("https://example.com/login?next=/"));
        assert!(!has_host("url/bad:"));
        assert!(!has_host("mailto:someone@example.com"));
        assert!(!has_host("localhost:8081"));
        assert!(!has_host("http:example.com"));
        assert!(!has_host("http:/example.com"));
        assert!(!has_host(" http://example.com"));
        assert!(!has_host("http://example.com "));
        assert!(!has_host("https:\\\\example.com"));
        assert!(!has_host("http://"));
    }
}
