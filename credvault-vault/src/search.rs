//! Pattern and group search over a vault's entries.

use credvault_model::Entry;
use regex::RegexBuilder;

use crate::{Vault, VaultError, VaultResult};

impl Vault {
    /// Returns the entries whose name, comment or URI matches `pattern`.
    ///
    /// `pattern` is a case-insensitive regular expression; an empty pattern
    /// matches everything. When `no_group` is set only ungrouped entries are
    /// considered and `group` is ignored. Otherwise a non-empty `group` keeps
    /// entries whose group equals it case-insensitively.
    ///
    /// Results are ordered by group with a stable sort, so entries sharing a
    /// group keep their vault order.
    pub fn search_entry(
        &self,
        pattern: &str,
        group: &str,
        no_group: bool,
    ) -> VaultResult<Vec<&Entry>> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| VaultError::Format(format!("invalid search pattern: {e}")))?;
        let group = group.to_lowercase();

        let mut found: Vec<&Entry> = self
            .entries()
            .iter()
            .filter(|entry| in_group(entry, &group, no_group))
            .filter(|entry| {
                re.is_match(&entry.name) || re.is_match(&entry.comment) || re.is_match(&entry.uri)
            })
            .collect();

        found.sort_by(|a, b| a.group.cmp(&b.group));
        Ok(found)
    }
}

/// `group` must already be lowercased.
fn in_group(entry: &Entry, group: &str, no_group: bool) -> bool {
    if no_group {
        entry.group.is_empty()
    } else if !group.is_empty() {
        entry.group.to_lowercase() == group
    } else {
        true
    }
}
