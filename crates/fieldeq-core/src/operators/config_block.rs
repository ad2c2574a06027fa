//! Flat key/value configuration blocks
//!
//! Parses the body of an INI-style file that has a single implicit section:
//!
//! ```text
//! # comment
//! dataDir=/data
//! cluster_partition_handling = pause_minority
//! motd: first line
//!     continued line
//! ```
//!
//! Keys are case-insensitive and stored lowercased; values keep their case
//! and are stripped of surrounding whitespace. Blank lines inside a
//! continued value are kept; a comment line ends it. No interpolation is
//! done.

use std::collections::BTreeMap;
use thiserror::Error;

/// Why a block could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigBlockError {
    #[error("line {line}: no '=' or ':' delimiter")]
    MissingDelimiter { line: usize },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: duplicate key '{key}'")]
    DuplicateKey { line: usize, key: String },

    #[error("line {line}: section headers are not allowed in a flat block")]
    SectionHeader { line: usize },
}

/// Parsed key/value pairs, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigBlock {
    entries: BTreeMap<String, String>,
}

impl ConfigBlock {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every entry of `self` appears in `other` with the same value
    pub fn is_subset_of(&self, other: &ConfigBlock) -> bool {
        self.entries
            .iter()
            .all(|(key, value)| other.entries.get(key) == Some(value))
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Parse a flat configuration block
///
/// # Errors
///
/// Returns the first offending line: a line with no delimiter, an empty key,
/// a key seen twice, or a `[section]` header.
pub fn parse_config_block(text: &str) -> Result<ConfigBlock, ConfigBlockError> {
    let mut entries: BTreeMap<String, String> = BTreeMap::new();
    // Key and indentation of the entry that may still receive continuation lines
    let mut open: Option<(String, usize)> = None;
    // Blank lines seen since the open entry's last line
    let mut blanks = 0;

    for (index, raw) in text.split('\n').enumerate() {
        let line_no = index + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim();

        if trimmed.is_empty() {
            blanks += 1;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            open = None;
            continue;
        }

        let indent = indent_of(line);
        if let Some((key, entry_indent)) = &open {
            if indent > *entry_indent {
                if let Some(value) = entries.get_mut(key) {
                    value.extend(std::iter::repeat('\n').take(blanks + 1));
                    value.push_str(trimmed);
                }
                blanks = 0;
                continue;
            }
        }
        blanks = 0;

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            return Err(ConfigBlockError::SectionHeader { line: line_no });
        }

        let delimiter = trimmed
            .find(&['=', ':'][..])
            .ok_or(ConfigBlockError::MissingDelimiter { line: line_no })?;
        let key = trimmed[..delimiter].trim().to_lowercase();
        let value = trimmed[delimiter + 1..].trim().to_string();

        if key.is_empty() {
            return Err(ConfigBlockError::EmptyKey { line: line_no });
        }
        if entries.contains_key(&key) {
            return Err(ConfigBlockError::DuplicateKey { line: line_no, key });
        }

        entries.insert(key.clone(), value);
        open = Some((key, indent));
    }

    Ok(ConfigBlock { entries })
}
