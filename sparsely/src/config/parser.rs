//! Parsing of git-style configuration text.
//!
//! The grammar is a small subset of the git config format:
//!
//! - blank lines and lines starting with `#` or `;` are skipped;
//! - `[name]` and `[name "subname"]` open a section;
//! - `key = value` stores `section.key`, later lines overwriting earlier ones.
//!
//! Keys are stored lowercased so lookups are case-insensitive. Lines that fit
//! none of the forms, including key lines before the first section, are
//! skipped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::pattern::file::strip_bom;

/// Merged or per-file configuration entries, keyed by lowercased full key.
pub type ConfigMap = BTreeMap<String, String>;

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\s*([^\s"\[\]]+)(?:\s+"((?:[^"\\]|\\.)*)")?\s*\]$"#)
        .expect("valid section regex")
});

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9-]*)\s*=\s*(.*)$").expect("valid key regex")
});

/// Parse configuration text into a map of lowercased keys to values.
///
/// # Examples
///
/// ```
/// use sparsely::config::parse;
///
/// let map = parse("[core]\n\tsparseCheckout = true\n[credential \"example.com\"]\n\thelper = store\n");
/// assert_eq!(map.get("core.sparsecheckout").map(String::as_str), Some("true"));
/// assert_eq!(map.get("credential.example.com.helper").map(String::as_str), Some("store"));
/// ```
#[must_use]
pub fn parse(text: &str) -> ConfigMap {
    let mut map = ConfigMap::new();
    let mut section: Option<String> = None;

    for (number, raw) in strip_bom(text).lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(caps) = SECTION_HEADER.captures(line) {
            let mut prefix = caps[1].to_lowercase();
            if let Some(sub) = caps.get(2) {
                prefix.push('.');
                prefix.push_str(&unescape_subsection(sub.as_str()).to_lowercase());
            }
            section = Some(prefix);
            continue;
        }

        let Some(caps) = KEY_VALUE.captures(line) else {
            log::trace!("skipping unrecognized config line {}: {line:?}", number + 1);
            continue;
        };
        let Some(prefix) = section.as_deref() else {
            log::trace!("skipping key outside any section on line {}", number + 1);
            continue;
        };

        let key = format!("{prefix}.{}", caps[1].to_lowercase());
        map.insert(key, trim_quotes(caps[2].trim()).to_string());
    }

    map
}

/// Interpret a value using git's boolean spellings.
///
/// An empty value is `false`. Returns `None` for anything unrecognized.
///
/// # Examples
///
/// ```
/// use sparsely::config::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool(""), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Strip one pair of enclosing double quotes.
fn trim_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn unescape_subsection(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
