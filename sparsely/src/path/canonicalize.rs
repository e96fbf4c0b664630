//! Canonical text form for stored paths.
//!
//! [`canonicalize`] turns an arbitrary path string into a stable key that is
//! safe to store in a flat file or embed in a URI: edge whitespace removed,
//! lowercase, pattern markers escaped and everything outside the URI
//! unreserved set percent-encoded.
//!
//! The transformation is idempotent. Markers that already carry an escape
//! are left alone, `/` and well-formed `%xx` triplets pass through, and hex
//! digits are emitted in lowercase so a second pass finds nothing to change.

/// Escape character placed in front of special characters.
pub const ESCAPE: char = '\\';

/// Characters that carry meaning at the start of a pattern line.
pub const SPECIAL_CHARS: [char; 2] = ['#', '!'];

/// Produce the canonical form of `raw`.
///
/// Total over all input: empty or whitespace-only strings yield `""`.
///
/// # Examples
///
/// ```
/// use sparsely::path::canonicalize::canonicalize;
///
/// assert_eq!(canonicalize("  Src/Lib  "), "src/lib");
/// assert_eq!(canonicalize("docs/#notes"), "docs/%5c%23notes");
/// assert_eq!(canonicalize("my dir"), "my%20dir");
/// assert_eq!(canonicalize("   "), "");
///
/// let once = canonicalize("Read Me!.txt");
/// assert_eq!(canonicalize(&once), once);
/// ```
#[must_use]
pub fn canonicalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let escaped = escape_special(&lowered);
    percent_encode(&escaped).to_lowercase()
}

/// Escape every special character not already preceded by [`ESCAPE`].
///
/// # Examples
///
/// ```
/// use sparsely::path::canonicalize::escape_special;
///
/// assert_eq!(escape_special("a#b!c"), r"a\#b\!c");
/// assert_eq!(escape_special(r"a\#b"), r"a\#b");
/// ```
#[must_use]
pub fn escape_special(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let mut previous = None;
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) && previous != Some(ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

/// Percent-encode `text`, keeping `/` and existing `%xx` triplets intact.
///
/// Runs between those kept tokens go through `urlencoding`, which leaves
/// only ASCII alphanumerics and `-._~` unencoded.
fn percent_encode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let keep = match bytes[i] {
            b'/' => 1,
            b'%' if is_encoded_triplet(&bytes[i..]) => 3,
            _ => 0,
        };
        if keep == 0 {
            i += 1;
            continue;
        }
        // `/` and `%` are ASCII, so both slice bounds sit on char boundaries.
        out.push_str(&urlencoding::encode(&text[run_start..i]));
        out.push_str(&text[i..i + keep]);
        i += keep;
        run_start = i;
    }
    out.push_str(&urlencoding::encode(&text[run_start..]));
    out
}

fn is_encoded_triplet(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}
