//! Redundancy checks between two patterns.
//!
//! A pattern `minor` is subsumed by `major` when every path `minor` matches
//! is matched by `major` too, which makes `minor` redundant next to it. The
//! check walks both patterns segment by segment using ignore-file wildcard
//! rules: `*` matches exactly one segment and `**` matches zero or more.
//!
//! The predicate only answers `true` when coverage is certain. Wildcards
//! inside a segment (`*.log`) are compared literally, and a wildcard on the
//! minor side is only covered by an equal or broader wildcard on the major
//! side, so some redundancies go undetected but none are invented.

use super::types::{Pattern, SEPARATOR};

/// Wildcard matching exactly one segment.
pub const SINGLE_WILDCARD: &str = "*";

/// Wildcard matching zero or more segments.
pub const MULTI_WILDCARD: &str = "**";

/// Whether every path matched by `minor` is also matched by `major`.
///
/// Equal lines always subsume each other. Empty lines and comments never
/// take part. A major pattern of just `*` subsumes everything.
///
/// Otherwise the predicate holds when the walk consumes every segment of
/// `minor` while whatever is left of `major` is `**`, or when `major` runs
/// out after matching a leading run of `minor`, since a directory pattern
/// covers everything beneath it.
///
/// # Examples
///
/// ```
/// use sparsely::pattern::{is_subsumed, Pattern};
///
/// let p = Pattern::parse;
/// assert!(is_subsumed(&p("a/**"), &p("a/b/c")));
/// assert!(is_subsumed(&p("a/*/c"), &p("a/b/c")));
/// assert!(!is_subsumed(&p("a/*/c"), &p("a/b/d/c")));
/// assert!(is_subsumed(&p("*"), &p("!anything/at/all")));
/// ```
#[must_use]
pub fn is_subsumed(major: &Pattern, minor: &Pattern) -> bool {
    if major.as_str() == minor.as_str() {
        return true;
    }
    if !major.is_pattern() || !minor.is_pattern() {
        return false;
    }
    if major.pattern_text() == SINGLE_WILDCARD {
        return true;
    }

    let major_segments: Vec<&str> = major.pattern_text().split(SEPARATOR).collect();
    let minor_segments: Vec<&str> = minor.pattern_text().split(SEPARATOR).collect();
    walk(&major_segments, &minor_segments)
}

fn walk(major: &[&str], minor: &[&str]) -> bool {
    let (mut a, mut b) = (0, 0);

    while a < major.len() && b < minor.len() {
        let (seg_a, seg_b) = (major[a], minor[b]);

        if covers(seg_a, seg_b) {
            a += 1;
            b += 1;
        } else if seg_a == MULTI_WILDCARD {
            // Step past `**` only once its successor lines up with minor.
            match major.get(a + 1) {
                Some(next) if covers(next, seg_b) => a += 1,
                Some(_) => b += 1,
                None => b = minor.len(),
            }
        } else {
            // A literal major segment cannot cover a different literal, and
            // a minor-side wildcard reaches segments a literal never matches.
            return false;
        }
    }

    if b == minor.len() {
        return major[a..].iter().all(|seg| *seg == MULTI_WILDCARD);
    }
    a == major.len()
}

/// Whether a single major segment matches everything a minor segment does.
fn covers(major: &str, minor: &str) -> bool {
    major == minor || (major == SINGLE_WILDCARD && minor != MULTI_WILDCARD)
}


#[cfg(all(test, feature = "property-tests"))]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[a-z]{1,6}",
            1 => Just(SINGLE_WILDCARD.to_string()),
            1 => Just(MULTI_WILDCARD.to_string()),
        ]
    }

    fn pattern_line() -> impl Strategy<Value = String> {
        (any::<bool>(), prop::collection::vec(segment(), 1..6)).prop_map(|(negate, parts)| {
            let body = parts.join("/");
            if negate {
                format!("!{body}")
            } else {
                body
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 2000,
            .. ProptestConfig::default()
        })]

        // Every pattern subsumes itself.
        #[test]
        fn subsumption_reflexive(line in pattern_line()) {
            let p = Pattern::parse(&line);
            prop_assert!(is_subsumed(&p, &p));
        }

        // `*` subsumes every inclusion and exclusion pattern.
        #[test]
        fn star_is_universal(line in pattern_line()) {
            let star = Pattern::parse(SINGLE_WILDCARD);
            prop_assert!(is_subsumed(&star, &Pattern::parse(&line)));
        }

        // A literal directory covers anything written beneath it.
        #[test]
        fn literal_prefix_covers_children(
            base in prop::collection::vec("[a-z]{1,6}", 1..4),
            rest in prop::collection::vec("[a-z]{1,6}", 1..4),
        ) {
            let major = Pattern::parse(&base.join("/"));
            let minor = Pattern::parse(&format!("{}/{}", base.join("/"), rest.join("/")));
            prop_assert!(is_subsumed(&major, &minor));
            prop_assert!(!is_subsumed(&minor, &major));
        }

        // The walk terminates and never panics on arbitrary text.
        #[test]
        fn walk_total(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            let _ = is_subsumed(&Pattern::parse(&a), &Pattern::parse(&b));
        }
    }
}
