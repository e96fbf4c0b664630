//! Lookups against merged configuration.

use std::path::Path;

use url::Url;

use crate::config::loader::{ConfigLoader, ConfigLocations, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::parser::{self, ConfigMap};
use crate::error::{Error, Result};
use crate::pattern::PrunePolicy;

/// Key enabling sparse checkout.
pub const SPARSE_CHECKOUT_KEY: &str = "core.sparsecheckout";

/// Key selecting how redundant exclusions are pruned.
pub const PRUNE_POLICY_KEY: &str = "sparsely.prunepolicy";

/// Merged view over every configuration layer.
///
/// All lookups are case-insensitive. A lookup that finds nothing returns
/// `Ok(None)`; `Err` is reserved for invalid arguments.
///
/// # Examples
///
/// ```
/// use sparsely::config::{parse, ConfigLevel, ConfigResolver, ConfigSource};
/// use std::path::PathBuf;
///
/// let resolver = ConfigResolver::from_sources(vec![ConfigSource {
///     level: ConfigLevel::Global,
///     path: PathBuf::from("/home/dev/.gitconfig"),
///     entries: parse("[credential \"example.com\"]\nauthority = basic\n"),
/// }]);
///
/// let found = resolver.get_hierarchical("credential", "https://git.example.com/org/repo", "authority");
/// assert_eq!(found.unwrap(), Some("basic"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    sources: Vec<ConfigSource>,
    values: ConfigMap,
}

impl ConfigResolver {
    /// Load every layer visible from `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read.
    pub fn load(start_dir: &Path) -> Result<Self> {
        Self::from_locations(&ConfigLocations::discover(start_dir))
    }

    /// Load the layers at `locations`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read.
    pub fn from_locations(locations: &ConfigLocations) -> Result<Self> {
        Ok(Self::from_sources(ConfigLoader::load_all(locations)?))
    }

    /// Build a resolver from already-parsed sources, lowest precedence first.
    #[must_use]
    pub fn from_sources(sources: Vec<ConfigSource>) -> Self {
        let values = ConfigMerger::merge(&sources);
        Self { sources, values }
    }

    /// Exact key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is empty.
    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        if key.is_empty() {
            return Err(Error::empty_argument("key"));
        }
        Ok(self.lookup(key))
    }

    /// Look up `prefix.name.suffix`, or `prefix.suffix` when `name` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `prefix` or `suffix` is empty.
    pub fn get_scoped(&self, prefix: &str, name: &str, suffix: &str) -> Result<Option<&str>> {
        require(prefix, "prefix")?;
        require(suffix, "suffix")?;
        Ok(self.lookup(&scoped_key(prefix, name, suffix)))
    }

    /// Look up a setting scoped to a URL or host, falling back to broader scopes.
    ///
    /// For `target` = `https://sub.example.com` the keys tried are
    /// `prefix.https://sub.example.com.suffix`, `prefix.sub.example.com.suffix`,
    /// `prefix.example.com.suffix` and finally `prefix.suffix`. Stripping stops
    /// while two labels remain, so a bare top-level label is never tried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any argument is empty.
    pub fn get_hierarchical(
        &self,
        prefix: &str,
        target: &str,
        suffix: &str,
    ) -> Result<Option<&str>> {
        require(prefix, "prefix")?;
        require(target, "target")?;
        require(suffix, "suffix")?;

        for name in candidate_scopes(target) {
            if let Some(value) = self.lookup(&scoped_key(prefix, &name, suffix)) {
                log::trace!("resolved {prefix}.*.{suffix} for {target} via {name:?}");
                return Ok(Some(value));
            }
        }
        self.get_scoped(prefix, "", suffix)
    }

    /// Boolean lookup using git's spellings.
    ///
    /// Unrecognized values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is empty.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(value) = self.get(key)? else {
            return Ok(None);
        };
        let parsed = parser::parse_bool(value);
        if parsed.is_none() {
            log::debug!("ignoring non-boolean value {value:?} for {key}");
        }
        Ok(parsed)
    }

    /// Whether `core.sparseCheckout` is set to a true value.
    #[must_use]
    pub fn is_sparse_checkout_enabled(&self) -> bool {
        self.lookup(SPARSE_CHECKOUT_KEY)
            .and_then(parser::parse_bool)
            .unwrap_or(false)
    }

    /// The configured [`PrunePolicy`], or the default when unset or invalid.
    #[must_use]
    pub fn prune_policy(&self) -> PrunePolicy {
        match self.lookup(PRUNE_POLICY_KEY).map(str::parse::<PrunePolicy>) {
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                log::warn!("{PRUNE_POLICY_KEY}: {e}; using {}", PrunePolicy::default());
                PrunePolicy::default()
            }
            None => PrunePolicy::default(),
        }
    }

    /// The files that contributed, lowest precedence first.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Every merged entry in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }
}

fn require(value: &str, name: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::empty_argument(name));
    }
    Ok(())
}

fn scoped_key(prefix: &str, name: &str, suffix: &str) -> String {
    if name.is_empty() {
        format!("{prefix}.{suffix}")
    } else {
        format!("{prefix}.{name}.{suffix}")
    }
}

/// Scope names to try for `target`, most specific first.
fn candidate_scopes(target: &str) -> Vec<String> {
    let (scheme, host) = split_target(target);
    if host.is_empty() {
        return Vec::new();
    }

    let mut scopes = Vec::new();
    if let Some(scheme) = scheme {
        scopes.push(format!("{scheme}://{host}"));
    }
    scopes.push(host.clone());

    let labels: Vec<&str> = host.split('.').collect();
    for i in 1..labels.len().saturating_sub(1) {
        scopes.push(labels[i..].join("."));
    }
    scopes
}

/// Split a target into an optional scheme and a lowercase host.
///
/// Without a scheme, any path, user name and port are dropped, so
/// `git@example.com:org/repo` and `example.com:8080` both yield
/// `example.com`.
fn split_target(target: &str) -> (Option<String>, String) {
    if target.contains("://") {
        match Url::parse(target) {
            Ok(url) => {
                let host = url.host_str().unwrap_or_default().to_lowercase();
                return (Some(url.scheme().to_string()), host);
            }
            Err(e) => log::debug!("treating {target:?} as a host name: {e}"),
        }
    }
    (None, bare_host(target).to_lowercase())
}

fn bare_host(target: &str) -> &str {
    let authority = target.split('/').next().unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    host_port.split(':').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::ConfigLevel;
    use crate::config::parser::parse;
    use std::path::PathBuf;

    fn resolver(layers: &[(ConfigLevel, &str)]) -> ConfigResolver {
        ConfigResolver::from_sources(
            layers
                .iter()
                .map(|(level, text)| ConfigSource {
                    level: *level,
                    path: PathBuf::from(format!("/{level}")),
                    entries: parse(text),
                })
                .collect(),
        )
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let r = resolver(&[(ConfigLevel::Local, "[core]\nsparseCheckout = true\n")]);
        assert_eq!(r.get("Core.SparseCheckout").unwrap(), Some("true"));
        assert_eq!(r.get("core.missing").unwrap(), None);
    }

    #[test]
    fn test_empty_arguments_are_rejected() {
        let r = ConfigResolver::default();
        assert!(r.get("").unwrap_err().is_invalid_argument());
        assert!(r.get_scoped("", "x", "y").is_err());
        assert!(r.get_scoped("x", "", "").is_err());
        assert!(r.get_hierarchical("credential", "", "helper").is_err());
        assert!(r.get_bool("").is_err());
    }

    #[test]
    fn test_layered_override() {
        let r = resolver(&[
            (ConfigLevel::System, "[core]\nx = 1\n"),
            (ConfigLevel::Global, "[core]\nx = 2\n"),
        ]);
        assert_eq!(r.get("core.x").unwrap(), Some("2"));
        assert_eq!(r.sources().len(), 2);
    }

    #[test]
    fn test_get_scoped() {
        let r = resolver(&[(
            ConfigLevel::Global,
            "[remote \"origin\"]\nurl = u\n[remote]\nurl = fallback\n",
        )]);
        assert_eq!(r.get_scoped("remote", "origin", "url").unwrap(), Some("u"));
        assert_eq!(r.get_scoped("remote", "", "url").unwrap(), Some("fallback"));
        assert_eq!(r.get_scoped("remote", "upstream", "url").unwrap(), None);
    }

    #[test]
    fn test_hierarchical_prefers_scheme_and_host() {
        let r = resolver(&[(
            ConfigLevel::Global,
            "[credential \"https://sub.example.com\"]\nauthority = scheme\n\
             [credential \"sub.example.com\"]\nauthority = host\n",
        )]);
        assert_eq!(
            r.get_hierarchical("credential", "https://sub.example.com/a/b", "authority").unwrap(),
            Some("scheme")
        );
        assert_eq!(
            r.get_hierarchical("credential", "http://sub.example.com", "authority").unwrap(),
            Some("host")
        );
        assert_eq!(
            r.get_hierarchical("credential", "sub.example.com", "authority").unwrap(),
            Some("host")
        );
    }

    #[test]
    fn test_hierarchical_strips_labels() {
        let r = resolver(&[(ConfigLevel::Global, "[credential \"example.com\"]\nauthority = A\n")]);
        assert_eq!(
            r.get_hierarchical("credential", "sub.example.com", "authority").unwrap(),
            Some("A")
        );
        assert_eq!(
            r.get_hierarchical("credential", "a.b.example.com", "authority").unwrap(),
            Some("A")
        );
        assert_eq!(
            r.get_hierarchical("credential", "example.org", "authority").unwrap(),
            None
        );
    }

    #[test]
    fn test_hierarchical_never_matches_bare_tld() {
        let r = resolver(&[(ConfigLevel::Global, "[credential \"com\"]\nauthority = tld\n")]);
        assert_eq!(
            r.get_hierarchical("credential", "sub.example.com", "authority").unwrap(),
            None
        );

        let with_fallback = resolver(&[(
            ConfigLevel::Global,
            "[credential \"com\"]\nauthority = tld\n[credential]\nauthority = any\n",
        )]);
        assert_eq!(
            with_fallback.get_hierarchical("credential", "sub.example.com", "authority").unwrap(),
            Some("any")
        );
    }

    #[test]
    fn test_hierarchical_host_case() {
        let r = resolver(&[(ConfigLevel::Global, "[credential \"Example.COM\"]\nauthority = A\n")]);
        assert_eq!(
            r.get_hierarchical("credential", "HTTPS://Sub.Example.com/", "authority").unwrap(),
            Some("A")
        );
    }

    #[test]
    fn test_get_bool() {
        let r = resolver(&[(ConfigLevel::Local, "[core]\na = yes\nb = off\nc = sometimes\n")]);
        assert_eq!(r.get_bool("core.a").unwrap(), Some(true));
        assert_eq!(r.get_bool("core.b").unwrap(), Some(false));
        assert_eq!(r.get_bool("core.c").unwrap(), None);
        assert_eq!(r.get_bool("core.d").unwrap(), None);
    }

    #[test]
    fn test_sparse_checkout_flag() {
        assert!(!ConfigResolver::default().is_sparse_checkout_enabled());
        let r = resolver(&[(ConfigLevel::Local, "[core]\nsparseCheckout = true\n")]);
        assert!(r.is_sparse_checkout_enabled());
    }

    #[test]
    fn test_prune_policy() {
        assert_eq!(ConfigResolver::default().prune_policy(), PrunePolicy::KeepBroadest);
        let r = resolver(&[(ConfigLevel::Local, "[sparsely]\nprunePolicy = keep-existing\n")]);
        assert_eq!(r.prune_policy(), PrunePolicy::KeepExisting);
        let bad = resolver(&[(ConfigLevel::Local, "[sparsely]\nprunePolicy = eager\n")]);
        assert_eq!(bad.prune_policy(), PrunePolicy::KeepBroadest);
    }

    #[test]
    fn test_entries_in_key_order() {
        let r = resolver(&[(ConfigLevel::Local, "[b]\nk = 2\n[a]\nk = 1\n")]);
        let keys: Vec<&str> = r.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a.k", "b.k"]);
    }

    #[test]
    fn test_candidate_scopes() {
        assert_eq!(
            candidate_scopes("https://a.b.c.d"),
            ["https://a.b.c.d", "a.b.c.d", "b.c.d", "c.d"]
        );
        assert_eq!(candidate_scopes("localhost"), ["localhost"]);
        assert!(candidate_scopes("file:///tmp/repo").is_empty());
    }

    #[test]
    fn test_hierarchical_bare_target_drops_port_and_path() {
        let r = resolver(&[(ConfigLevel::Global, "[credential \"example.com\"]\nauthority = A\n")]);
        for target in [
            "sub.example.com:8080",
            "example.com/org/repo",
            "git@example.com:org/repo",
            "https://git@sub.example.com:8443/org/repo",
        ] {
            assert_eq!(
                r.get_hierarchical("credential", target, "authority").unwrap(),
                Some("A"),
                "target {target}"
            );
        }
    }

    #[test]
    fn test_bare_host() {
        assert_eq!(bare_host("example.com"), "example.com");
        assert_eq!(bare_host("user@host.example.com:22"), "host.example.com");
        assert_eq!(bare_host("host:org/repo"), "host");
        assert_eq!(bare_host("/just/a/path"), "");
    }
}
