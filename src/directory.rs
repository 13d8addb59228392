//! Display name lookup for email addresses.
//!
//! Rendered email links show a person's name when the directory knows the
//! address. Lookups are exact and case-sensitive; an unknown address simply
//! renders as a plain `mailto` link.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Resolves an email address to a person's display name.
pub trait DisplayNameResolver {
    /// Returns the display name for `email`, or `None` if unknown.
    fn display_name(&self, email: &str) -> Option<String>;
}

impl<F> DisplayNameResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn display_name(&self, email: &str) -> Option<String> {
        self(email)
    }
}

/// Resolver that knows nobody.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDirectory;

impl DisplayNameResolver for NoDirectory {
    fn display_name(&self, _email: &str) -> Option<String> {
        None
    }
}

/// In-memory directory backed by an email to name map.
#[derive(Debug, Default, Clone)]
pub struct StaticDirectory {
    names: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a directory from a JSON object mapping addresses to names.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a JSON object of
    /// strings.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read directory file {}", path.display()))?;
        let names: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse directory file {}", path.display()))?;

        tracing::debug!(entries = names.len(), path = %path.display(), "loaded directory");
        Ok(Self { names })
    }

    pub fn insert(&mut self, email: impl Into<String>, name: impl Into<String>) {
        self.names.insert(email.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<E, N> FromIterator<(E, N)> for StaticDirectory
where
    E: Into<String>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (E, N)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(email, name)| (email.into(), name.into()))
                .collect(),
        }
    }
}

impl DisplayNameResolver for StaticDirectory {
    fn display_name(&self, email: &str) -> Option<String> {
        self.names.get(email).cloned()
    }
}

/// Memoises another resolver, misses included.
///
/// Meant for library callers whose underlying resolver is expensive, such
/// as a remote user search, in batch runs where the same people appear in
/// many fields. The command line tool loads a [`StaticDirectory`], whose
/// lookups are already cheap, and does not use it. Not `Sync`.
#[derive(Debug)]
pub struct CachedDirectory<R> {
    inner: R,
    cache: RefCell<HashMap<String, Option<String>>>,
}

impl<R: DisplayNameResolver> CachedDirectory<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct addresses looked up so far.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<R: DisplayNameResolver> DisplayNameResolver for CachedDirectory<R> {
    fn display_name(&self, email: &str) -> Option<String> {
        if let Some(hit) = self.cache.borrow().get(email) {
            return hit.clone();
        }

        let resolved = self.inner.display_name(email);
        tracing::debug!(email, found = resolved.is_some(), "directory lookup");
        self.cache
            .borrow_mut()
            .insert(email.to_string(), resolved.clone());
        resolved
    }
}
