//! Existence probing with a per-run cache

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Answers whether a resolved path exists.
///
/// Implemented for closures so tests can count or fake probes.
pub trait ExistenceProbe {
    fn exists(&mut self, path: &Path) -> bool;
}

impl<F> ExistenceProbe for F
where
    F: FnMut(&Path) -> bool,
{
    fn exists(&mut self, path: &Path) -> bool {
        self(path)
    }
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ExistenceProbe for FsProbe {
    fn exists(&mut self, path: &Path) -> bool {
        path.exists()
    }
}

/// Lookup counters for a [`CachedProbe`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Calls to `exists`
    pub lookups: usize,
    /// Calls that reached the inner probe
    pub probes: usize,
}

impl CacheStats {
    pub fn hits(&self) -> usize {
        self.lookups - self.probes
    }
}

/// Memoizes another probe: each distinct path is probed at most once.
///
/// The cache lives as long as the value, which is one scan.
#[derive(Debug, Default)]
pub struct CachedProbe<P = FsProbe> {
    inner: P,
    cache: HashMap<PathBuf, bool>,
    stats: CacheStats,
}

impl CachedProbe<FsProbe> {
    /// Cache over the real filesystem
    pub fn filesystem() -> Self {
        Self::new(FsProbe)
    }
}

impl<P: ExistenceProbe> CachedProbe<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of distinct paths probed so far
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<P: ExistenceProbe> ExistenceProbe for CachedProbe<P> {
    fn exists(&mut self, path: &Path) -> bool {
        self.stats.lookups += 1;
        if let Some(&known) = self.cache.get(path) {
            return known;
        }

        self.stats.probes += 1;
        let found = self.inner.exists(path);
        log::trace!("probe {} -> {}", path.display(), found);
        self.cache.insert(path.to_path_buf(), found);
        found
    }
}
