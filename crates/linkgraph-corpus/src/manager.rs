//! Corpus discovery: walk the root and collect document paths

use linkgraph_core::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// The set of documents found under one corpus root.
///
/// Discovery happens once, in [`Corpus::open`]. Documents are held in
/// identity order so every consumer iterates the corpus the same way.
#[derive(Debug, Clone)]
pub struct Corpus {
    config: ScanConfig,
    documents: Vec<PathBuf>,
}

impl Corpus {
    /// Walk `config.root` and collect every document.
    ///
    /// A root that cannot be listed is fatal. Subdirectories that cannot
    /// be listed are logged and skipped.
    #[instrument(skip(config), fields(root = ?config.root), name = "corpus_open")]
    pub fn open(config: ScanConfig) -> Result<Self> {
        fs::read_dir(&config.root)
            .map_err(|e| Error::corpus_root(&config.root, e.to_string()))?;

        let mut documents = scan_documents(&config);
        documents.sort_by_cached_key(|path| DocumentId::from_path(&config.root, path));

        log::info!(
            "Found {} documents under {}",
            documents.len(),
            config.root.display()
        );

        Ok(Self { config, documents })
    }

    /// Canonical corpus root
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Absolute document paths, in identity order
    pub fn documents(&self) -> &[PathBuf] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Identity of `path` relative to this corpus
    pub fn identity(&self, path: &Path) -> DocumentId {
        DocumentId::from_path(&self.config.root, path)
    }

    /// Read one document as UTF-8 text.
    #[instrument(skip(self), fields(file = ?path), name = "corpus_read")]
    pub fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(Error::io)
    }
}

fn is_excluded(config: &ScanConfig, entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded_segment(name))
}

fn scan_documents(config: &ScanConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(config, entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        // Symlinked files count; symlinked directories are not followed
        let path = entry.path();
        if !entry.file_type().is_dir() && path.is_file() && config.is_document(path) {
            files.push(path.to_path_buf());
        }
    }

    files
}
