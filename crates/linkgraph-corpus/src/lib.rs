//! # Linkgraph Corpus
//!
//! Everything that touches the corpus on disk:
//!
//! - [`Corpus`]: walks the root once and lists documents in identity order,
//!   skipping hidden and excluded segments
//! - [`resolve_reference`]: turns a raw target into an absolute path,
//!   lexically
//! - [`ExistenceProbe`] / [`CachedProbe`]: answers "does this path exist",
//!   probing each distinct path at most once per run
//!
//! ## Example
//!
//! ```no_run
//! use linkgraph_core::ScanConfig;
//! use linkgraph_corpus::{CachedProbe, Corpus, ExistenceProbe, resolve_reference};
//!
//! let config = ScanConfig::builder("./docs").build()?;
//! let corpus = Corpus::open(config)?;
//! let mut probe = CachedProbe::filesystem();
//!
//! for doc in corpus.documents() {
//!     let target = resolve_reference("./index.md", doc)?;
//!     println!("{} -> {}", corpus.identity(doc), probe.exists(&target));
//! }
//! # Ok::<(), linkgraph_core::Error>(())
//! ```

pub mod manager;
pub mod probe;
pub mod resolver;

pub use manager::Corpus;
pub use probe::{CacheStats, CachedProbe, ExistenceProbe, FsProbe};
pub use resolver::{normalize_lexically, resolve_reference, strip_file_scheme, strip_fragment};

pub use linkgraph_core::{Error, Result};
