//! # Linkgraph Core
//!
//! Core data models, error types, and scan configuration for the linkgraph
//! tools. This crate defines the canonical types that all other crates
//! depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Document identities, link candidates and reference records
//! - [`error`] - Error taxonomy and Result alias
//! - [`config`] - Scan configuration and its builder
//! - [`utils`] - JSON/CSV serialization helpers
//!
//! ## Usage Examples
//!
//! ### Document identities
//!
//! ```
//! use linkgraph_core::prelude::*;
//! use std::path::Path;
//!
//! let id = DocumentId::from_path(Path::new("/corpus"), Path::new("/corpus/docs/a.md"));
//! assert_eq!(id.as_str(), "docs/a.md");
//! assert_eq!(id.base_name(), "a.md");
//! ```
//!
//! ### Error Handling
//!
//! ```
//! use linkgraph_core::prelude::*;
//!
//! fn scan() -> Result<()> {
//!     Err(Error::corpus_root("/missing", "not found"))
//! }
//!
//! assert!(scan().unwrap_err().is_fatal());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use utils::{CSVBuilder, csv_quote, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ResolutionPolicy, ScanConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        DocumentId, IgnoreReason, LineIndex, LinkCandidate, Reference, ReferenceStatus,
        SourcePosition,
    };
}
