//! cssmap core - stylesheet path mapping between two source trees
//!
//! Walks a source root for files with a given extension (CSS by default),
//! rewrites each relative path through an ordered list of literal
//! substitutions, and reports the rewritten paths that do not exist under a
//! target root.
//!
//! # Architecture
//!
//! - [`walk`]: lazy, name-ordered enumeration of matching files
//! - [`rename`]: the ordered substitution rules
//! - [`audit`]: candidate mapping, existence checks, and the resulting
//!   [`AuditReport`]
//! - [`report`]: human and JSON rendering
//! - [`config`]: defaults and the optional TOML config file

#![forbid(unsafe_code)]
// Lints configured in Cargo.toml

pub mod audit;
pub mod config;
pub mod error;
pub mod rename;
pub mod report;
pub mod walk;

// Public API
pub use audit::{
    AuditReport,
    MissingEntry,
    PathMapper,
    run_audit,
};
pub use config::AuditConfig;
pub use error::{
    AuditError,
    AuditResult,
};
pub use rename::{
    RenameRule,
    RenameRules,
};
pub use report::{
    OutputFormat,
    render,
    write_report,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
