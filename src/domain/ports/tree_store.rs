//! TreeStore port - abstraction over the version-controlled file tree
//!
//! The tree store is a hierarchical, revisioned file source (a branch of a
//! version-control repository in production). The pipeline only ever reads
//! from it; paths are store-native strings using `/` separators.

use std::io::{self, Read};

/// Abstract read-only interface to the version-controlled tree
///
/// Implementations:
/// - `MemoryTreeStore` - in-memory, for tests and dry runs
/// - production stores live outside this crate
pub trait TreeStore {
    /// Check if a file or directory exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Check if `path` names a directory
    fn is_directory(&self, path: &str) -> bool;

    /// Full store paths of every file beneath `path`.
    ///
    /// Callers must not rely on the ordering; the resolver sorts the
    /// listing before use.
    fn list_files_recursively(&self, path: &str) -> io::Result<Vec<String>>;

    /// Open a fresh readable stream over the file at `path`
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Revision currently checked out at `root`
    fn current_revision(&self, root: &str) -> io::Result<String>;
}
