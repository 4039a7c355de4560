//! Test utilities for tagtree
//!
//! This crate provides shared testing utilities used across the tagtree workspace:
//! scratch directories, a mounted renderer, mutation probes and small DOM
//! readers that keep assertions short.

pub mod dom;
pub mod fixtures;

pub use dom::{Mounted, MutationProbe, element_children, mount, mount_with_config, texts};
pub use fixtures::write_file;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This keeps all test temporary files in a single location that is
/// gitignored and easy to clean up manually if needed.
///
/// # Returns
///
/// A `TempDir` instance that automatically cleans up on drop.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use tagtree_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("card.html");
/// std::fs::write(&file_path, "<p>{}</p>").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
