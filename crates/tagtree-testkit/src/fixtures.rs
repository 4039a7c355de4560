//! File fixtures
//!
//! Helpers for laying out template and value files for CLI tests.

use std::path::{Path, PathBuf};

/// A card template with class, heading and list holes.
pub const CARD_TEMPLATE: &str = "<article class={}>\n  <h2>{}</h2>\n  <ul>{}</ul>\n</article>\n";

/// Writes `contents` to `dir/name`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}
