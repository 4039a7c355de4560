//! Child-index paths from a template root to a hole's node.

use crate::dom::{DomError, Handle};

/// Follows `path` from `root`, one child index per step. An empty path
/// resolves to `root` itself.
///
/// # Errors
///
/// Returns [`DomError::PathNotFound`] when an index is out of range.
pub fn resolve(root: &Handle, path: &[usize]) -> Result<Handle, DomError> {
    path.iter().try_fold(root.clone(), |node, &index| {
        node.child(index).ok_or_else(|| DomError::PathNotFound {
            path: path.to_vec(),
        })
    })
}

/// The path that leads from `root` to `node`, if `node` is inside `root`.
pub fn path_of(root: &Handle, node: &Handle) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    let mut current = node.clone();
    while &current != root {
        path.push(current.index_in_parent()?);
        current = current.parent()?;
    }
    path.reverse();
    Some(path)
}
