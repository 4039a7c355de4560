use thiserror::Error;

/// Errors raised by tree and property operations on the document model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("DOM_HIERARCHY_REQUEST: {reason}")]
    HierarchyRequest { reason: &'static str },

    #[error("DOM_NOT_A_CHILD: node is not a child of the given parent")]
    NotAChild,

    #[error("DOM_DETACHED_ANCHOR: anchor node has no parent")]
    DetachedAnchor,

    #[error("DOM_PATH_NOT_FOUND: no node at child-index path {path:?}")]
    PathNotFound { path: Vec<usize> },

    #[error("DOM_NOT_AN_ELEMENT: operation requires an element node")]
    NotAnElement,

    #[error("DOM_NOT_CHARACTER_DATA: operation requires a text or comment node")]
    NotCharacterData,

    #[error("DOM_UNKNOWN_PROPERTY: <{element}> has no property '{name}'")]
    UnknownProperty { element: String, name: String },

    #[error("DOM_INVALID_PROPERTY_VALUE: property '{name}' cannot hold a {found} value")]
    InvalidPropertyValue { name: String, found: &'static str },
}
