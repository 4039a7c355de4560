use thiserror::Error;

use crate::dom::DomError;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum TagtreeError {
    // Template errors
    #[error(transparent)]
    Template(#[from] TemplateError),

    // Document errors
    #[error(transparent)]
    Dom(#[from] DomError),

    // Binding errors
    #[error("ARITY_MISMATCH: template has {expected} holes but {actual} values were given")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("INVALID_BINDING_TARGET: cannot bind '{name}' on <{element}>: {reason}")]
    InvalidBindingTarget {
        element: String,
        name: String,
        reason: &'static str,
    },

    #[error("INVALID_BINDING_VALUE: a {binding} binding cannot take a {found} value")]
    InvalidBindingValue {
        binding: &'static str,
        found: &'static str,
    },

    #[error("INVALID_LIST_ITEM: list item {index} is a {found}, expected a hole, node or primitive")]
    InvalidListItem { index: usize, found: &'static str },

    // Render errors
    #[error("REENTRANT_RENDER: container is already being rendered into")]
    ReentrantRender,

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TagtreeError>;
