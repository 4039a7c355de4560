//! Template error types

use std::fmt;

/// Errors raised while turning template source into a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A brace in the source is neither `{}`, `{{` nor `}}`
    MalformedSource {
        /// Byte offset of the offending brace
        offset: usize,
        /// What was expected there
        message: &'static str,
    },

    /// The parsed markup lost a hole marker (for example a hole inside an
    /// attribute value or between `<` and the tag name)
    UnresolvedHole {
        /// Index of the first hole that was not found
        index: usize,
        /// Number of holes in the source
        holes: usize,
    },

    /// The HTML parser did not produce a usable tree
    ParseFailed {
        /// Error message
        message: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MalformedSource { offset, message } => {
                write!(f, "TEMPLATE_MALFORMED: at byte {}: {}", offset, message)
            }
            TemplateError::UnresolvedHole { index, holes } => {
                write!(
                    f,
                    "TEMPLATE_UNRESOLVED_HOLE: hole {} of {} is not in an attribute name or content position",
                    index, holes
                )
            }
            TemplateError::ParseFailed { message } => {
                write!(f, "TEMPLATE_PARSE_FAILED: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}
