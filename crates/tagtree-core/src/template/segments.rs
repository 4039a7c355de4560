//! Splitting template source into static segments.
//!
//! `{}` marks a hole, `{{` and `}}` are literal braces. The segments are
//! the text between holes, so a source with `n` holes yields `n + 1`
//! segments.

use super::error::TemplateError;

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Text,
    SeenOpen { offset: usize },
    SeenClose { offset: usize },
}

/// Splits `source` at every hole.
///
/// # Errors
///
/// Returns [`TemplateError::MalformedSource`] for a lone `{` or `}`.
pub fn split(source: &str) -> Result<Vec<String>, TemplateError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Text;

    for (offset, ch) in source.char_indices() {
        state = match (state, ch) {
            (ScanState::Text, '{') => ScanState::SeenOpen { offset },
            (ScanState::Text, '}') => ScanState::SeenClose { offset },
            (ScanState::Text, c) => {
                current.push(c);
                ScanState::Text
            }
            (ScanState::SeenOpen { .. }, '{') => {
                current.push('{');
                ScanState::Text
            }
            (ScanState::SeenOpen { .. }, '}') => {
                segments.push(std::mem::take(&mut current));
                ScanState::Text
            }
            (ScanState::SeenOpen { offset }, _) => {
                return Err(TemplateError::MalformedSource {
                    offset,
                    message: "expected `{}` for a hole or `{{` for a literal brace",
                });
            }
            (ScanState::SeenClose { .. }, '}') => {
                current.push('}');
                ScanState::Text
            }
            (ScanState::SeenClose { offset }, _) => {
                return Err(TemplateError::MalformedSource {
                    offset,
                    message: "unmatched `}`, write `}}` for a literal brace",
                });
            }
        };
    }

    match state {
        ScanState::Text => {
            segments.push(current);
            Ok(segments)
        }
        ScanState::SeenOpen { offset } => Err(TemplateError::MalformedSource {
            offset,
            message: "source ends inside `{`",
        }),
        ScanState::SeenClose { offset } => Err(TemplateError::MalformedSource {
            offset,
            message: "unmatched `}`, write `}}` for a literal brace",
        }),
    }
}
