//! Error types for markup rendering.

/// A token opened like a bracket-pipe link but did not split into
/// exactly one label and one URL.
///
/// Rendering the value that contains it is abandoned; callers decide
/// whether to skip the record or stop the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{token}' looks like a bracket-pipe link but isn't")]
pub struct InvalidMarkupError {
    token: String,
}

impl InvalidMarkupError {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Offending token, brackets included.
    pub fn token(&self) -> &str {
        &self.token
    }
}
