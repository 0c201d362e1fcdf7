use thiserror::Error;

/// Errors surfaced by the registry and the pipeline.
///
/// Registration failures (`MissingField`, `Pattern`, `Flag`) affect only the
/// failing call; the registry is left untouched. `Match` and `Render` abort
/// the `parse` call that hit them - there is no partially-converted output.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A definition was submitted without a name, pattern, or render function.
    #[error("transform must have a name, a pattern, and a render function")]
    MissingField,

    /// The pattern failed to compile.
    #[error("invalid pattern for transform `{name}`: {message}")]
    Pattern { name: String, message: String },

    /// A flags string contained a letter other than `g`, `m`, `i`, or `s`.
    #[error("unknown matching flag `{0}`")]
    Flag(char),

    /// The regex engine gave up mid-scan, e.g. the backtrack limit was hit.
    #[error("matching failed for transform `{name}`: {message}")]
    Match { name: String, message: String },

    /// A render function returned an error; it propagates unmodified.
    #[error("render function for transform `{name}` failed: {cause}")]
    Render { name: String, cause: anyhow::Error },
}

impl TransformError {
    pub(crate) fn pattern(name: &str, error: &fancy_regex::Error) -> Self {
        Self::Pattern {
            name: name.to_string(),
            message: error.to_string(),
        }
    }

    pub(crate) fn match_failure(name: &str, error: &fancy_regex::Error) -> Self {
        Self::Match {
            name: name.to_string(),
            message: error.to_string(),
        }
    }
}
