/// Convenience result type used across tickframe.
pub type TickframeResult<T> = Result<T, TickframeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TickframeError {
    /// Invalid caller-provided geometry, color, tick bounds or keyframe parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown shape identifier, or a tick that matches no keyframe.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed line in the textual animation format.
    #[error("parse error at line {line}: {msg}")]
    Parse {
        /// 1-based line number of the offending input.
        line: usize,
        /// Human-readable reason.
        msg: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TickframeError {
    /// Build a [`TickframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TickframeError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`TickframeError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// Build a [`TickframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Shorthand for the "no shape with this id" condition shared by every lookup.
    pub(crate) fn unknown_shape(id: &str) -> Self {
        Self::NotFound(format!("no shape with id '{id}'"))
    }

    /// True for [`TickframeError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for [`TickframeError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
