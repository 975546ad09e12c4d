/// Convenience result type used across storyreel.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy used by the composition APIs.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Malformed or inconsistent story document.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A placement references a character id missing from the registry.
    #[error("unknown character: '{0}'")]
    UnknownCharacter(String),

    /// A scene references a background id missing from the palette.
    #[error("unknown background: '{0}'")]
    UnknownBackground(String),

    /// Frame query outside the composed timeline.
    #[error("frame {frame} is out of range (timeline has {total} frames)")]
    OutOfRange {
        /// Requested global frame.
        frame: u64,
        /// Total timeline length in frames.
        total: u64,
    },

    /// Errors when serializing or deserializing story documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while exporting or rasterizing a frame.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`StoryError::UnknownCharacter`] value.
    pub fn unknown_character(id: impl Into<String>) -> Self {
        Self::UnknownCharacter(id.into())
    }

    /// Build a [`StoryError::UnknownBackground`] value.
    pub fn unknown_background(id: impl Into<String>) -> Self {
        Self::UnknownBackground(id.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`StoryError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
