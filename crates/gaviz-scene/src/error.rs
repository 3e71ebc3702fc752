//! Scene error types

use thiserror::Error;

/// Error type for scene and rendering operations
#[derive(Debug, Error)]
pub enum SceneError {
    /// Generic OpenGL failure
    #[error("OpenGL error: {0}")]
    OpenGl(String),

    /// Shader compilation or linking failure
    #[error("Shader error: {0}")]
    Shader(String),

    /// Buffer allocation failure
    #[error("Buffer creation error: {0}")]
    Buffer(String),

    /// `add` was called for a name that is already registered.
    /// Callers that want replace semantics use `update`.
    #[error("Entity '{name}' already exists")]
    DuplicateName {
        /// The conflicting entity name.
        name: String,
    },

    /// The decoded value cannot be drawn (mixed grade, trivector, zero)
    #[error("Value for '{name}' is not drawable")]
    Undrawable {
        /// The entity name the caller tried to add.
        name: String,
    },
}

/// Result type using SceneError
pub type Result<T> = std::result::Result<T, SceneError>;
