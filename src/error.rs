use thiserror::Error;

/// Failures on the outer surfaces: scenario loading, replay, CLI output.
/// The inference core itself never fails; it degrades to "nothing found".
#[derive(Debug, Error)]
pub enum NarrationError {
    /// File could not be read or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing failed (scenario or config file)
    #[error("YAML parse error ({context}): {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON serialization failed (event output)
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A scenario step referenced a node key that does not exist
    #[error("Unknown node '{key}' referenced by {context}")]
    UnknownNode { key: String, context: String },

    /// A scenario step is well-formed YAML but cannot be replayed
    #[error("Invalid step ({context}): {reason}")]
    InvalidStep { context: String, reason: String },

    /// Two nodes in a scenario share the same key
    #[error("Duplicate node key '{0}'")]
    DuplicateNode(String),
}

pub type Result<T> = std::result::Result<T, NarrationError>;
