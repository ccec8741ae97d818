use std::path::PathBuf;

/// Result type for contact book operations
pub type Result<T> = std::result::Result<T, ContactsError>;

/// Errors raised by the registries, formats, handlers and views
#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    #[error("\"{name}\" is already registered with {registry}")]
    Duplicate { registry: &'static str, name: String },

    #[error("\"{name}\" is not registered with {registry}")]
    NotFound { registry: &'static str, name: String },

    #[error("There is nothing registered with {0} currently")]
    EmptyRegistry(&'static str),

    #[error("There is no reader/writer registered for \"{0}\" format currently")]
    NoHandler(String),

    #[error("\"{handler}\" is already bound to \"{format}\" format")]
    AlreadyBound { handler: String, format: String },

    #[error("\"{handler}\" is not the current reader/writer for \"{format}\" format")]
    NotBound { handler: String, format: String },

    #[error("\"{0}\" is busy with another notification")]
    HandlerBusy(String),

    #[error("Specify an action from {0:?} to perform")]
    MissingAction(&'static [&'static str]),

    #[error("Action \"{0}\" is not supported")]
    UnsupportedAction(String),

    #[error("No records to serialize for \"{0}\"")]
    EmptyData(String),

    #[error("No file path set for \"{0}\"")]
    MissingPath(String),

    #[error("Path for deserialization does not exist: {0:?}")]
    PathNotFound(PathBuf),

    #[error("Invalid contact data: {0}")]
    InvalidData(String),

    #[error("There is no view named \"{0}\" registered currently")]
    UnknownView(String),

    #[error("There is no format named \"{0}\" registered currently")]
    UnknownFormat(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write view output: {0}")]
    Render(#[source] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Binary decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

impl ContactsError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContactsError::Io {
            path: path.into(),
            source,
        }
    }
}
