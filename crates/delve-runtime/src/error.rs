use std::fmt;

/// Result type for delve-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Store layer error
    Index(delve_index::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// JSON encoding failed
    Serialization(serde_json::Error),

    /// Configuration error
    Config(String),

    /// An entry was appended while no session was active
    NoActiveSession,

    /// Export format the exporter cannot produce
    UnsupportedFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Serialization(err) => write!(f, "Serialization error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NoActiveSession => {
                write!(f, "No active session: create or load a session first")
            }
            Error::UnsupportedFormat(format) => write!(
                f,
                "Unsupported format: {}. Supported formats: txt, json, markdown, md, pdf",
                format
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serialization(err) => Some(err),
            Error::Config(_) | Error::NoActiveSession | Error::UnsupportedFormat(_) => None,
        }
    }
}

impl From<delve_index::Error> for Error {
    fn from(err: delve_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
