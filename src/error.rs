//! Error types for srcset generation

use thiserror::Error;

/// Result type alias for srcset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a srcset
///
/// Width selection itself never fails; every variant here originates at a
/// boundary: the parameter catalog, option parsing, or one of the URL
/// collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// The transform-parameter catalog could not be loaded or parsed
    #[error("Parameter catalog error: {0}")]
    ParameterCatalogError(String),

    /// The URL builder failed to produce a URL
    #[error("Failed to build URL: {0}")]
    UrlBuildError(String),

    /// Hostname resolution failed
    #[error("Hostname resolution failed: {0}")]
    HostnameError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A reserved option carried a value of the wrong shape
    #[error("Invalid option `{key}`: {reason}")]
    OptionError { key: String, reason: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParameterCatalogError(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::UrlBuildError(err.to_string())
    }
}
