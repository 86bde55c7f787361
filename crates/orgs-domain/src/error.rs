//! Error handling types

use crate::value_objects::ValidationErrors;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the organisations service
#[derive(Error, Debug)]
pub enum Error {
    /// Command failed shape validation or a uniqueness check
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Resource not found error
    #[error("resource of type '{resource}' with ID '{id}' not found")]
    NotFound {
        /// The kind of resource that was looked up
        resource: String,
        /// The identifier (or unique value) that was looked up
        id: String,
    },

    /// The resource is being mutated elsewhere
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflict
        message: String,
    },

    /// Lock acquisition retries were exhausted
    #[error("could not claim lock '{key}' after {attempts} attempt(s): {reason}")]
    LockNotClaimed {
        /// The lock key that could not be claimed
        key: String,
        /// How many attempts were made
        attempts: u32,
        /// Why the last attempt failed
        reason: String,
        /// The last error returned by the lock service, if any
        #[source]
        source: Option<Box<Error>>,
    },

    /// One or more batches of a synchronization run failed
    #[error("{} batch(es) failed to sync", errors.len())]
    SyncFailed {
        /// Every batch error, in completion order
        errors: Vec<Error>,
    },

    /// The operation was cancelled before it could complete
    #[error("Operation cancelled: {operation}")]
    Cancelled {
        /// The operation that was cancelled
        operation: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error (lock service connectivity)
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database-related error (document store)
    #[error("Database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Discriminant of [`Error`], for exhaustive matching by callers that
/// translate errors into responses or exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    LockNotClaimed,
    SyncFailed,
    Cancelled,
    InvalidArgument,
    Serialization,
    Io,
    Configuration,
    Network,
    Database,
    Infrastructure,
    Internal,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::LockNotClaimed { .. } => ErrorKind::LockNotClaimed,
            Self::SyncFailed { .. } => ErrorKind::SyncFailed,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Json { .. } => ErrorKind::Serialization,
            Self::Io { .. } => ErrorKind::Io,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Network { .. } => ErrorKind::Network,
            Self::Database { .. } => ErrorKind::Database,
            Self::Infrastructure { .. } => ErrorKind::Infrastructure,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Whether this is a typed not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The grouped batch errors, when this is a failed sync
    pub fn grouped(&self) -> &[Error] {
        match self {
            Self::SyncFailed { errors } => errors,
            _ => &[],
        }
    }
}

// Domain error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(operation: S) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Group batch errors into a single sync failure
    pub fn sync_failed(errors: Vec<Error>) -> Self {
        Self::SyncFailed { errors }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
