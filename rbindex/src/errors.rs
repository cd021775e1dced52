use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

use parking_lot::Mutex;

/// Error kinds for index operations.
///
/// The tree engine itself only ever raises [`ErrorKind::DuplicateKey`] and
/// [`ErrorKind::NotFound`]. The remaining kinds belong to the diagnostics and to
/// the ingestion side of the crate.
///
/// # Examples
///
/// ```rust
/// use rbindex::errors::{ErrorKind, IndexError, IndexResult};
///
/// fn example() -> IndexResult<()> {
///     Err(IndexError::new("key 42 already exists", ErrorKind::DuplicateKey))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::DuplicateKey);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Tree errors
    /// A record with the same key is already stored
    DuplicateKey,
    /// No record is stored under the requested key
    NotFound,

    // Diagnostic errors
    /// A red-black or ordering invariant does not hold
    InvariantViolation,

    // Ingestion errors
    /// A delimited row could not be turned into a record
    MalformedRecord,
    /// Generic IO error
    IOError,
    /// The file was not found
    FileNotFound,
    /// Permission denied for file operation
    PermissionDenied,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DuplicateKey => write!(f, "Duplicate key"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::InvariantViolation => write!(f, "Invariant violation"),
            ErrorKind::MalformedRecord => write!(f, "Malformed record"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
        }
    }
}

/// Error type of the crate.
///
/// `IndexError` carries a message, an [`ErrorKind`], an optional cause and the
/// backtrace captured at construction time.
///
/// # Examples
///
/// ```rust
/// use rbindex::errors::{ErrorKind, IndexError};
///
/// let cause = IndexError::new("disk unplugged", ErrorKind::IOError);
/// let err = IndexError::new_with_cause("catalog load failed", ErrorKind::IOError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct IndexError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<IndexError>>,
    backtrace: Arc<Mutex<Backtrace>>,
}

impl IndexError {
    /// Creates a new `IndexError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        IndexError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Mutex::new(Backtrace::new_unresolved())),
        }
    }

    /// Creates a new `IndexError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: IndexError) -> Self {
        IndexError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Mutex::new(Backtrace::new_unresolved())),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&IndexError> {
        self.cause.as_deref()
    }

    /// Returns `true` if this is a duplicate key rejection.
    pub fn is_duplicate_key(&self) -> bool {
        self.error_kind == ErrorKind::DuplicateKey
    }

    /// Returns `true` if this error reports an absent key.
    pub fn is_not_found(&self) -> bool {
        self.error_kind == ErrorKind::NotFound
    }
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                // symbols are only resolved once somebody prints the trace
                let mut backtrace = self.backtrace.lock();
                backtrace.resolve();
                write!(f, "{}\n{:?}", self.message, *backtrace)
            }
        }
    }
}

impl Error for IndexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

impl From<std::io::Error> for IndexError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        IndexError::new(&format!("IO error: {}", err), error_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_new_creates_error() {
        let error = IndexError::new("key exists", ErrorKind::DuplicateKey);
        assert_eq!(error.message, "key exists");
        assert_eq!(error.error_kind, ErrorKind::DuplicateKey);
        assert!(error.cause.is_none());
    }

    #[test]
    fn index_error_new_with_cause_creates_error() {
        let cause = IndexError::new("unexpected end of file", ErrorKind::IOError);
        let error = IndexError::new_with_cause("load failed", ErrorKind::IOError, cause);
        assert_eq!(error.message(), "load failed");
        assert_eq!(error.cause().map(|c| c.message()), Some("unexpected end of file"));
        assert!(error.source().is_some());
    }

    #[test]
    fn index_error_source_returns_none_when_no_cause() {
        let error = IndexError::new("missing", ErrorKind::NotFound);
        assert!(error.source().is_none());
    }

    #[test]
    fn index_error_display_formats_message_only() {
        let error = IndexError::new("key 7 already exists", ErrorKind::DuplicateKey);
        assert_eq!(format!("{}", error), "key 7 already exists");
    }

    #[test]
    fn index_error_debug_formats_with_cause() {
        let cause = IndexError::new("broken pipe", ErrorKind::IOError);
        let error = IndexError::new_with_cause("load failed", ErrorKind::IOError, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("load failed"));
        assert!(formatted.contains("Caused by:"));
    }

    #[test]
    fn index_error_resolves_backtrace_only_when_printed() {
        let error = IndexError::new("key exists", ErrorKind::DuplicateKey);
        let unresolved = error
            .backtrace
            .lock()
            .frames()
            .iter()
            .all(|frame| frame.symbols().is_empty());
        assert!(unresolved);

        let formatted = format!("{:?}", error);
        assert!(formatted.starts_with("key exists\n"));
    }

    #[test]
    fn kind_predicates() {
        assert!(IndexError::new("dup", ErrorKind::DuplicateKey).is_duplicate_key());
        assert!(IndexError::new("gone", ErrorKind::NotFound).is_not_found());
        assert!(!IndexError::new("gone", ErrorKind::NotFound).is_duplicate_key());
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::DuplicateKey.to_string(), "Duplicate key");
        assert_eq!(ErrorKind::NotFound.to_string(), "Not found");
        assert_eq!(ErrorKind::InvariantViolation.to_string(), "Invariant violation");
        assert_eq!(ErrorKind::MalformedRecord.to_string(), "Malformed record");
    }

    #[test]
    fn io_error_conversion_maps_kinds() {
        let not_found: IndexError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert_eq!(not_found.kind(), &ErrorKind::FileNotFound);

        let denied: IndexError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert_eq!(denied.kind(), &ErrorKind::PermissionDenied);

        let other: IndexError = std::io::Error::other("boom").into();
        assert_eq!(other.kind(), &ErrorKind::IOError);
        assert!(other.message().starts_with("IO error:"));
    }
}
