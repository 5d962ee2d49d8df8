use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::Path;

use crate::safeint::ArithmeticError;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of every failure the splitter can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    SuffixExhausted,
    UnknownSize,
    IsDirectory,
    InsufficientSpace,
    ArithmeticOverflow,
    DivisionByZero,
    Io,
    Syntax,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::SuffixExhausted => "suffix_exhausted",
            ErrorKind::UnknownSize => "unknown_size",
            ErrorKind::IsDirectory => "is_directory",
            ErrorKind::InsufficientSpace => "insufficient_space",
            ErrorKind::ArithmeticOverflow => "arithmetic_overflow",
            ErrorKind::DivisionByZero => "division_by_zero",
            ErrorKind::Io => "io",
            ErrorKind::Syntax => "syntax",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct SplitError {
    kind: ErrorKind,
    message: String,
    cause: Option<Cause>,
}

impl SplitError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), cause: None }
    }

    pub fn with_cause<E>(kind: ErrorKind, message: impl Into<String>, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { kind, message: message.into(), cause: Some(Box::new(cause)) }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub(crate) fn io(action: &str, path: &Path, err: io::Error) -> Self {
        Self::with_cause(ErrorKind::Io, format!("failed to {}: {}", action, path.display()), err)
    }
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.message, cause),
            None => f.write_str(&self.message),
        }
    }
}

impl StdError for SplitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}

impl From<ArithmeticError> for SplitError {
    fn from(err: ArithmeticError) -> Self {
        let kind = match err {
            ArithmeticError::Overflow { .. } => ErrorKind::ArithmeticOverflow,
            ArithmeticError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
        };
        Self::with_cause(kind, "arithmetic error", err)
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
