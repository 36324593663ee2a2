//! Error types for capnparquet.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::node::NodeId;

/// The main error type for capnparquet operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unresolved node reference error.
    #[must_use]
    pub fn unresolved_node(id: NodeId, referrer: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedNode {
            id,
            referrer: referrer.into(),
        })
    }

    /// Creates an invalid target schema error.
    #[must_use]
    pub fn invalid_schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSchema {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Creates a missing root schema error.
    #[must_use]
    pub fn missing_root(file: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRoot(file.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A node id referenced by another node is not in the graph.
    #[error("unresolved node reference @{id:#x} from {referrer}")]
    UnresolvedNode {
        /// The id that could not be resolved.
        id: NodeId,
        /// Description of where the reference was found.
        referrer: String,
    },

    /// A referenced node exists but has the wrong kind.
    #[error("node @{id:#x} is not a {expected}")]
    WrongNodeKind {
        /// The offending node id.
        id: NodeId,
        /// The kind the reference requires.
        expected: &'static str,
    },

    /// The Parquet schema validator rejected a node.
    #[error("invalid parquet schema at '{path}': {message}")]
    InvalidSchema {
        /// Dotted path of the rejected node.
        path: String,
        /// What rule was violated.
        message: String,
    },

    /// No schema-named struct was found to act as the message root.
    #[error("no root schema found in {0} (annotate a struct with $schema)")]
    MissingRoot(String),

    /// A target schema node was assigned twice.
    #[error("target schema already set for AST node {0}")]
    TargetAlreadySet(String),

    /// Request decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Requested file being converted.
    pub file: Option<String>,
    /// Declarations enclosing the failure, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "in {file}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias using capnparquet's Error.
pub type Result<T> = std::result::Result<T, Error>;
