//! Error types for hero-core.
//!
//! The engine has a deliberately small failure surface:
//!
//! - **Malformed documents** are fatal: no partial character is produced.
//! - **Missing or invalid attributes** are never errors; the accessor
//!   substitutes per-field defaults.
//! - **Unknown type codes** are never errors; parsers fall back to generic
//!   definitions.
//!
//! Editing operations on entry lists report [`LinkError`] when an id
//! reference cannot be honoured.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input, should not be retried without changes.
    Validation,

    /// The document cannot be processed at all.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Errors surfaced by parsing and by the content loaders.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HeroError {
    /// The root document cannot be parsed at all.
    #[error("malformed character document: {reason}")]
    MalformedDocument { reason: String },

    /// The root element is not a character record.
    #[error("unexpected root element '{0}', expected CHARACTER, HERO or RULES")]
    UnexpectedRoot(String),

    /// Definition data (power or modifier tables) could not be decoded.
    #[error("invalid definition data in {source_name}: {reason}")]
    DefinitionData { source_name: String, reason: String },
}

impl HeroError {
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::MalformedDocument {
            reason: reason.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedDocument { .. } | Self::UnexpectedRoot(_) => ErrorSeverity::Fatal,
            Self::DefinitionData { .. } => ErrorSeverity::Validation,
        }
    }

    /// Stable identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedDocument { .. } => "HERO_MALFORMED_DOCUMENT",
            Self::UnexpectedRoot(_) => "HERO_UNEXPECTED_ROOT",
            Self::DefinitionData { .. } => "HERO_DEFINITION_DATA",
        }
    }
}

/// Errors from id-linked edits on an entry list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("no entry with id '{0}'")]
    UnknownEntry(String),

    #[error("an entry with id '{0}' already exists")]
    DuplicateId(String),

    #[error("entry '{id}' references missing parent '{parent_id}'")]
    DanglingParent { id: String, parent_id: String },
}

impl LinkError {
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}
