use std::fmt;

/// One step in the breadcrumb trail attached to every [`Error`].
///
/// Pushed by the archive as it descends into a field, a container element or
/// a variant alternative, so a failure deep inside a `Transaction` can be
/// reported as `vin[2].key_offsets[0]` rather than a bare message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Field(&'static str),
    Index(usize),
    Alt(&'static str),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, ".{name}"),
            PathStep::Index(i) => write!(f, "[{i}]"),
            PathStep::Alt(name) => write!(f, "::{name}"),
        }
    }
}

/// The full error taxonomy for every archive in this crate family.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of input while reading {0} byte(s)")]
    EndOfInput(usize),

    #[error("failed to write {0} byte(s)")]
    WriteError(usize),

    #[error("archive preamble did not match the expected signature")]
    BadHeader,

    #[error("boost archive tracking flag must be 0, got {0}")]
    UnsupportedTracking(i128),

    #[error("unsupported portable-storage format version {0}, expected 1")]
    UnsupportedFormatVersion(u8),

    #[error("unknown variant tag 0x{0:02x} for `{1}`")]
    UnknownVariantTag(u8, &'static str),

    #[error("unknown rct type {0}")]
    UnknownRctType(u8),

    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("invalid bool byte {0}, expected 0 or 1")]
    InvalidBool(u8),

    #[error("varint overflow: {0}")]
    VarintOverflow(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown tag name `{0}`")]
    UnknownTagName(String),

    #[error("string field was not valid utf-8")]
    InvalidUtf8,

    #[error("portable-storage section key `{0}` exceeds 255 bytes")]
    SectionKeyTooLong(String),

    #[error("tx_extra padding byte must be zero, found 0x{0:02x}")]
    InvalidPadding(u8),

    #[error("tx_extra padding exceeds 255 bytes")]
    PaddingTooLong,
}

/// An [`Error`] together with the breadcrumb that locates it inside the
/// message being walked.
#[derive(Debug, PartialEq, Eq)]
pub struct Traced {
    pub error: Error,
    pub path: Vec<PathStep>,
}

impl Traced {
    pub fn new(error: Error) -> Self {
        Self {
            error,
            path: Vec::new(),
        }
    }

    /// Prepend a path step, innermost-first, as the error unwinds outward.
    #[must_use]
    pub fn with_step(mut self, step: PathStep) -> Self {
        self.path.insert(0, step);
        self
    }
}

impl From<Error> for Traced {
    fn from(error: Error) -> Self {
        Traced::new(error)
    }
}

impl fmt::Display for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if !self.path.is_empty() {
            write!(f, " (at $")?;
            for step in &self.path {
                write!(f, "{step}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for Traced {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

pub type Result<T> = std::result::Result<T, Traced>;

/// Extension trait for attaching a [`PathStep`] to any `Result` in flight.
pub trait Context<T> {
    fn ctx_field(self, name: &'static str) -> Result<T>;
    fn ctx_index(self, index: usize) -> Result<T>;
    fn ctx_alt(self, name: &'static str) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn ctx_field(self, name: &'static str) -> Result<T> {
        self.map_err(|e| e.with_step(PathStep::Field(name)))
    }

    fn ctx_index(self, index: usize) -> Result<T> {
        self.map_err(|e| e.with_step(PathStep::Index(index)))
    }

    fn ctx_alt(self, name: &'static str) -> Result<T> {
        self.map_err(|e| e.with_step(PathStep::Alt(name)))
    }
}
