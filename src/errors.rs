//! Crate-specific error and result types, plus common conversions.

use ::std::{
    error::Error as StdError,
    fmt::{self, Display},
};

/// Result type returned by fallible functions in this crate.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Boxed underlying error, as produced by a host's input source.
pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// The category of an [`Error`].
///
/// Note that a key without a binding is never an error. Unbound input simply
/// passes through to the next consumer.
#[derive(Clone, Debug, PartialEq, Eq, ::thiserror::Error)]
pub enum ErrorKind {
    /// A raw value did not correspond to any [`KeyCode`].
    ///
    /// [`KeyCode`]: crate::input::keyboard::KeyCode
    #[error("unknown key code {0:#04x}")]
    UnknownKeyCode(u8),

    /// A configuration value was rejected while building a [`Config`].
    ///
    /// [`Config`]: crate::config::Config
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A host-provided keyboard or mouse reader failed to produce a sample.
    #[error("input source failed")]
    InputSource,
}

/// Error type for this crate. The error attempts to capture as much context as
/// possible: the kind of failure, the underlying error of any host-provided
/// collaborator, and a description of what was happening at the time.
#[derive(Debug)]
pub struct Error {
    /// The category of error.
    kind: ErrorKind,

    /// The underlying error reported by a host collaborator, if any.
    source: Option<BoxedError>,

    /// An optional context information which describes what was happening
    /// at the time error.
    context: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            kind,
            source,
            context,
        } = &self;

        if let Some(context) = context {
            write!(f, "{context}\nCaused by:\n    {kind}")?;
        } else {
            write!(f, "{kind}")?;
        }

        if let Some(source) = source {
            write!(f, " ({source})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            source: None,
            context: None,
        }
    }
}

impl Error {
    /// Wraps a failure reported by a host keyboard or mouse reader.
    ///
    /// Reader implementations use this to surface their own errors through
    /// [`InputManager::update`].
    ///
    /// [`InputManager::update`]: crate::input::InputManager::update
    pub fn input_source(source: impl Into<BoxedError>) -> Self {
        Self {
            kind: ErrorKind::InputSource,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the context message attached to the error, if any.
    pub fn context_message(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// A trait which allows context information to be attached to fallible
/// types.
///
/// This is useful to attach high level context information, for example which
/// reader failed during which tick, something that might not be obvious when
/// relying on the host's error alone.
pub trait Context<T> {
    /// Attach a context message to a fallible type and return crate error.
    fn context(self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized;
}

impl<T> Context<T> for Result<T> {
    fn context(mut self, ctx: impl AsRef<str>) -> Result<T>
    where
        Self: Sized,
    {
        if let Err(err) = &mut self {
            err.context = Some(ctx.as_ref().to_owned());
        }
        self
    }
}
