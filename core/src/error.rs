//! Error types for argument registration, parsing, and retrieval.
//!
//! Every failure the crate can report is a variant of [`ArgError`]. Errors
//! are raised at the point of detection and abort the current operation;
//! nothing is retried or repaired.

use thiserror::Error;

use crate::ValueKind;

/// Errors raised while declaring, parsing, or reading arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// A token is not of the form `--fullName=value` or `-shortName=value`.
    #[error("argument should be in the form of '--fullName=value' or '-shortName=value', got {0}")]
    MalformedToken(String),

    /// A token or lookup names an argument that was never registered.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// A full or short name was registered twice.
    #[error("multiple definition for {0}")]
    DuplicateDefinition(String),

    /// The same argument was given more than once in one invocation.
    #[error("argument {0} has already been set")]
    DuplicateAssignment(String),

    /// A required argument without a default was not given.
    #[error("required argument {0} is not set")]
    MissingRequiredArgument(String),

    /// An optional argument was not given and has no default to fall back on.
    #[error("argument {0} is not required, but has no default value")]
    MissingDefault(String),

    /// A token could not be converted to the argument's value type.
    #[error("bad cast from string '{token}' to {target}")]
    TypeCast {
        /// The type the token was meant to become.
        target: ValueKind,
        /// The offending token.
        token: String,
    },

    /// A token converted fine but is not one of the permitted values.
    #[error("argument {name} should be in {choices}, got {token}")]
    ChoiceViolation {
        /// Full name of the choice argument.
        name: String,
        /// Rendered permitted set, e.g. `[0.1, 0.01, 0.001]`.
        choices: String,
        /// The offending token.
        token: String,
    },

    /// A value was requested as a different type than it was registered with.
    #[error("argument {name} holds a {actual} value, not {requested}")]
    TypeMismatch {
        /// Full name of the argument.
        name: String,
        /// Type the caller asked for.
        requested: ValueKind,
        /// Type the argument was registered with.
        actual: ValueKind,
    },

    /// Full name does not start with `--` or has nothing after it.
    #[error("invalid full name format: {0}")]
    InvalidFullName(String),

    /// Short name does not start with a single `-` or has nothing after it.
    #[error("invalid short name format: {0}")]
    InvalidShortName(String),

    /// A choice validator was built from an empty permitted set.
    #[error("argument {0} has an empty choice set")]
    EmptyChoiceSet(String),
}

/// Convenience alias for results with [`ArgError`].
pub type Result<T> = std::result::Result<T, ArgError>;
