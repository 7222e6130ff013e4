//! Error types for argument binding

use thiserror::Error;

use crate::schema::ParamKind;

/// Defects in a declared argument schema
///
/// These are raised while the schema table is built, before any token is
/// read. They describe a mistake by the author of the configuration type,
/// not by the user of the program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A parameter declares neither a short nor a long key
    #[error("Both short and long keys are missing for field '{field}'")]
    MissingKeys {
        /// Name of the offending field
        field: String,
    },

    /// The parameter kind cannot bind the field's type
    #[error("Incompatible type '{type_name}' specified for {kind} field '{field}'")]
    IncompatibleFieldType {
        /// Name of the offending field
        field: String,
        /// Declared parameter kind
        kind: ParamKind,
        /// Display name of the field's type
        type_name: String,
    },

    /// Two registrations share the same case-insensitive key
    #[error("Multiple params cannot have the same key: {0}")]
    DuplicateKey(String),
}

/// Failure to convert a literal into the destination type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The literal is not a valid value of the destination type
    #[error("Given value '{value}' should be of type '{type_name}'")]
    InvalidLiteral {
        /// Literal as supplied
        value: String,
        /// Display name of the destination type
        type_name: String,
    },

    /// The literal names no member of the destination enumeration
    #[error("Unknown value '{value}' given. Valid values - [{}]", .members.join(", "))]
    InvalidEnumMember {
        /// Literal as supplied
        value: String,
        /// Valid member names in declaration order
        members: Vec<String>,
    },

    /// At least one element of a list is not a valid value of the element type
    #[error("Given values '{}' should be a list of type '{type_name}'", .values.join(", "))]
    InvalidLiteralList {
        /// Every literal supplied for the list
        values: Vec<String>,
        /// Display name of the element type
        type_name: String,
    },

    /// At least one element of a list names no member of the element enumeration
    #[error(
        "Given list '{}' contains an unknown value. Valid values - [{}]",
        .values.join(", "),
        .members.join(", ")
    )]
    InvalidEnumList {
        /// Every literal supplied for the list
        values: Vec<String>,
        /// Valid member names in declaration order
        members: Vec<String>,
    },
}

impl CoercionError {
    /// Widen a single-element failure into the aggregate form for a list
    ///
    /// The aggregate error lists every literal that was supplied, not only the
    /// one that failed.
    #[must_use]
    pub fn into_list(self, values: &[String]) -> Self {
        match self {
            Self::InvalidLiteral { type_name, .. } => Self::InvalidLiteralList {
                values: values.to_vec(),
                type_name,
            },
            Self::InvalidEnumMember { members, .. } => Self::InvalidEnumList {
                values: values.to_vec(),
                members,
            },
            list @ (Self::InvalidLiteralList { .. } | Self::InvalidEnumList { .. }) => list,
        }
    }
}

/// Errors caused by the supplied command-line tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInputError {
    /// The token is not a parameter, or names no registered key
    #[error("Unrecognized parameter '{0}'.")]
    UnrecognizedParameter(String),

    /// A parameter was supplied more than once
    #[error("Argument '{key}' re-defined with value '{value}'.")]
    DuplicateParameter {
        /// Key exactly as typed the second time
        key: String,
        /// Inline value given the second time (empty if none)
        value: String,
    },

    /// A single-value parameter has no value
    #[error("Value for parameter '{0}' not specified")]
    MissingValue(String),

    /// An array parameter has no elements
    #[error("No values specified for array '{0}'")]
    NoValues(String),

    /// A required parameter never appeared
    #[error("Argument [{0}] is required.")]
    MissingRequiredParameter(String),

    /// A literal could not be converted to the field's type
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Any error produced while building a schema or parsing arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    /// Schema defect
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Bad user input
    #[error(transparent)]
    UserInput(#[from] UserInputError),
}

impl From<CoercionError> for ArgsError {
    fn from(err: CoercionError) -> Self {
        Self::UserInput(UserInputError::Coercion(err))
    }
}

/// Result type for argument binding operations
pub type ArgsResult<T> = Result<T, ArgsError>;
