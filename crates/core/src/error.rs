use crate::FieldType;
use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Two field sets of the same type were paired together.
    #[error("duplicate field type: both field sets are {0}")]
    DuplicateFieldType(FieldType),

    /// A compact string parser received an empty or missing string.
    #[error("empty string provided for {0}")]
    EmptyAttribute(&'static str),

    /// This string does not look like `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a full timestamp.
    #[error("invalid datetime component: {0}")]
    InvalidDatetimeComponent(String),

    /// A datetime range does not have one or two values.
    #[error("datetime range must be max 2 values and is {0}")]
    InvalidDatetimeRange(usize),

    /// A datetime value is not a string, an instant, or a tuple of instants.
    #[error("invalid datetime type: {0}")]
    InvalidDatetimeType(String),

    /// A value restricted to a fixed set of literals got something else.
    #[error("invalid {attribute}: {value}, must be one of {expected:?}")]
    InvalidEnumValue {
        /// The attribute that was being parsed.
        attribute: &'static str,

        /// The offending value.
        value: String,

        /// The allowed values.
        expected: &'static [&'static str],
    },

    /// The geometry collaborator reported the intersects geometry as invalid.
    #[error("invalid intersects geometry: {0}")]
    InvalidGeometry(String),

    /// A query operator is neither a canonical name nor a known synonym.
    #[error(
        "operator {0} is not valid, it should be one of {operators:?} or {synonyms:?}",
        operators = crate::query::OPERATORS,
        synonyms = crate::query::SYNONYMS.map(|(s, _)| s)
    )]
    InvalidOperator(String),

    /// A raw value does not match any of the accepted shapes.
    #[error("invalid {attribute}: {message}")]
    InvalidShape {
        /// The attribute that was being parsed.
        attribute: &'static str,

        /// What was wrong with the shape.
        message: String,
    },

    /// A field projection string produced neither includes nor excludes.
    #[error("no fields provided")]
    NoFieldsProvided,

    /// This is not a JSON object.
    #[error("json value is not an object")]
    NotAnObject(serde_json::Value),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// [serde_urlencoded::ser::Error]
    #[error(transparent)]
    SerdeUrlencoded(#[from] serde_urlencoded::ser::Error),

    /// A loosely-typed search has a key that is not a search parameter.
    #[error("unknown search parameter: {0}")]
    UnknownParameter(String),

    /// One or more search parameters failed to validate.
    #[error(
        "{} validation error(s): {}",
        .0.len(),
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Validation(Vec<FieldError>),
}

/// A validation error scoped to a single search parameter.
#[derive(Error, Debug)]
#[error("{field}: {source}")]
pub struct FieldError {
    /// The name of the search parameter, e.g. `sortby`.
    pub field: &'static str,

    /// The underlying error.
    #[source]
    pub source: Error,
}

impl Error {
    pub(crate) fn shape(attribute: &'static str, message: impl ToString) -> Error {
        Error::InvalidShape {
            attribute,
            message: message.to_string(),
        }
    }

    /// Returns the field-scoped errors if this is a validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Search;
    ///
    /// let error = Search::builder("api").sortby("").build().unwrap_err();
    /// assert_eq!(error.field_errors()[0].field, "sortby");
    /// ```
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(errors) => errors,
            _ => &[],
        }
    }
}
