//! Error types for infl-codec

/// Result type for infl-codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A name could not be packed into a Cairo short string
    #[error("Invalid short string '{value}': {reason}")]
    InvalidShortString { value: String, reason: String },

    /// A field value has no felt encoding
    #[error("Invalid value for {record} field '{field}': {reason}")]
    InvalidField {
        record: String,
        field: String,
        reason: String,
    },

    /// A modifier references departments but no management department id was configured
    #[error("Modifier {record} has departments but no management department is configured")]
    MissingManagementDepartment { record: String },

    /// Unknown record kind name
    #[error("Unknown record kind: {name}")]
    UnknownKind { name: String },

    /// A felt literal could not be parsed
    #[error("Invalid felt literal '{value}'")]
    InvalidFelt { value: String },
}

impl Error {
    pub(crate) fn field(
        record: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            record: record.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
