use thiserror::Error;

/// Convenience result type for the whole crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type shared by the data model, the format readers, and the renderers.
///
/// Ingestion errors (`SchemaMismatch`, `MalformedValue`, `StreamUnavailable`, and the
/// decoder wrappers) are fatal to the single source being read, never to the run.
/// `NotFound` is only returned by accessors and signals a caller-level mistake.
#[derive(Debug, Error)]
pub enum Error {
    /// Header, column count, or column-mapping mismatch for the selected format.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A field could not be parsed as the expected year/number.
    #[error("malformed value at row {row} field '{field}': {message} (raw='{raw}')")]
    MalformedValue {
        row: usize,
        field: String,
        raw: String,
        message: String,
    },

    /// Lookup of an area, name, measure, year or dataset that is not present.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed caller input, e.g. a language code that is not three letters.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The source could not be opened, read, or was empty.
    #[error("stream unavailable: {source_name}: {reason}")]
    StreamUnavailable { source_name: String, reason: String },

    /// Low-level CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Low-level JSON decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(
        row: usize,
        field: &str,
        raw: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::MalformedValue {
            row,
            field: field.to_owned(),
            raw: raw.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unavailable(source_name: &str, reason: impl Into<String>) -> Self {
        Error::StreamUnavailable {
            source_name: source_name.to_owned(),
            reason: reason.into(),
        }
    }
}
