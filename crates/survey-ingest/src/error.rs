use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IngestError {
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no recognizable {field} column and no fallback was supplied")]
    MissingColumn { path: PathBuf, field: &'static str },

    #[error("invalid number {value:?} in column {column} at line {line}")]
    InvalidNumber {
        column: String,
        value: String,
        line: u64,
    },

    #[error("invalid survey year {value:?} at line {line}")]
    InvalidYear { value: String, line: u64 },
}

impl IngestError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
