use thiserror::Error;

use crate::channel::Channel;

pub type PulseResult<T> = Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("unknown time granularity: {0}")]
    UnknownTimeGranularity(String),

    #[error("unknown entity granularity: {0}")]
    UnknownEntityGranularity(String),

    #[error("no credentials configured for channel: {0}")]
    MissingCredentials(Channel),

    #[error("credentials for {provided} cannot authenticate the {expected} channel")]
    CredentialMismatch { expected: Channel, provided: Channel },

    #[error("column not found: {0}")]
    UnknownColumn(String),

    #[error("row has {got} cells but the frame has {expected} columns")]
    RowWidth { expected: usize, got: usize },

    #[error("column has {got} values but the frame has {expected} rows")]
    ColumnLength { expected: usize, got: usize },

    #[error("column {column} holds a non-numeric value at row {row}")]
    NonNumericCell { column: String, row: usize },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failures raised by a channel's API client or reporter, carried
    /// through unmodified.
    #[error(transparent)]
    Reporter(#[from] anyhow::Error),
}
