use crate::cuckoo::CuckooError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommandError>;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Missing header, expected `<label> <expectedItemCount>`")]
    MissingHeader,

    #[error("Invalid expected item count '{value}': {error}")]
    InvalidItemCount { value: String, error: String },

    #[error("Unknown operation '{op}' in record {record}")]
    UnknownOperation { record: usize, op: String },

    #[error("Filter error: {0}")]
    Filter(#[from] CuckooError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
