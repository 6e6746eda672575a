use thiserror::Error;

pub type CuckooResult<T> = std::result::Result<T, CuckooError>;

#[derive(Error, Debug, PartialEq)]
pub enum CuckooError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Bucket count overflow for {expected_items} expected items")]
    CapacityOverflow { expected_items: usize },

    #[error(
        "Insertion abandoned after {kicks} kicks, filter is full \
         (item of {item_len} bytes not stored)"
    )]
    CapacityExhausted { kicks: usize, item_len: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CuckooError {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CuckooError::CapacityExhausted { .. })
    }
}

impl From<serde_json::Error> for CuckooError {
    fn from(err: serde_json::Error) -> Self {
        CuckooError::SerializationError(err.to_string())
    }
}
