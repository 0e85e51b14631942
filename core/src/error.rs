use thiserror::Error;

#[derive(Error, Debug)]
pub enum HallError {
    #[error("Invalid seat ID: {seat}.")]
    InvalidSeat { seat: String },

    #[error("Seat {seat} is already booked by {holder}.")]
    AlreadyBooked { seat: String, holder: String },

    #[error("Backing store {path} is corrupt: {reason}")]
    StoreCorrupt { path: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Console I/O error: {0}")]
    Console(#[from] std::io::Error),
}

impl HallError {
    /// Validation failures the operator can retry from the menu.
    /// Everything else aborts the current operation.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidSeat { .. } | Self::AlreadyBooked { .. })
    }
}

pub type HallResult<T> = Result<T, HallError>;
