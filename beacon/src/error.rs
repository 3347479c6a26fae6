use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("no beacon with id {0}")]
    UnknownBeacon(u64),

    #[error("{caller} is not the upgrader of beacon {beacon}")]
    Unauthorized { beacon: u64, caller: String },

    #[error("implementation id must be nonzero")]
    InvalidImplementation,

    #[error("storage error: {0}")]
    Storage(String),
}
