use thiserror::Error;

/// Why a persisted collection could not be used.
///
/// Never surfaced past [`crate::store::LampStore::initialize`], which falls
/// back to a freshly generated collection.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no saved state")]
    Missing,
    #[error("malformed state: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected {expected} lamps, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("lamp at index {index} has id {id}")]
    OutOfOrder { index: usize, id: u32 },
    #[error("lamp {id} is at column {col}, row {row}")]
    Misplaced { id: u32, col: u32, row: u32 },
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Toml(#[from] toml::de::Error),
}
