use thiserror::Error;

/// Things that can go wrong when building a container. Lookups that miss are
/// not errors; they come back as `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("hash table capacity must be greater than zero")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, Error>;
