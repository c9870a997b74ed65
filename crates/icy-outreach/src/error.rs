use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutreachError>;

#[derive(Debug, Error)]
pub enum OutreachError {
    /// The named entity does not exist. Not a storage fault.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    /// Search or text-generation provider failed or returned nothing usable.
    #[error("Provider failure: {0}")]
    Provider(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Modelled but intentionally unimplemented behaviour.
    #[error("{0} is not wired up yet")]
    NotWired(&'static str),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
