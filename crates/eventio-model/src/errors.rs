use thiserror::Error;

/// Errors raised while assembling events and id tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A value failed validation.
    #[error(transparent)]
    Validation(#[from] crate::validation::ValidationError),
    /// A collection with the same name is already part of the event.
    #[error("collection '{0}' already present in event")]
    DuplicateCollection(String),
    /// A collection with the same id is already part of the event.
    #[error("collection id {0} already present in event")]
    DuplicateId(u32),
    /// Two id tables disagree about an entry.
    #[error("collection id table conflict: {0}")]
    TableConflict(String),
    /// Every collection id above the current maximum is taken.
    #[error("no collection id left after {0}")]
    IdSpaceExhausted(u32),
}
