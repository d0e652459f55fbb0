//! Subcommand implementations.

pub mod check;
pub mod convert;
pub mod dump;
pub mod list;

use eventio_store::{BackendKind, ReadMode, StoreError, StoreOptions};

/// Builds store options from the shared command-line flags.
pub fn store_options(backend: Option<&str>, permissive: bool) -> Result<StoreOptions, StoreError> {
    let backend = backend.map(str::parse::<BackendKind>).transpose()?;
    Ok(StoreOptions {
        backend,
        read_mode: if permissive {
            ReadMode::Permissive
        } else {
            ReadMode::Strict
        },
    })
}
