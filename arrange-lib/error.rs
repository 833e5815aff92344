use std::{
  io,
  path::PathBuf,
};

use arrange_core::BufferError;
use thiserror::Error;

use crate::policy::PolicyError;

pub type Result<T> = std::result::Result<T, ArrangeError>;

/// Failure of an arrangement run. Edits applied before the failure are
/// left in the buffer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArrangeError {
  #[error(transparent)]
  Buffer(#[from] BufferError),
  #[error(transparent)]
  Policy(#[from] PolicyError),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to parse arrangement config: {0}")]
  Parse(#[from] toml::de::Error),
}
