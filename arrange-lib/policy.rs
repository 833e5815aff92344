//! Blank-line policies: how many blank lines go in front of an entry.

use thiserror::Error;

use crate::entry::Entry;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlankLines {
  /// Leave whatever is there.
  #[default]
  Any,
  Exactly(usize),
}

impl BlankLines {
  /// Decode the signed encoding where any negative value means "don't
  /// care".
  pub fn from_raw(raw: i32) -> Self {
    usize::try_from(raw).map_or(Self::Any, Self::Exactly)
  }

  pub fn count(self) -> Option<usize> {
    match self {
      Self::Any => None,
      Self::Exactly(count) => Some(count),
    }
  }
}

impl From<Option<usize>> for BlankLines {
  fn from(count: Option<usize>) -> Self {
    count.map_or(Self::Any, Self::Exactly)
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("blank line policy failed: {message}")]
pub struct PolicyError {
  message: String,
}

impl PolicyError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

/// Decides the blank lines in front of `entry`, given its parent and the
/// entry that will precede it after rearrangement.
pub trait BlankLinePolicy<T> {
  fn blank_lines(
    &self,
    parent: Option<&Entry<T>>,
    previous: Option<&Entry<T>>,
    entry: &Entry<T>,
  ) -> Result<BlankLines, PolicyError>;
}

impl<T, F> BlankLinePolicy<T> for F
where
  F: Fn(Option<&Entry<T>>, Option<&Entry<T>>, &Entry<T>) -> BlankLines,
{
  fn blank_lines(
    &self,
    parent: Option<&Entry<T>>,
    previous: Option<&Entry<T>>,
    entry: &Entry<T>,
  ) -> Result<BlankLines, PolicyError> {
    Ok(self(parent, previous, entry))
  }
}

/// A constant answer for every entry.
impl<T> BlankLinePolicy<T> for BlankLines {
  fn blank_lines(
    &self,
    _parent: Option<&Entry<T>>,
    _previous: Option<&Entry<T>>,
    _entry: &Entry<T>,
  ) -> Result<BlankLines, PolicyError> {
    Ok(*self)
  }
}
