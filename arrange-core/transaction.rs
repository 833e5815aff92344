//! Change sets used to keep positions valid across buffer edits.
//!
//! A [`ChangeSet`] is a run of [`Operation`]s applied from the start of the
//! document:
//!
//! - **Retain(n)** - Keep `n` characters unchanged
//! - **Delete(n)** - Remove `n` characters
//! - **Insert(s)** - Insert string `s`
//!
//! Edits made by the arrangement engine are single replacements or single
//! moves, so a change set here rarely holds more than five operations. The
//! interesting part is [`ChangeSet::map_pos`], which is how markers follow
//! the text they point into.
//!
//! ```ignore
//! let mut cs = ChangeSet::with_capacity(3);
//! cs.retain(4);
//! cs.insert("!!".into());
//! cs.retain(4);
//!
//! assert_eq!(cs.map_pos(4, Assoc::Before)?, 4);
//! assert_eq!(cs.map_pos(4, Assoc::After)?, 6);
//! ```

use ropey::Rope;
use thiserror::Error;

use crate::Tendril;

pub type Result<T> = std::result::Result<T, TransactionError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
  #[error("changeset length mismatch: expected {expected}, got {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("invalid change range: start {from} is after end {to}")]
  InvalidRange { from: usize, to: usize },
  #[error("change range {from}..{to} is out of bounds for document length {len}")]
  RangeOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error("position {pos} is out of bounds for changeset length {len}")]
  PositionOutOfBounds { pos: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  /// Move cursor by n characters.
  Retain(usize),

  /// Delete n characters.
  Delete(usize),

  /// Insert text at position.
  Insert(Tendril),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
  /// Stay in front of text inserted at the position.
  Before,
  /// Move past text inserted at the position.
  After,
}

impl Assoc {
  fn insert_offset(self, inserted: usize) -> usize {
    match self {
      Assoc::Before => 0,
      Assoc::After => inserted,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
  changes:   Vec<Operation>,
  /// The required document length. Will refuse to apply changes unless it
  /// matches.
  len:       usize,
  len_after: usize,
}

impl ChangeSet {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      changes:   Vec::with_capacity(capacity),
      len:       0,
      len_after: 0,
    }
  }

  /// Replace `from..to` of a `len` chars document with `text`.
  pub fn replace(len: usize, from: usize, to: usize, text: &str) -> Result<Self> {
    validate_change_bounds(from, to, len)?;
    let mut changes = Self::with_capacity(4);
    changes.retain(from);
    changes.insert(text.into());
    changes.delete(to - from);
    changes.retain(len - to);
    Ok(changes)
  }

  /// Relocate `from..to` in front of `target`. `target` is expressed in
  /// the coordinates before the move and must not fall strictly inside the
  /// moved span.
  pub fn relocate(len: usize, from: usize, to: usize, target: usize, text: &str) -> Result<Self> {
    validate_change_bounds(from, to, len)?;
    if target > len {
      return Err(TransactionError::PositionOutOfBounds { pos: target, len });
    }

    let mut changes = Self::with_capacity(4);
    if target <= from {
      changes.retain(target);
      changes.insert(text.into());
      changes.retain(from - target);
      changes.delete(to - from);
      changes.retain(len - to);
    } else {
      changes.retain(from);
      changes.delete(to - from);
      changes.retain(target - to);
      changes.insert(text.into());
      changes.retain(len - target);
    }
    Ok(changes)
  }

  pub fn changes(&self) -> &[Operation] {
    &self.changes
  }

  /// Returns the expected document length for this changeset
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn len_after(&self) -> usize {
    self.len_after
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.changes.is_empty() || self.changes == [Operation::Retain(self.len)]
  }

  // Changeset builder operations: delete/insert/retain.
  //

  pub fn delete(&mut self, n: usize) {
    use Operation::*;

    if n == 0 {
      return;
    }

    self.len += n;

    if let Some(Delete(count)) = self.changes.last_mut() {
      *count += n;
    } else {
      self.changes.push(Delete(n))
    }
  }

  pub fn insert(&mut self, fragment: Tendril) {
    use Operation::*;

    if fragment.is_empty() {
      return;
    }

    self.len_after += fragment.chars().count();

    match self.changes.last_mut() {
      Some(Insert(prev)) => prev.push_str(&fragment),
      _ => self.changes.push(Insert(fragment)),
    }
  }

  pub fn retain(&mut self, n: usize) {
    use Operation::*;

    if n == 0 {
      return;
    }

    self.len += n;
    self.len_after += n;

    if let Some(Retain(count)) = self.changes.last_mut() {
      *count += n;
    } else {
      self.changes.push(Retain(n))
    }
  }

  fn ensure_len(&self, text_len: usize) -> Result<()> {
    if text_len != self.len {
      return Err(TransactionError::LengthMismatch {
        expected: self.len,
        actual:   text_len,
      });
    }
    Ok(())
  }

  /// Apply this changeset in-place.
  pub fn apply(&self, text: &mut Rope) -> Result<()> {
    self.ensure_len(text.len_chars())?;
    let mut pos = 0;

    for change in &self.changes {
      use Operation::*;
      match change {
        Retain(n) => pos += n,
        Delete(n) => text.remove(pos..pos + *n),
        Insert(s) => {
          text.insert(pos, s);
          pos += s.chars().count();
        },
      }
    }

    Ok(())
  }

  /// Map a position through the changes.
  ///
  /// `assoc` only matters when text is inserted exactly at `pos`: `Before`
  /// keeps the position in front of the insertion, `After` moves it past.
  /// A position at the start of a replaced range stays at the start of the
  /// replacement regardless of `assoc`; a position inside a deleted range
  /// collapses onto the deletion point.
  pub fn map_pos(&self, pos: usize, assoc: Assoc) -> Result<usize> {
    use Operation::*;

    if pos > self.len {
      return Err(TransactionError::PositionOutOfBounds { pos, len: self.len });
    }

    let mut old_pos = 0;
    let mut new_pos = 0;
    let mut iter = self.changes.iter().peekable();

    while let Some(change) = iter.next() {
      match change {
        Retain(n) => {
          if pos < old_pos + n {
            return Ok(new_pos + (pos - old_pos));
          }
          old_pos += n;
          new_pos += n;
        },
        Delete(n) => {
          if pos < old_pos + n {
            return Ok(new_pos);
          }
          old_pos += n;
        },
        Insert(s) => {
          let inserted = s.chars().count();
          // a subsequent delete means a replace, consume it
          if let Some(Delete(n)) = iter.peek() {
            let n = *n;
            iter.next();
            if pos < old_pos + n {
              return Ok(if pos == old_pos {
                new_pos
              } else {
                new_pos + assoc.insert_offset(inserted)
              });
            }
            old_pos += n;
          } else if pos == old_pos {
            return Ok(new_pos + assoc.insert_offset(inserted));
          }
          new_pos += inserted;
        },
      }
    }

    Ok(new_pos)
  }
}

fn validate_change_bounds(from: usize, to: usize, len: usize) -> Result<()> {
  if from > to {
    return Err(TransactionError::InvalidRange { from, to });
  }
  if to > len {
    return Err(TransactionError::RangeOutOfBounds { from, to, len });
  }
  Ok(())
}
