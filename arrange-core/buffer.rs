//! The buffer abstraction the arrangement engine edits.
//!
//! Offsets are char indices, lines are 0-indexed and separated by `\n`.
//! Every mutating call either applies completely or fails without touching
//! the buffer.

use ropey::Rope;
use thiserror::Error;

use crate::transaction::TransactionError;

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
  #[error("offset {offset} is out of bounds for buffer length {len}")]
  OffsetOutOfBounds { offset: usize, len: usize },
  #[error("line {line} is out of bounds for buffer with {lines} lines")]
  LineOutOfBounds { line: usize, lines: usize },
  #[error("invalid range: start {from} is after end {to}")]
  InvalidRange { from: usize, to: usize },
  #[error("cannot move {from}..{to} to {target}, which lies inside the moved text")]
  MoveIntoItself {
    from:   usize,
    to:     usize,
    target: usize,
  },
  #[error("buffer is readonly")]
  Readonly,
  #[error(transparent)]
  Transaction(#[from] TransactionError),
}

/// Mutable text with line/offset queries.
pub trait TextBuffer {
  fn len_chars(&self) -> usize;

  fn len_lines(&self) -> usize;

  fn char_at(&self, idx: usize) -> Option<char>;

  /// Line containing `idx`. `idx == len_chars()` is allowed.
  fn char_to_line(&self, idx: usize) -> Result<usize>;

  /// Offset of the first char of `line`.
  fn line_to_char(&self, line: usize) -> Result<usize>;

  fn slice(&self, from: usize, to: usize) -> Result<String>;

  /// Replace `from..to` with `text`.
  fn replace(&mut self, from: usize, to: usize, text: &str) -> Result<()>;

  fn insert(&mut self, at: usize, text: &str) -> Result<()> {
    self.replace(at, at, text)
  }

  fn delete(&mut self, from: usize, to: usize) -> Result<()> {
    self.replace(from, to, "")
  }

  /// Move `from..to` in front of `target`, where `target` is an offset
  /// before the move. Buffers without range tracking get a plain
  /// delete + insert.
  fn move_text(&mut self, from: usize, to: usize, target: usize) -> Result<()> {
    check_move(from, to, target, self.len_chars())?;
    let text = self.slice(from, to)?;
    if target >= to {
      self.insert(target, &text)?;
      self.delete(from, to)
    } else {
      self.delete(from, to)?;
      self.insert(target, &text)
    }
  }

  /// Whether moves keep external ranges inside the moved text intact.
  fn tracks_markers(&self) -> bool {
    false
  }

  fn is_in_bulk_update(&self) -> bool {
    false
  }

  fn set_in_bulk_update(&mut self, _value: bool) {}
}

pub(crate) fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
  if from > to {
    return Err(BufferError::InvalidRange { from, to });
  }
  if to > len {
    return Err(BufferError::OffsetOutOfBounds { offset: to, len });
  }
  Ok(())
}

pub(crate) fn check_move(from: usize, to: usize, target: usize, len: usize) -> Result<()> {
  check_range(from, to, len)?;
  if target > len {
    return Err(BufferError::OffsetOutOfBounds {
      offset: target,
      len,
    });
  }
  if target > from && target < to {
    return Err(BufferError::MoveIntoItself { from, to, target });
  }
  Ok(())
}

impl TextBuffer for Rope {
  fn len_chars(&self) -> usize {
    Rope::len_chars(self)
  }

  fn len_lines(&self) -> usize {
    Rope::len_lines(self)
  }

  fn char_at(&self, idx: usize) -> Option<char> {
    self.get_char(idx)
  }

  fn char_to_line(&self, idx: usize) -> Result<usize> {
    self.try_char_to_line(idx).map_err(|_| {
      BufferError::OffsetOutOfBounds {
        offset: idx,
        len:    Rope::len_chars(self),
      }
    })
  }

  fn line_to_char(&self, line: usize) -> Result<usize> {
    self.try_line_to_char(line).map_err(|_| {
      BufferError::LineOutOfBounds {
        line,
        lines: Rope::len_lines(self),
      }
    })
  }

  fn slice(&self, from: usize, to: usize) -> Result<String> {
    check_range(from, to, Rope::len_chars(self))?;
    Ok(Rope::slice(self, from..to).to_string())
  }

  fn replace(&mut self, from: usize, to: usize, text: &str) -> Result<()> {
    check_range(from, to, Rope::len_chars(self))?;
    if from < to {
      self.remove(from..to);
    }
    if !text.is_empty() {
      Rope::insert(self, from, text);
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn rope_line_queries() {
    let rope = Rope::from("ab\n\ncd");
    assert_eq!(TextBuffer::len_lines(&rope), 3);
    assert_eq!(TextBuffer::char_to_line(&rope, 0).unwrap(), 0);
    assert_eq!(TextBuffer::char_to_line(&rope, 3).unwrap(), 1);
    assert_eq!(TextBuffer::char_to_line(&rope, 6).unwrap(), 2);
    assert_eq!(TextBuffer::line_to_char(&rope, 2).unwrap(), 4);
    assert_eq!(
      TextBuffer::char_to_line(&rope, 7),
      Err(BufferError::OffsetOutOfBounds { offset: 7, len: 6 })
    );
    assert_eq!(
      TextBuffer::line_to_char(&rope, 4),
      Err(BufferError::LineOutOfBounds { line: 4, lines: 3 })
    );
  }

  #[test]
  fn rope_edits() {
    let mut rope = Rope::from("hello world");
    TextBuffer::replace(&mut rope, 6, 11, "rust").unwrap();
    assert_eq!(rope, "hello rust");
    TextBuffer::insert(&mut rope, 0, ">").unwrap();
    TextBuffer::delete(&mut rope, 6, 7).unwrap();
    assert_eq!(rope, ">hellorust");
    assert_eq!(
      TextBuffer::replace(&mut rope, 4, 2, ""),
      Err(BufferError::InvalidRange { from: 4, to: 2 })
    );
  }

  #[test]
  fn rope_move_text() {
    let mut rope = Rope::from("one two three");
    rope.move_text(0, 4, 8).unwrap();
    assert_eq!(rope, "two one three");
    rope.move_text(8, 13, 0).unwrap();
    assert_eq!(rope, "threetwo one ");
    assert_eq!(
      rope.move_text(0, 5, 2),
      Err(BufferError::MoveIntoItself {
        from:   0,
        to:     5,
        target: 2,
      })
    );
  }
}
