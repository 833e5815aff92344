//! A text buffer that keeps markers valid across edits.
//!
//! [`Document`] owns a [`Rope`] and a table of [`Marker`]s. Every edit is
//! expressed as a [`ChangeSet`], applied to the rope, and then used to map
//! each marker to its new position. Moves go through
//! [`MarkerSet::relocate`](crate::marker::MarkerSet::relocate) so that
//! markers inside the moved text keep their identity and extent.
//!
//! # Example
//!
//! ```no_run
//! use arrange_core::{
//!   Document,
//!   Marker,
//!   TextBuffer,
//! };
//!
//! let mut doc = Document::from("fn b() {}\nfn a() {}\n");
//! let name = doc.add_marker(Marker::new(3, 4));
//!
//! doc.move_text(10, 20, 0).unwrap();
//! assert_eq!(doc.text().to_string(), "fn a() {}\nfn b() {}\n");
//! assert_eq!(doc.marker(name).map(|m| m.start), Some(13));
//! ```

use ropey::Rope;

use crate::{
  buffer::{
    BufferError,
    Result,
    TextBuffer,
    check_move,
  },
  marker::{
    Marker,
    MarkerId,
    MarkerSet,
  },
  transaction::ChangeSet,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFlags {
  pub readonly:    bool,
  pub bulk_update: bool,
}

#[derive(Debug, Default)]
pub struct Document {
  text:          Rope,
  markers:       MarkerSet,
  version:       u64,
  flags:         DocumentFlags,
  /// Edits applied since bulk update mode was entered.
  pending_edits: usize,
}

impl From<&str> for Document {
  fn from(text: &str) -> Self {
    Self::new(Rope::from(text))
  }
}

impl Document {
  pub fn new(text: Rope) -> Self {
    Self {
      text,
      ..Self::default()
    }
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  pub fn flags(&self) -> DocumentFlags {
    self.flags
  }

  pub fn set_readonly(&mut self, readonly: bool) {
    self.flags.readonly = readonly;
  }

  pub fn markers(&self) -> &MarkerSet {
    &self.markers
  }

  pub fn add_marker(&mut self, marker: Marker) -> MarkerId {
    self.markers.insert(marker)
  }

  pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
    self.markers.get(id)
  }

  pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
    self.markers.remove(id)
  }

  fn ensure_writable(&self) -> Result<()> {
    if self.flags.readonly {
      return Err(BufferError::Readonly);
    }
    Ok(())
  }

  fn record_edit(&mut self) {
    if self.flags.bulk_update {
      self.pending_edits += 1;
    } else {
      self.version = self.version.saturating_add(1);
    }
  }
}

impl TextBuffer for Document {
  fn len_chars(&self) -> usize {
    self.text.len_chars()
  }

  fn len_lines(&self) -> usize {
    self.text.len_lines()
  }

  fn char_at(&self, idx: usize) -> Option<char> {
    self.text.get_char(idx)
  }

  fn char_to_line(&self, idx: usize) -> Result<usize> {
    TextBuffer::char_to_line(&self.text, idx)
  }

  fn line_to_char(&self, line: usize) -> Result<usize> {
    TextBuffer::line_to_char(&self.text, line)
  }

  fn slice(&self, from: usize, to: usize) -> Result<String> {
    TextBuffer::slice(&self.text, from, to)
  }

  fn replace(&mut self, from: usize, to: usize, text: &str) -> Result<()> {
    self.ensure_writable()?;
    let changes = ChangeSet::replace(self.text.len_chars(), from, to, text)?;
    if changes.is_empty() {
      return Ok(());
    }

    changes.apply(&mut self.text)?;
    self.markers.map(&changes)?;
    self.record_edit();
    Ok(())
  }

  fn move_text(&mut self, from: usize, to: usize, target: usize) -> Result<()> {
    self.ensure_writable()?;
    check_move(from, to, target, self.text.len_chars())?;
    if from == to || target == from || target == to {
      return Ok(());
    }

    let moved = self.text.slice(from..to).to_string();
    let changes = ChangeSet::relocate(self.text.len_chars(), from, to, target, &moved)?;
    changes.apply(&mut self.text)?;
    self.markers.relocate(&changes, from, to, target)?;
    self.record_edit();
    Ok(())
  }

  fn tracks_markers(&self) -> bool {
    true
  }

  fn is_in_bulk_update(&self) -> bool {
    self.flags.bulk_update
  }

  fn set_in_bulk_update(&mut self, value: bool) {
    if self.flags.bulk_update == value {
      return;
    }
    self.flags.bulk_update = value;
    if !value && self.pending_edits > 0 {
      self.pending_edits = 0;
      self.version = self.version.saturating_add(1);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replace_bumps_version_and_maps_markers() {
    let mut doc = Document::from("let x = 1;");
    let value = doc.add_marker(Marker::new(8, 9));

    doc.replace(4, 5, "value").unwrap();
    assert_eq!(doc.text().to_string(), "let value = 1;");
    assert_eq!(doc.version(), 1);

    let marker = doc.marker(value).unwrap();
    assert_eq!((marker.start, marker.end), (12, 13));
  }

  #[test]
  fn empty_replace_is_not_an_edit() {
    let mut doc = Document::from("abc");
    doc.replace(1, 1, "").unwrap();
    assert_eq!(doc.version(), 0);
  }

  #[test]
  fn move_keeps_inner_markers() {
    let mut doc = Document::from("fn b() {}\nfn a() {}\n");
    let b = doc.add_marker(Marker::new(3, 4));
    let a = doc.add_marker(Marker::new(13, 14));

    doc.move_text(10, 20, 0).unwrap();
    assert_eq!(doc.text().to_string(), "fn a() {}\nfn b() {}\n");

    let a = doc.marker(a).unwrap();
    assert!(a.is_valid());
    assert_eq!((a.start, a.end), (3, 4));
    let b = doc.marker(b).unwrap();
    assert!(b.is_valid());
    assert_eq!((b.start, b.end), (13, 14));
    assert_eq!(doc.version(), 1);
  }

  #[test]
  fn plain_delete_insert_loses_marker() {
    // the default move on a rope-like buffer would collapse the marker
    let mut doc = Document::from("ab|cd");
    let marker = doc.add_marker(Marker::new(0, 2));
    doc.delete(0, 2).unwrap();
    doc.insert(3, "ab").unwrap();
    assert!(!doc.marker(marker).unwrap().is_valid());
  }

  #[test]
  fn readonly_rejects_edits() {
    let mut doc = Document::from("abc");
    doc.set_readonly(true);
    assert_eq!(doc.replace(0, 1, "x"), Err(BufferError::Readonly));
    assert_eq!(doc.move_text(0, 1, 3), Err(BufferError::Readonly));
    assert_eq!(doc.text().to_string(), "abc");
  }

  #[test]
  fn bulk_update_bumps_version_once() {
    let mut doc = Document::from("abc");
    doc.set_in_bulk_update(true);
    doc.insert(0, "x").unwrap();
    doc.insert(0, "y").unwrap();
    doc.delete(0, 1).unwrap();
    assert_eq!(doc.version(), 0);
    doc.set_in_bulk_update(false);
    assert_eq!(doc.version(), 1);

    // a bulk session without edits leaves the version alone
    doc.set_in_bulk_update(true);
    doc.set_in_bulk_update(false);
    assert_eq!(doc.version(), 1);
  }
}
