//! Tracked ranges that survive edits.
//!
//! A [`Marker`] is a `[start, end)` char range registered with a
//! [`Document`](crate::Document). Every edit maps all markers through the
//! edit's [`ChangeSet`]: the start follows text inserted at its position
//! (it stays attached to the text it points at), the end stays in front of
//! text inserted at its position. A non-empty marker whose whole range is
//! deleted collapses and is flagged invalid.
//!
//! Moves are special: markers that lie inside the moved span travel with
//! it instead of collapsing, see [`MarkerSet::relocate`].

use slotmap::SlotMap;

use crate::transaction::{
  Assoc,
  ChangeSet,
  Result,
};

slotmap::new_key_type! {
  pub struct MarkerId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
  pub start: usize,
  pub end:   usize,
  valid:     bool,
}

impl Marker {
  pub fn new(start: usize, end: usize) -> Self {
    Self {
      start,
      end,
      valid: true,
    }
  }

  pub fn is_valid(&self) -> bool {
    self.valid
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  fn map(&mut self, changes: &ChangeSet) -> Result<()> {
    if self.is_empty() {
      self.start = changes.map_pos(self.start, Assoc::After)?;
      self.end = self.start;
      return Ok(());
    }

    let start = changes.map_pos(self.start, Assoc::After)?;
    let end = changes.map_pos(self.end, Assoc::Before)?;
    if start >= end {
      self.valid = false;
      self.start = start;
      self.end = start;
    } else {
      self.start = start;
      self.end = end;
    }
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct MarkerSet {
  markers: SlotMap<MarkerId, Marker>,
}

impl MarkerSet {
  pub fn insert(&mut self, marker: Marker) -> MarkerId {
    self.markers.insert(marker)
  }

  pub fn get(&self, id: MarkerId) -> Option<&Marker> {
    self.markers.get(id)
  }

  pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
    self.markers.remove(id)
  }

  pub fn len(&self) -> usize {
    self.markers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.markers.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
    self.markers.iter()
  }

  /// Map every valid marker through `changes`.
  pub fn map(&mut self, changes: &ChangeSet) -> Result<()> {
    for marker in self.markers.values_mut().filter(|marker| marker.valid) {
      marker.map(changes)?;
    }
    Ok(())
  }

  /// Map markers through a move of `from..to` to `target` (pre-move
  /// coordinates). `changes` is the change set describing the move.
  ///
  /// Markers contained in the moved span are translated by the distance the
  /// span travelled, everything else is mapped through `changes`.
  pub fn relocate(&mut self, changes: &ChangeSet, from: usize, to: usize, target: usize) -> Result<()> {
    let destination = if target > to {
      target - (to - from)
    } else {
      target
    };

    for marker in self.markers.values_mut().filter(|marker| marker.valid) {
      let inside = from < to && marker.start >= from && marker.end <= to;
      if inside {
        marker.start = destination + (marker.start - from);
        marker.end = destination + (marker.end - from);
      } else {
        marker.map(changes)?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn marker_follows_insertions() {
    let mut set = MarkerSet::default();
    let id = set.insert(Marker::new(2, 4));

    // insert in front of the marker start: start moves
    let changes = ChangeSet::replace(8, 2, 2, "xx").unwrap();
    set.map(&changes).unwrap();
    assert_eq!(set.get(id).map(|m| (m.start, m.end)), Some((4, 6)));

    // insert right at the end: the end does not grow
    let changes = ChangeSet::replace(10, 6, 6, "yy").unwrap();
    set.map(&changes).unwrap();
    assert_eq!(set.get(id).map(|m| (m.start, m.end)), Some((4, 6)));
  }

  #[test]
  fn deleted_marker_is_invalidated() {
    let mut set = MarkerSet::default();
    let id = set.insert(Marker::new(2, 4));
    let point = set.insert(Marker::new(6, 6));

    let changes = ChangeSet::replace(8, 1, 5, "").unwrap();
    set.map(&changes).unwrap();

    let marker = set.get(id).unwrap();
    assert!(!marker.is_valid());
    assert!(marker.is_empty());

    let point = set.get(point).unwrap();
    assert!(point.is_valid());
    assert_eq!(point.start, 2);
  }

  #[test]
  fn relocated_markers_travel_with_text() {
    let mut set = MarkerSet::default();
    // "ab|cd|ef": marker on "b", marker on "e"
    let inside = set.insert(Marker::new(1, 2));
    let outside = set.insert(Marker::new(6, 7));

    let changes = ChangeSet::relocate(8, 0, 2, 6, "ab").unwrap();
    set.relocate(&changes, 0, 2, 6).unwrap();

    // "|cd|abef"
    let inside = set.get(inside).unwrap();
    assert_eq!((inside.start, inside.end), (5, 6));
    let outside = set.get(outside).unwrap();
    assert_eq!((outside.start, outside.end), (6, 7));
  }
}
