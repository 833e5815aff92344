//! Measuring the blank lines in front of an entry.

use arrange_core::{
  TextBuffer,
  chars::{
    CharCategory,
    categorize_char,
  },
};
use smallvec::SmallVec;

use crate::policy::BlankLines;

/// Line feeds found walking backward from an entry over whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFeeds {
  /// Offsets of the line feeds, nearest first. The first one terminates the
  /// line before the entry's own line, each further one adds a blank line.
  offsets:     SmallVec<[usize; 4]>,
  /// Start of the entry's line, when only indentation precedes the entry.
  line_start:  Option<usize>,
  entry_start: usize,
}

impl LineFeeds {
  pub(crate) fn offsets(&self) -> &[usize] {
    &self.offsets
  }

  pub(crate) fn line_start(&self) -> Option<usize> {
    self.line_start
  }

  pub fn blank_lines(&self) -> usize {
    self.offsets.len().saturating_sub(1)
  }

  /// Where new line feeds go: at the start of the entry's line so that the
  /// indentation stays attached to the entry.
  pub fn insertion_point(&self) -> usize {
    self.line_start.unwrap_or(self.entry_start)
  }

  /// Range to delete to drop `count` blank lines, keeping the entry's
  /// indentation. `None` when there are not that many blank lines.
  pub fn removal_range(&self, count: usize) -> Option<(usize, usize)> {
    if count == 0 || count > self.blank_lines() {
      return None;
    }
    Some((self.offsets[count] + 1, self.offsets[0] + 1))
  }
}

/// Scan backward from `entry_start`, never looking at chars before `floor`.
pub fn scan_line_feeds(buffer: &dyn TextBuffer, entry_start: usize, floor: usize) -> LineFeeds {
  let mut feeds = LineFeeds {
    offsets: SmallVec::new(),
    line_start: None,
    entry_start,
  };

  let mut idx = skip_inline_whitespace(buffer, entry_start, floor);
  if idx == 0 {
    feeds.line_start = Some(0);
    return feeds;
  }
  if idx <= floor || !is_line_feed(buffer, idx - 1) {
    return feeds;
  }
  feeds.line_start = Some(idx);

  loop {
    idx -= 1;
    feeds.offsets.push(idx);
    idx = skip_inline_whitespace(buffer, idx, floor);
    if idx <= floor || !is_line_feed(buffer, idx - 1) {
      break;
    }
  }

  feeds
}

/// How many line feeds to add (positive) or remove (negative) to go from
/// `present` blank lines to `desired`. `None` when the policy doesn't care.
pub fn line_feeds_diff(desired: BlankLines, present: usize) -> Option<isize> {
  desired
    .count()
    .map(|desired| desired as isize - present as isize)
}

fn skip_inline_whitespace(buffer: &dyn TextBuffer, mut idx: usize, floor: usize) -> usize {
  while idx > floor {
    match buffer.char_at(idx - 1).map(categorize_char) {
      Some(CharCategory::InlineWhitespace) => idx -= 1,
      _ => break,
    }
  }
  idx
}

fn is_line_feed(buffer: &dyn TextBuffer, idx: usize) -> bool {
  matches!(buffer.char_at(idx).map(categorize_char), Some(CharCategory::Eol))
}

#[cfg(test)]
mod tests {
  use ropey::Rope;

  use super::*;

  #[test]
  fn counts_blank_lines() {
    let rope = Rope::from("x\n\n\n  y");
    let feeds = scan_line_feeds(&rope, 6, 0);
    assert_eq!(feeds.offsets(), &[3, 2, 1]);
    assert_eq!(feeds.blank_lines(), 2);
    assert_eq!(feeds.insertion_point(), 4);
  }

  #[test]
  fn whitespace_only_lines_are_blank() {
    let rope = Rope::from("x\n  \n\t y");
    let feeds = scan_line_feeds(&rope, 7, 0);
    assert_eq!(feeds.offsets(), &[4, 1]);
    assert_eq!(feeds.blank_lines(), 1);
    assert_eq!(feeds.removal_range(1), Some((2, 5)));
    assert_eq!(feeds.removal_range(2), None);
  }

  #[test]
  fn removal_keeps_indentation() {
    let mut rope = Rope::from("x\n\n\n  y");
    let feeds = scan_line_feeds(&rope, 6, 0);
    let (from, to) = feeds.removal_range(2).unwrap();
    TextBuffer::delete(&mut rope, from, to).unwrap();
    assert_eq!(rope, "x\n  y");
  }

  #[test]
  fn entry_sharing_a_line() {
    let rope = Rope::from("x\na; b;");
    let feeds = scan_line_feeds(&rope, 5, 0);
    assert_eq!(feeds.blank_lines(), 0);
    assert_eq!(feeds.line_start(), None);
    assert_eq!(feeds.insertion_point(), 5);
  }

  #[test]
  fn first_line_of_buffer() {
    let rope = Rope::from("  y");
    let feeds = scan_line_feeds(&rope, 2, 0);
    assert_eq!(feeds.blank_lines(), 0);
    assert_eq!(feeds.insertion_point(), 0);
  }

  #[test]
  fn stops_at_floor() {
    let rope = Rope::from("\n\n{\n\n  y");
    // parent starts at the brace
    let feeds = scan_line_feeds(&rope, 7, 2);
    assert_eq!(feeds.offsets(), &[4, 3]);
    assert_eq!(feeds.blank_lines(), 1);
  }

  #[test]
  fn diff() {
    assert_eq!(line_feeds_diff(BlankLines::Any, 3), None);
    assert_eq!(line_feeds_diff(BlankLines::Exactly(2), 0), Some(2));
    assert_eq!(line_feeds_diff(BlankLines::Exactly(0), 2), Some(-2));
  }
}
