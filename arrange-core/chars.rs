//! Character classes used when measuring the gap between two entries.
//!
//! Only `\n` terminates a line here. The rope is built without the
//! `unicode_lines`/`cr_lines` features so its line index agrees with these
//! predicates.

#[derive(Debug, Eq, PartialEq)]
pub enum CharCategory {
  /// Spaces and tabs.
  InlineWhitespace,
  Eol,
  Other,
}

pub fn categorize_char(ch: char) -> CharCategory {
  match ch {
    c if char_is_line_ending(c) => CharCategory::Eol,
    c if char_is_inline_whitespace(c) => CharCategory::InlineWhitespace,
    _ => CharCategory::Other,
  }
}

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  ch == '\n'
}

#[inline]
pub fn char_is_inline_whitespace(ch: char) -> bool {
  matches!(ch, ' ' | '\t')
}
