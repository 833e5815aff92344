use arrange_core::BufferError;
use ropey::Rope;
use tracing::trace;

use super::{
  Context,
  line_feeds,
};
use crate::{
  error::Result,
  spacing::{
    line_feeds_diff,
    scan_line_feeds,
  },
  wrapper::WrapperId,
};

/// Rewrites slots with text copied from a snapshot of the parent.
///
/// Works on any buffer. Ranges tracked by the buffer inside a moved entry
/// do not follow it.
#[derive(Debug, Default)]
pub(crate) struct SubstringChanger {
  parent_text:  Rope,
  parent_shift: usize,
}

impl SubstringChanger {
  pub fn prepare<T>(&mut self, group: &[WrapperId], context: &mut Context<'_, T>) -> Result<()> {
    let parent = group
      .first()
      .and_then(|&id| context.wrappers.get(id).parent());
    let (from, to) = match parent {
      Some(parent) => {
        let parent = context.wrappers.get(parent);
        (parent.start, parent.end)
      },
      None => (0, context.buffer.len_chars()),
    };

    self.parent_text = Rope::from(context.buffer.slice(from, to)?);
    self.parent_shift = from;
    Ok(())
  }

  fn entry_text(&self, start: usize, end: usize) -> Result<String> {
    let local = start
      .checked_sub(self.parent_shift)
      .zip(end.checked_sub(self.parent_shift));
    local
      .and_then(|(from, to)| self.parent_text.get_slice(from..to))
      .map(|slice| slice.to_string())
      .ok_or_else(|| {
        BufferError::OffsetOutOfBounds {
          offset: end,
          len:    self.parent_shift + self.parent_text.len_chars(),
        }
        .into()
      })
  }

  pub fn replace<T>(
    &mut self,
    new: WrapperId,
    old: WrapperId,
    previous: Option<WrapperId>,
    context: &mut Context<'_, T>,
  ) -> Result<()> {
    let desired = context.desired_blank_lines(new, old, previous)?;
    let (old_start, old_end) = {
      let old = context.wrappers.get(old);
      (old.start, old.end)
    };

    let feeds = scan_line_feeds(&*context.buffer, old_start, self.parent_shift);
    let diff = line_feeds_diff(desired, feeds.blank_lines());
    if new == old && diff.unwrap_or(0) == 0 {
      return Ok(());
    }

    let text = {
      let new = context.wrappers.get(new);
      self.entry_text(new.start, new.end)?
    };

    let (from, replacement) = match diff {
      Some(diff) if diff > 0 => {
        let at = feeds.insertion_point();
        let mut replacement = line_feeds(diff.unsigned_abs());
        replacement.push_str(&context.buffer.slice(at, old_start)?);
        replacement.push_str(&text);
        (at, replacement)
      },
      Some(diff) if diff < 0 => {
        match feeds.removal_range(diff.unsigned_abs()) {
          Some((from, to)) => {
            let mut replacement = context.buffer.slice(to, old_start)?;
            replacement.push_str(&text);
            (from, replacement)
          },
          None => (old_start, text),
        }
      },
      _ => (old_start, text),
    };

    context.buffer.replace(from, old_end, &replacement)?;
    let delta = replacement.chars().count() as isize - (old_end - from) as isize;
    trace!(from, to = old_end, delta, "replaced slot");

    context.wrappers.propagate(old, delta);
    Ok(())
  }
}
