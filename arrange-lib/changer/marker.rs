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

/// Moves entries with [`TextBuffer::move_text`] so that ranges the buffer
/// tracks inside an entry travel with it.
///
/// A moved wrapper keeps its old offsets afterwards. They still denote the
/// slot it came from, which is how the remaining, earlier slots are found.
///
/// [`TextBuffer::move_text`]: arrange_core::TextBuffer::move_text
#[derive(Debug, Default)]
pub(crate) struct MarkerAwareChanger {
  group: Vec<WrapperId>,
  floor: usize,
}

impl MarkerAwareChanger {
  pub fn prepare<T>(&mut self, group: &[WrapperId], context: &mut Context<'_, T>) {
    self.group.clear();
    self.group.extend_from_slice(group);
    self.floor = context.group_floor(group);

    for &id in group {
      let start = context.wrappers.get(id).start;
      let blank_lines = scan_line_feeds(&*context.buffer, start, self.floor).blank_lines();
      context.wrappers.get_mut(id).blank_lines_before = blank_lines;
    }
  }

  pub fn replace<T>(
    &mut self,
    new: WrapperId,
    old: WrapperId,
    previous: Option<WrapperId>,
    context: &mut Context<'_, T>,
  ) -> Result<()> {
    let desired = context.desired_blank_lines(new, old, previous)?;
    let (old_start, present) = {
      let old = context.wrappers.get(old);
      (old.start, old.blank_lines_before)
    };
    let diff = line_feeds_diff(desired, present);
    if new == old && diff.unwrap_or(0) == 0 {
      return Ok(());
    }

    let (new_start, new_end) = {
      let new = context.wrappers.get(new);
      (new.start, new.end)
    };
    let len = new_end - new_start;
    let insertion = if old_start > new_start {
      old_start - len
    } else {
      old_start
    };

    if new != old {
      context.buffer.move_text(new_start, new_end, old_start)?;
      trace!(from = new_start, to = new_end, target = old_start, "moved entry");

      for &id in self.group.iter().rev() {
        if id == new {
          continue;
        }
        let start = context.wrappers.get(id).start;
        if start >= old_start && start < new_start {
          context.wrappers.apply_shift(id, len as isize);
        } else if start < old_start && start > new_start {
          context.wrappers.apply_shift(id, -(len as isize));
        }
      }
    }

    let delta = match diff {
      Some(diff) if diff > 0 => {
        let at = scan_line_feeds(&*context.buffer, insertion, self.floor).insertion_point();
        context.buffer.insert(at, &line_feeds(diff.unsigned_abs()))?;
        self.shift_offsets(context, diff, at);
        diff
      },
      Some(diff) if diff < 0 => {
        let feeds = scan_line_feeds(&*context.buffer, insertion, self.floor);
        let count = diff.unsigned_abs().min(feeds.blank_lines());
        match feeds.removal_range(count) {
          Some((from, to)) => {
            context.buffer.delete(from, to)?;
            let delta = -((to - from) as isize);
            self.shift_offsets(context, delta, to);
            delta
          },
          None => 0,
        }
      },
      _ => 0,
    };

    if delta != 0 {
      trace!(at = insertion, delta, "adjusted blank lines");
      context.wrappers.propagate(old, delta);
    }
    Ok(())
  }

  /// Shift group wrappers starting at or after `change_at`. The group is
  /// sorted by offset, so the scan stops at the first wrapper in front of
  /// the change.
  fn shift_offsets<T>(&self, context: &mut Context<'_, T>, delta: isize, change_at: usize) {
    for &id in self.group.iter().rev() {
      if context.wrappers.get(id).start < change_at {
        break;
      }
      context.wrappers.apply_shift(id, delta);
    }
  }
}
