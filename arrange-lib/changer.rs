//! Turning a new order into buffer edits.
//!
//! A changer is prepared once per sibling group and then asked to put the
//! entry of one wrapper into the slot of another, from the last slot to the
//! first. Both variants fix up the blank lines in front of the slot and keep
//! every wrapper that is still going to be looked at in sync with the
//! buffer.

mod marker;
mod substring;

use arrange_core::TextBuffer;

pub(crate) use self::{
  marker::MarkerAwareChanger,
  substring::SubstringChanger,
};
use crate::{
  entry::EntryTree,
  error::Result,
  policy::{
    BlankLinePolicy,
    BlankLines,
  },
  rule::MatchRule,
  wrapper::{
    WrapperId,
    Wrappers,
  },
};

/// State shared by the traversal and the changers for one run.
pub(crate) struct Context<'a, T> {
  pub tree:     &'a EntryTree<T>,
  pub rules:    &'a [MatchRule<T>],
  pub policy:   &'a dyn BlankLinePolicy<T>,
  pub buffer:   &'a mut dyn TextBuffer,
  pub wrappers: Wrappers,
}

impl<T> Context<'_, T> {
  /// Ask the policy about `new` landing in the slot of `old`, right after
  /// `previous`.
  pub fn desired_blank_lines(
    &self,
    new: WrapperId,
    old: WrapperId,
    previous: Option<WrapperId>,
  ) -> Result<BlankLines> {
    let entry_of = |id: WrapperId| &self.tree[self.wrappers.get(id).entry];
    let parent = self.wrappers.get(old).parent().map(entry_of);
    let previous = previous.map(entry_of);
    Ok(self.policy.blank_lines(parent, previous, entry_of(new))?)
  }

  /// Start offset of the group's parent, or 0 for top-level groups.
  pub fn group_floor(&self, group: &[WrapperId]) -> usize {
    group
      .first()
      .and_then(|&id| self.wrappers.get(id).parent())
      .map_or(0, |parent| self.wrappers.get(parent).start)
  }
}

pub(crate) enum Changer {
  Substring(SubstringChanger),
  MarkerAware(MarkerAwareChanger),
}

impl Changer {
  pub fn new(marker_aware: bool) -> Self {
    if marker_aware {
      Self::MarkerAware(MarkerAwareChanger::default())
    } else {
      Self::Substring(SubstringChanger::default())
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Substring(_) => "substring",
      Self::MarkerAware(_) => "marker-aware",
    }
  }

  pub fn prepare<T>(&mut self, group: &[WrapperId], context: &mut Context<'_, T>) -> Result<()> {
    match self {
      Self::Substring(changer) => changer.prepare(group, context),
      Self::MarkerAware(changer) => {
        changer.prepare(group, context);
        Ok(())
      },
    }
  }

  /// Put the entry of `new` into the slot of `old`. `previous` is the
  /// wrapper that ends up right in front of it.
  pub fn replace<T>(
    &mut self,
    new: WrapperId,
    old: WrapperId,
    previous: Option<WrapperId>,
    context: &mut Context<'_, T>,
  ) -> Result<()> {
    match self {
      Self::Substring(changer) => changer.replace(new, old, previous, context),
      Self::MarkerAware(changer) => changer.replace(new, old, previous, context),
    }
  }
}

fn line_feeds(count: usize) -> String {
  "\n".repeat(count)
}
