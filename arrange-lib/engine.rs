//! Bottom-up traversal of the entry tree.
//!
//! Sibling groups are rearranged innermost first, so that by the time a
//! group is processed every edit inside its members has been applied and the
//! members' offsets are final. The walk uses an explicit work list and a
//! stack of frames instead of recursion:
//!
//! ```text
//!  Entry1          list: Entry1 Entry2          stack: [0, 0, 2]
//!  Entry2          list: Entry1 Entry2          stack: [0, 2, 2]
//!    Entry21                                           [2, 2, 4]
//!    Entry22       list: Entry1 Entry2 Entry21 Entry22
//!                  ... [2, 4, 4] is exhausted: arrange Entry21 Entry22
//!                  ... [0, 2, 2] is exhausted: arrange Entry1 Entry2
//! ```

use std::collections::HashMap;

use arrange_core::TextBuffer;
use serde::Deserialize;
use tracing::debug;

use crate::{
  changer::{
    Changer,
    Context,
  },
  entry::{
    EntryId,
    EntryTree,
  },
  error::Result,
  matcher::arrange_entries,
  policy::BlankLinePolicy,
  rule::ArrangementSettings,
  wrapper::{
    WrapperId,
    Wrappers,
  },
};

/// Which changer applies the new order to the buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
  /// Marker-aware when the buffer tracks markers, substring otherwise.
  #[default]
  Auto,
  Substring,
  MarkerAware,
}

impl Strategy {
  fn is_marker_aware(self, buffer: &dyn TextBuffer) -> bool {
    match self {
      Self::Auto => buffer.tracks_markers(),
      Self::Substring => false,
      Self::MarkerAware => true,
    }
  }
}

/// Rearrange every sibling group of `tree` inside `buffer`.
///
/// Buffers that track markers are switched into bulk update mode for the
/// duration of the run, unless they already are. The mode is left again on
/// failure too; edits made before the failure stay.
pub fn arrange<T>(
  tree: &EntryTree<T>,
  settings: &ArrangementSettings<T>,
  policy: &dyn BlankLinePolicy<T>,
  buffer: &mut dyn TextBuffer,
  strategy: Strategy,
) -> Result<()> {
  let mut changer = Changer::new(strategy.is_marker_aware(buffer));
  let bulk = buffer.tracks_markers() && !buffer.is_in_bulk_update();
  debug!(
    entries = tree.len(),
    rules = settings.rules().len(),
    changer = changer.name(),
    bulk,
    "arranging entries"
  );

  if bulk {
    buffer.set_in_bulk_update(true);
  }

  let result = {
    let mut context = Context {
      tree,
      rules: settings.rules(),
      policy,
      buffer: &mut *buffer,
      wrappers: Wrappers::new(tree),
    };
    arrange_tree(&mut context, &mut changer)
  };

  if bulk {
    buffer.set_in_bulk_update(false);
  }
  result
}

struct StackEntry {
  start:   usize,
  current: usize,
  end:     usize,
}

impl StackEntry {
  fn new(start: usize, count: usize) -> Self {
    Self {
      start,
      current: start,
      end: start + count,
    }
  }
}

fn arrange_tree<T>(context: &mut Context<'_, T>, changer: &mut Changer) -> Result<()> {
  let mut entries: Vec<WrapperId> = context.wrappers.roots().to_vec();
  let mut stack = vec![StackEntry::new(0, entries.len())];

  while let Some(top) = stack.last_mut() {
    if top.current >= top.end {
      let (start, end) = (top.start, top.end);
      debug_assert_eq!(entries.len(), end);
      if end - start > 1 {
        arrange_group(context, changer, &entries[start..end])?;
      }
      entries.truncate(start);
      stack.pop();
      continue;
    }

    let wrapper = entries[top.current];
    top.current += 1;
    let end = top.end;

    let children = context.wrappers.get(wrapper).children();
    if !children.is_empty() {
      let count = children.len();
      entries.extend_from_slice(children);
      stack.push(StackEntry::new(end, count));
    }
  }

  Ok(())
}

fn arrange_group<T>(
  context: &mut Context<'_, T>,
  changer: &mut Changer,
  group: &[WrapperId],
) -> Result<()> {
  let entries: Vec<EntryId> = group
    .iter()
    .map(|&id| context.wrappers.get(id).entry)
    .collect();
  let by_entry: HashMap<EntryId, WrapperId> = entries
    .iter()
    .copied()
    .zip(group.iter().copied())
    .collect();

  let arranged: Vec<WrapperId> = arrange_entries(context.tree, &entries, context.rules)
    .into_iter()
    .filter_map(|entry| by_entry.get(&entry).copied())
    .collect();
  debug!(
    group = group.len(),
    arranged = arranged.len(),
    "arranging sibling group"
  );

  changer.prepare(group, context)?;
  // last slot first, so that edits never move a slot still to be filled
  for idx in (0..arranged.len()).rev() {
    let previous = idx.checked_sub(1).map(|prev| arranged[prev]);
    changer.replace(arranged[idx], group[idx], previous, context)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use ropey::Rope;

  use super::*;
  use crate::{
    entry::Entry,
    policy::BlankLines,
    rule::MatchRule,
  };

  fn by_name(name: char) -> MatchRule<char> {
    MatchRule::new(move |entry: &Entry<char>| entry.attributes == name)
  }

  #[test]
  fn auto_strategy_follows_buffer() {
    let rope = Rope::new();
    assert!(!Strategy::Auto.is_marker_aware(&rope));
    assert!(Strategy::MarkerAware.is_marker_aware(&rope));
    let doc = arrange_core::Document::default();
    assert!(Strategy::Auto.is_marker_aware(&doc));
    assert!(!Strategy::Substring.is_marker_aware(&doc));
  }

  #[test]
  fn inner_groups_are_arranged_before_outer_ones() {
    // two containers, each with members out of order
    let text = "B{\ny\nx\n}\nA{\nq\np\n}";
    let mut tree = EntryTree::new();
    let outer_b = tree.push_root(0, 8, 'B');
    tree.push_child(outer_b, 3, 4, 'y');
    tree.push_child(outer_b, 5, 6, 'x');
    let outer_a = tree.push_root(9, 17, 'A');
    tree.push_child(outer_a, 12, 13, 'q');
    tree.push_child(outer_a, 14, 15, 'p');

    let settings = ArrangementSettings::default()
      .with_rule(by_name('A'))
      .with_rule(by_name('p'))
      .with_rule(by_name('x'));

    let mut rope = Rope::from(text);
    arrange(
      &tree,
      &settings,
      &BlankLines::Any,
      &mut rope,
      Strategy::Substring,
    )
    .unwrap();
    assert_eq!(rope, "A{\np\nq\n}\nB{\nx\ny\n}");
  }
}
