//! Dependency-aware rule matching.
//!
//! Given the entries of one sibling group, compute their target order:
//!
//! 1. Entries without dependencies are candidates for rule matching.
//!    Entries whose only dependency is their own parent go to the front.
//!    Everything else waits until all of its dependencies are placed.
//! 2. Each rule, in declared order, claims every matching candidate it
//!    sees. Candidates no rule claims are appended in their original order.
//! 3. Waiting entries are inserted right after the last of their
//!    dependencies. An entry whose dependencies are never placed is not
//!    emitted at all.

use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::debug;

use crate::{
  entry::{
    EntryId,
    EntryTree,
  },
  rule::MatchRule,
};

struct Dependent {
  entry:   EntryId,
  pending: HashSet<EntryId>,
}

/// Order `entries` according to `rules` and their declared dependencies.
///
/// The result is a permutation of `entries`, minus entries with unplaceable
/// dependencies.
pub fn arrange_entries<T>(
  tree: &EntryTree<T>,
  entries: &[EntryId],
  rules: &[MatchRule<T>],
) -> Vec<EntryId> {
  let mut arranged = Vec::with_capacity(entries.len());
  let mut unmatched = IndexSet::with_capacity(entries.len());
  let mut dependents = Vec::new();

  for &id in entries {
    let entry = &tree[id];
    match entry.dependencies() {
      None => {
        unmatched.insert(id);
      },
      Some([only]) if entry.parent() == Some(*only) => arranged.push(id),
      Some(dependencies) => {
        dependents.push(Dependent {
          entry:   id,
          pending: dependencies.iter().copied().collect(),
        });
      },
    }
  }

  for rule in rules {
    unmatched.retain(|&id| {
      let entry = &tree[id];
      if entry.can_be_matched() && rule.is_matched(entry) {
        arranged.push(id);
        false
      } else {
        true
      }
    });
  }
  arranged.extend(unmatched);

  let mut idx = 0;
  while idx < arranged.len() && !dependents.is_empty() {
    let placed = arranged[idx];
    let mut insert_at = idx + 1;
    let mut i = 0;
    while i < dependents.len() {
      dependents[i].pending.remove(&placed);
      if dependents[i].pending.is_empty() {
        let dependent = dependents.remove(i);
        arranged.insert(insert_at, dependent.entry);
        insert_at += 1;
      } else {
        i += 1;
      }
    }
    idx += 1;
  }

  if !dependents.is_empty() {
    debug!(
      dropped = dependents.len(),
      "entries with unplaced dependencies are left out of the arrangement"
    );
  }

  arranged
}
