//! Mutable shadows of entries.
//!
//! A [`Wrapper`] mirrors one [`Entry`](crate::entry::Entry) and owns the
//! offsets the engine keeps in sync with the buffer while it edits. The
//! wrappers live in one arena ([`Wrappers`]) and refer to each other by
//! [`WrapperId`]; siblings are doubly linked so that a length change can be
//! pushed to everything that follows.

use smallvec::SmallVec;

use crate::entry::{
  EntryId,
  EntryTree,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WrapperId(usize);

#[derive(Debug, Clone)]
pub struct Wrapper {
  pub entry:              EntryId,
  pub start:              usize,
  pub end:                usize,
  /// Blank lines in front of the entry, measured when its group is
  /// prepared. Only the marker-aware changer fills this in.
  pub blank_lines_before: usize,
  parent:                 Option<WrapperId>,
  children:               SmallVec<[WrapperId; 4]>,
  previous:               Option<WrapperId>,
  next:                   Option<WrapperId>,
}

impl Wrapper {
  pub fn parent(&self) -> Option<WrapperId> {
    self.parent
  }

  pub fn children(&self) -> &[WrapperId] {
    &self.children
  }

  pub(crate) fn previous(&self) -> Option<WrapperId> {
    self.previous
  }

  pub fn next(&self) -> Option<WrapperId> {
    self.next
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  fn shift(&mut self, delta: isize) {
    self.start = self.start.saturating_add_signed(delta);
    self.end = self.end.saturating_add_signed(delta);
  }
}

#[derive(Debug, Clone, Default)]
pub struct Wrappers {
  wrappers: Vec<Wrapper>,
  roots:    Vec<WrapperId>,
}

impl Wrappers {
  /// Mirror `tree`, roots first, each sibling group allocated contiguously.
  pub fn new<T>(tree: &EntryTree<T>) -> Self {
    let mut this = Self {
      wrappers: Vec::with_capacity(tree.len()),
      roots:    Vec::with_capacity(tree.roots().len()),
    };

    let mut pending: Vec<(Option<WrapperId>, &[EntryId])> = vec![(None, tree.roots())];
    while let Some((parent, group)) = pending.pop() {
      let mut previous = None;
      for &entry_id in group {
        let entry = &tree[entry_id];
        let id = WrapperId(this.wrappers.len());
        this.wrappers.push(Wrapper {
          entry: entry_id,
          start: entry.start,
          end: entry.end,
          blank_lines_before: 0,
          parent,
          children: SmallVec::new(),
          previous,
          next: None,
        });

        if let Some(previous) = previous {
          this.wrappers[previous.0].next = Some(id);
        }
        match parent {
          Some(parent) => this.wrappers[parent.0].children.push(id),
          None => this.roots.push(id),
        }
        if !entry.children().is_empty() {
          pending.push((Some(id), entry.children()));
        }
        previous = Some(id);
      }
    }

    this
  }

  pub fn roots(&self) -> &[WrapperId] {
    &self.roots
  }

  pub fn get(&self, id: WrapperId) -> &Wrapper {
    &self.wrappers[id.0]
  }

  pub fn get_mut(&mut self, id: WrapperId) -> &mut Wrapper {
    &mut self.wrappers[id.0]
  }

  pub fn len(&self) -> usize {
    self.wrappers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.wrappers.is_empty()
  }

  /// Shift `id` and its whole subtree by `delta` chars.
  pub fn apply_shift(&mut self, id: WrapperId, delta: isize) {
    if delta == 0 {
      return;
    }
    let mut stack: SmallVec<[WrapperId; 8]> = SmallVec::new();
    stack.push(id);
    while let Some(id) = stack.pop() {
      let wrapper = &mut self.wrappers[id.0];
      wrapper.shift(delta);
      stack.extend(wrapper.children.iter().copied());
    }
  }

  /// Account for `delta` chars added (or removed, when negative) inside
  /// `changed`: every ancestor grows by `delta` and everything that follows
  /// an ancestor moves by `delta`.
  pub fn propagate(&mut self, changed: WrapperId, delta: isize) {
    if delta == 0 {
      return;
    }

    let mut ancestors: SmallVec<[WrapperId; 8]> = SmallVec::new();
    let mut parent = self.wrappers[changed.0].parent;
    while let Some(id) = parent {
      let wrapper = &mut self.wrappers[id.0];
      wrapper.end = wrapper.end.saturating_add_signed(delta);
      ancestors.push(id);
      parent = wrapper.parent;
    }

    // outermost first
    for &ancestor in ancestors.iter().rev() {
      let mut next = self.wrappers[ancestor.0].next;
      while let Some(id) = next {
        self.apply_shift(id, delta);
        next = self.wrappers[id.0].next;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // class A { f; g; }  class B { h; }
  fn sample() -> (EntryTree<()>, [EntryId; 5]) {
    let mut tree = EntryTree::new();
    let a = tree.push_root(0, 20, ());
    let f = tree.push_child(a, 10, 12, ());
    let g = tree.push_child(a, 13, 15, ());
    let b = tree.push_root(21, 40, ());
    let h = tree.push_child(b, 31, 33, ());
    (tree, [a, f, g, b, h])
  }

  fn find(wrappers: &Wrappers, entry: EntryId) -> WrapperId {
    (0..wrappers.len())
      .map(WrapperId)
      .find(|&id| wrappers.get(id).entry == entry)
      .unwrap()
  }

  #[test]
  fn mirrors_tree_with_sibling_links() {
    let (tree, [a, f, g, b, h]) = sample();
    let wrappers = Wrappers::new(&tree);
    assert_eq!(wrappers.len(), 5);

    let wa = find(&wrappers, a);
    let wb = find(&wrappers, b);
    let wf = find(&wrappers, f);
    let wg = find(&wrappers, g);
    assert_eq!(wrappers.roots(), &[wa, wb]);
    assert_eq!(wrappers.get(wa).next(), Some(wb));
    assert_eq!(wrappers.get(wb).previous(), Some(wa));
    assert_eq!(wrappers.get(wa).children(), &[wf, wg]);
    assert_eq!(wrappers.get(wf).next(), Some(wg));
    assert_eq!(wrappers.get(wg).next(), None);
    assert_eq!(wrappers.get(find(&wrappers, h)).parent(), Some(wb));
  }

  #[test]
  fn propagate_grows_ancestors_and_shifts_followers() {
    let (tree, [a, f, g, b, h]) = sample();
    let mut wrappers = Wrappers::new(&tree);

    wrappers.propagate(find(&wrappers, f), 3);

    let range = |entry| {
      let wrapper = wrappers.get(find(&wrappers, entry));
      (wrapper.start, wrapper.end)
    };
    assert_eq!(range(a), (0, 23));
    // siblings inside the same group are the changer's business
    assert_eq!(range(f), (10, 12));
    assert_eq!(range(g), (13, 15));
    assert_eq!(range(b), (24, 43));
    assert_eq!(range(h), (34, 36));
  }

  #[test]
  fn negative_shift() {
    let (tree, [_, _, _, b, h]) = sample();
    let mut wrappers = Wrappers::new(&tree);
    wrappers.apply_shift(find(&wrappers, b), -1);
    let wh = wrappers.get(find(&wrappers, h));
    assert_eq!((wh.start, wh.end), (30, 32));
  }
}
