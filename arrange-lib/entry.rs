//! The pre-extracted entry tree the engine rearranges.
//!
//! Entries are produced by a language specific extraction step that lives
//! outside this crate. The tree is append-only: entries are pushed in
//! document order and addressed by [`EntryId`]. The engine only reads it.

use std::ops::Index;

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
  pub const fn index(self) -> usize {
    self.0
  }
}

/// One rearrangeable region of the document.
#[derive(Debug, Clone)]
pub struct Entry<T> {
  /// Char offset of the first char of the entry.
  pub start:      usize,
  /// Char offset one past the last char of the entry.
  pub end:        usize,
  pub attributes: T,
  parent:         Option<EntryId>,
  children:       SmallVec<[EntryId; 4]>,
  dependencies:   Option<Vec<EntryId>>,
  can_be_matched: bool,
}

impl<T> Entry<T> {
  pub fn parent(&self) -> Option<EntryId> {
    self.parent
  }

  pub fn children(&self) -> &[EntryId] {
    &self.children
  }

  /// Entries this one has to follow. `None` means unconstrained.
  pub fn dependencies(&self) -> Option<&[EntryId]> {
    self.dependencies.as_deref()
  }

  /// Whether match rules may claim this entry.
  pub fn can_be_matched(&self) -> bool {
    self.can_be_matched
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

#[derive(Debug, Clone)]
pub struct EntryTree<T> {
  entries: Vec<Entry<T>>,
  roots:   Vec<EntryId>,
}

impl<T> Default for EntryTree<T> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
      roots:   Vec::new(),
    }
  }
}

impl<T> EntryTree<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_root(&mut self, start: usize, end: usize, attributes: T) -> EntryId {
    let id = self.push(None, start, end, attributes);
    self.roots.push(id);
    id
  }

  /// Append a child to `parent`. Children must be pushed in document
  /// order.
  pub fn push_child(&mut self, parent: EntryId, start: usize, end: usize, attributes: T) -> EntryId {
    let id = self.push(Some(parent), start, end, attributes);
    self.entries[parent.0].children.push(id);
    id
  }

  fn push(&mut self, parent: Option<EntryId>, start: usize, end: usize, attributes: T) -> EntryId {
    debug_assert!(start <= end, "entry {start}..{end} is inverted");
    let id = EntryId(self.entries.len());
    self.entries.push(Entry {
      start,
      end,
      attributes,
      parent,
      children: SmallVec::new(),
      dependencies: None,
      can_be_matched: true,
    });
    id
  }

  pub fn set_dependencies(&mut self, id: EntryId, dependencies: Option<Vec<EntryId>>) {
    self.entries[id.0].dependencies = dependencies;
  }

  pub fn set_can_be_matched(&mut self, id: EntryId, can_be_matched: bool) {
    self.entries[id.0].can_be_matched = can_be_matched;
  }

  pub fn get(&self, id: EntryId) -> Option<&Entry<T>> {
    self.entries.get(id.0)
  }

  pub fn roots(&self) -> &[EntryId] {
    &self.roots
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry<T>)> {
    self
      .entries
      .iter()
      .enumerate()
      .map(|(idx, entry)| (EntryId(idx), entry))
  }
}

impl<T> Index<EntryId> for EntryTree<T> {
  type Output = Entry<T>;

  fn index(&self, id: EntryId) -> &Self::Output {
    &self.entries[id.0]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_tree_in_document_order() {
    let mut tree = EntryTree::new();
    let class = tree.push_root(0, 40, "class");
    let field = tree.push_child(class, 10, 20, "field");
    let method = tree.push_child(class, 22, 38, "method");
    tree.set_dependencies(method, Some(vec![field]));
    tree.set_can_be_matched(field, false);

    assert_eq!(tree.roots(), &[class]);
    assert_eq!(tree[class].children(), &[field, method]);
    assert_eq!(tree[field].parent(), Some(class));
    assert_eq!(tree[method].dependencies(), Some(&[field][..]));
    assert_eq!(tree[class].dependencies(), None);
    assert!(!tree[field].can_be_matched());
    assert!(tree[method].can_be_matched());
    assert_eq!(tree[method].len(), 16);
    assert_eq!(tree.len(), 3);
  }
}
