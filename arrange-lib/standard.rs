//! Ready-made attributes, matchers and blank-line policy.
//!
//! Extraction steps that have nothing better to offer can describe entries
//! with [`StdAttributes`]: a kind (`"field"`, `"method"`, ...), a name and a
//! set of modifiers. [`StdMatcher`] builds rules over those, and
//! [`StandardBlankLines`] is the policy [`ArrangeConfig`] produces.
//!
//! [`ArrangeConfig`]: crate::config::ArrangeConfig

use std::collections::HashMap;

use arrange_core::Tendril;
use smallvec::SmallVec;

use crate::{
  entry::Entry,
  policy::{
    BlankLinePolicy,
    BlankLines,
    PolicyError,
  },
  rule::{
    EntryMatcher,
    MatchRule,
  },
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StdAttributes {
  pub kind:      Tendril,
  pub name:      Tendril,
  pub modifiers: SmallVec<[Tendril; 2]>,
}

impl StdAttributes {
  pub fn new(kind: &str, name: &str) -> Self {
    Self {
      kind:      kind.into(),
      name:      name.into(),
      modifiers: SmallVec::new(),
    }
  }

  pub fn with_modifier(mut self, modifier: &str) -> Self {
    self.modifiers.push(modifier.into());
    self
  }

  pub fn has_modifier(&self, modifier: &str) -> bool {
    self.modifiers.iter().any(|m| m.as_str() == modifier)
  }
}

/// Declarative matcher over [`StdAttributes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdMatcher {
  Any,
  Kind(Tendril),
  Name(Tendril),
  Modifier(Tendril),
  /// Matches when every inner matcher does.
  All(Vec<StdMatcher>),
  /// Matches when at least one inner matcher does.
  AnyOf(Vec<StdMatcher>),
  Not(Box<StdMatcher>),
}

impl StdMatcher {
  pub fn kind(kind: &str) -> Self {
    Self::Kind(kind.into())
  }

  pub fn name(name: &str) -> Self {
    Self::Name(name.into())
  }

  pub fn modifier(modifier: &str) -> Self {
    Self::Modifier(modifier.into())
  }

  pub fn negate(self) -> Self {
    Self::Not(Box::new(self))
  }

  pub fn matches(&self, attributes: &StdAttributes) -> bool {
    match self {
      Self::Any => true,
      Self::Kind(kind) => attributes.kind == *kind,
      Self::Name(name) => attributes.name == *name,
      Self::Modifier(modifier) => attributes.has_modifier(modifier),
      Self::All(matchers) => matchers.iter().all(|m| m.matches(attributes)),
      Self::AnyOf(matchers) => matchers.iter().any(|m| m.matches(attributes)),
      Self::Not(matcher) => !matcher.matches(attributes),
    }
  }

  pub fn into_rule(self) -> MatchRule<StdAttributes> {
    MatchRule::new(self)
  }
}

impl EntryMatcher<StdAttributes> for StdMatcher {
  fn is_matched(&self, entry: &Entry<StdAttributes>) -> bool {
    self.matches(&entry.attributes)
  }
}

/// Blank lines by entry kind.
///
/// The first entry of a parent gets `first_in_parent`. Between two entries
/// the larger of the counts configured for their kinds wins; when neither
/// kind is configured, `default` applies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StandardBlankLines {
  pub first_in_parent: BlankLines,
  pub default:         BlankLines,
  pub by_kind:         HashMap<Tendril, usize>,
}

impl StandardBlankLines {
  fn kind_count(&self, attributes: &StdAttributes) -> Option<usize> {
    self.by_kind.get(&attributes.kind).copied()
  }
}

impl BlankLinePolicy<StdAttributes> for StandardBlankLines {
  fn blank_lines(
    &self,
    _parent: Option<&Entry<StdAttributes>>,
    previous: Option<&Entry<StdAttributes>>,
    entry: &Entry<StdAttributes>,
  ) -> Result<BlankLines, PolicyError> {
    let Some(previous) = previous else {
      return Ok(self.first_in_parent);
    };

    let counts = [
      self.kind_count(&previous.attributes),
      self.kind_count(&entry.attributes),
    ];
    Ok(match counts.into_iter().flatten().max() {
      Some(count) => BlankLines::Exactly(count),
      None => self.default,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entry::EntryTree;

  fn tree() -> (EntryTree<StdAttributes>, Vec<crate::entry::EntryId>) {
    let mut tree = EntryTree::new();
    let ids = vec![
      tree.push_root(0, 5, StdAttributes::new("field", "count")),
      tree.push_root(6, 12, StdAttributes::new("method", "run").with_modifier("pub")),
      tree.push_root(13, 20, StdAttributes::new("type", "Inner")),
    ];
    (tree, ids)
  }

  #[test]
  fn matchers() {
    let (tree, ids) = tree();
    let method = &tree[ids[1]];

    assert!(StdMatcher::Any.is_matched(method));
    assert!(StdMatcher::kind("method").is_matched(method));
    assert!(!StdMatcher::name("count").is_matched(method));
    assert!(StdMatcher::modifier("pub").is_matched(method));
    assert!(
      StdMatcher::All(vec![StdMatcher::kind("method"), StdMatcher::modifier("pub")])
        .is_matched(method)
    );
    assert!(
      !StdMatcher::All(vec![StdMatcher::kind("method"), StdMatcher::name("walk")])
        .is_matched(method)
    );
    assert!(
      StdMatcher::AnyOf(vec![StdMatcher::kind("field"), StdMatcher::name("run")])
        .is_matched(method)
    );
    assert!(StdMatcher::modifier("pub").negate().is_matched(&tree[ids[0]]));
  }

  #[test]
  fn standard_blank_lines() {
    let (tree, ids) = tree();
    let policy = StandardBlankLines {
      first_in_parent: BlankLines::Exactly(0),
      default:         BlankLines::Any,
      by_kind:         HashMap::from([("field".into(), 0), ("method".into(), 1)]),
    };

    let [field, method, inner] = [&tree[ids[0]], &tree[ids[1]], &tree[ids[2]]];
    assert_eq!(
      policy.blank_lines(None, None, field),
      Ok(BlankLines::Exactly(0))
    );
    assert_eq!(
      policy.blank_lines(None, Some(field), method),
      Ok(BlankLines::Exactly(1))
    );
    assert_eq!(
      policy.blank_lines(None, Some(method), field),
      Ok(BlankLines::Exactly(1))
    );
    assert_eq!(
      policy.blank_lines(None, Some(method), inner),
      Ok(BlankLines::Exactly(1))
    );
    // neither side configured
    let other = &tree[ids[2]];
    assert_eq!(policy.blank_lines(None, Some(other), inner), Ok(BlankLines::Any));
  }
}
