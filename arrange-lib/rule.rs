//! Match rules and arrangement settings.

use std::fmt;

use crate::entry::Entry;

/// Predicate over an entry and its attributes.
pub trait EntryMatcher<T> {
  fn is_matched(&self, entry: &Entry<T>) -> bool;
}

impl<T, F> EntryMatcher<T> for F
where
  F: Fn(&Entry<T>) -> bool,
{
  fn is_matched(&self, entry: &Entry<T>) -> bool {
    self(entry)
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
  /// Matched entries keep the order they were encountered in.
  #[default]
  Keep,
  ByName,
}

pub struct MatchRule<T> {
  matcher:    Box<dyn EntryMatcher<T>>,
  order_type: OrderType,
}

impl<T> MatchRule<T> {
  pub fn new(matcher: impl EntryMatcher<T> + 'static) -> Self {
    Self {
      matcher:    Box::new(matcher),
      order_type: OrderType::default(),
    }
  }

  pub fn with_order_type(mut self, order_type: OrderType) -> Self {
    self.order_type = order_type;
    self
  }

  pub fn order_type(&self) -> OrderType {
    self.order_type
  }

  pub fn matcher(&self) -> &dyn EntryMatcher<T> {
    self.matcher.as_ref()
  }

  pub fn is_matched(&self, entry: &Entry<T>) -> bool {
    self.matcher.is_matched(entry)
  }
}

impl<T> fmt::Debug for MatchRule<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MatchRule")
      .field("order_type", &self.order_type)
      .finish_non_exhaustive()
  }
}

/// How the extraction step groups related entries before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingType {
  GettersAndSetters,
  OverriddenMethods,
  DependentMethods,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupingRule {
  pub grouping_type: GroupingType,
  pub order_type:    OrderType,
}

impl GroupingRule {
  pub fn new(grouping_type: GroupingType) -> Self {
    Self {
      grouping_type,
      order_type: OrderType::default(),
    }
  }
}

/// Ordered match rules plus grouping rules.
///
/// Grouping rules are consumed by entry extraction and carried here
/// untouched.
#[derive(Debug)]
pub struct ArrangementSettings<T> {
  groupings: Vec<GroupingRule>,
  rules:     Vec<MatchRule<T>>,
}

impl<T> Default for ArrangementSettings<T> {
  fn default() -> Self {
    Self {
      groupings: Vec::new(),
      rules:     Vec::new(),
    }
  }
}

impl<T> ArrangementSettings<T> {
  pub fn new(groupings: Vec<GroupingRule>, rules: Vec<MatchRule<T>>) -> Self {
    Self { groupings, rules }
  }

  pub fn with_rule(mut self, rule: MatchRule<T>) -> Self {
    self.rules.push(rule);
    self
  }

  pub fn with_grouping(mut self, grouping: GroupingRule) -> Self {
    self.groupings.push(grouping);
    self
  }

  pub fn rules(&self) -> &[MatchRule<T>] {
    &self.rules
  }

  pub fn groupings(&self) -> &[GroupingRule] {
    &self.groupings
  }
}
