//! Rule-based rearrangement of entries in a text buffer.
//!
//! An extraction step describes the rearrangeable regions of a document as
//! an [`EntryTree`]. [`arrange`] walks that tree innermost group first,
//! computes a new order for every sibling group from the
//! [`ArrangementSettings`] and rewrites the buffer, fixing the blank lines
//! between entries as the [`BlankLinePolicy`] asks.
//!
//! ```no_run
//! use arrange_core::Document;
//! use arrange_lib::{
//!   ArrangementSettings,
//!   BlankLines,
//!   EntryTree,
//!   Strategy,
//!   arrange,
//!   standard::{
//!     StandardBlankLines,
//!     StdAttributes,
//!     StdMatcher,
//!   },
//! };
//!
//! let mut doc = Document::from("fn b() {}\n\nfn a() {}\n");
//! let mut tree = EntryTree::new();
//! tree.push_root(0, 9, StdAttributes::new("fn", "b"));
//! tree.push_root(11, 20, StdAttributes::new("fn", "a"));
//!
//! let settings = ArrangementSettings::default()
//!   .with_rule(StdMatcher::name("a").into_rule())
//!   .with_rule(StdMatcher::name("b").into_rule());
//! let policy = StandardBlankLines {
//!   first_in_parent: BlankLines::Exactly(0),
//!   default: BlankLines::Exactly(1),
//!   ..Default::default()
//! };
//!
//! arrange(&tree, &settings, &policy, &mut doc, Strategy::Auto).unwrap();
//! assert_eq!(doc.text().to_string(), "fn a() {}\n\nfn b() {}\n");
//! ```

mod changer;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod matcher;
pub mod policy;
pub mod rule;
pub mod spacing;
pub mod standard;
pub mod wrapper;

pub use config::ArrangeConfig;
pub use engine::{
  Strategy,
  arrange,
};
pub use entry::{
  Entry,
  EntryId,
  EntryTree,
};
pub use error::{
  ArrangeError,
  ConfigError,
};
pub use matcher::arrange_entries;
pub use policy::{
  BlankLinePolicy,
  BlankLines,
  PolicyError,
};
pub use rule::{
  ArrangementSettings,
  EntryMatcher,
  GroupingRule,
  GroupingType,
  MatchRule,
  OrderType,
};
