//! Text primitives underneath the arrangement engine.
//!
//! The engine never talks to a concrete editor. It works against
//! [`TextBuffer`], a char-indexed buffer with line queries and
//! replace/move operations. Two implementations live here: plain
//! [`ropey::Rope`] and [`Document`], which additionally keeps a table of
//! markers valid across every edit.

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod buffer;
pub mod chars;
pub mod document;
pub mod marker;
pub mod transaction;

pub type Tendril = SmartString<LazyCompact>;

pub use buffer::{
  BufferError,
  TextBuffer,
};
pub use document::Document;
pub use marker::{
  Marker,
  MarkerId,
};
