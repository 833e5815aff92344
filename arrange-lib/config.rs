//! TOML configuration for an arrangement run.
//!
//! ```toml
//! strategy = "marker-aware"
//!
//! [blank-lines]
//! first-in-parent = 0
//! default = 1
//! by-kind = { field = 0, method = 1 }
//! ```
//!
//! Every key is optional. An omitted blank-line count means "leave the
//! existing blank lines alone".

use std::{
  collections::HashMap,
  fs,
  path::Path,
};

use serde::Deserialize;

use crate::{
  engine::Strategy,
  error::ConfigError,
  standard::StandardBlankLines,
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ArrangeConfig {
  pub strategy:    Strategy,
  pub blank_lines: BlankLinesConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BlankLinesConfig {
  pub first_in_parent: Option<usize>,
  pub default:         Option<usize>,
  pub by_kind:         HashMap<String, usize>,
}

impl ArrangeConfig {
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| {
      ConfigError::Read {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_toml(&source)
  }

  pub fn blank_line_policy(&self) -> StandardBlankLines {
    StandardBlankLines {
      first_in_parent: self.blank_lines.first_in_parent.into(),
      default:         self.blank_lines.default.into(),
      by_kind:         self
        .blank_lines
        .by_kind
        .iter()
        .map(|(kind, &count)| (kind.as_str().into(), count))
        .collect(),
    }
  }
}
