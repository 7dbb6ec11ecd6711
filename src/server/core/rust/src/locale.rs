/* src/server/core/rust/src/locale.rs */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display language of the documentation site.
///
/// Chinese pages live under the `/cn` base path; the default (English)
/// locale has an empty base path so its URLs are unprefixed.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Locale {
  #[serde(rename = "zh-CN")]
  ZhCn,
  #[default]
  #[serde(rename = "en")]
  En,
}

impl Locale {
  /// Every locale the site is published in, in catalog order.
  pub const ALL: [Locale; 2] = [Locale::ZhCn, Locale::En];

  /// Resolve an external locale signal. Total: anything other than an
  /// exact known tag (absent, empty, unknown) yields the default locale.
  pub fn resolve(signal: Option<&str>) -> Self {
    signal.and_then(Self::parse).unwrap_or_default()
  }

  /// Exact tag match, no normalization.
  pub fn parse(tag: &str) -> Option<Self> {
    match tag {
      "zh-CN" => Some(Self::ZhCn),
      "en" => Some(Self::En),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::ZhCn => "zh-CN",
      Self::En => "en",
    }
  }

  pub fn base_path(self) -> &'static str {
    match self {
      Self::ZhCn => "/cn",
      Self::En => "",
    }
  }

  /// Directory holding this locale's page modules.
  pub fn page_dir(self) -> &'static str {
    self.as_str()
  }

  pub fn is_default(self) -> bool {
    self == Self::default()
  }

  /// Prefix a locale-relative path (`/base/ast`) with this locale's base path.
  pub fn qualify(self, path: &str) -> String {
    format!("{}{path}", self.base_path())
  }

  /// Split a request path into its locale and the locale-relative remainder.
  /// `/cn` alone maps to `/`; `/cnx` is not a locale prefix.
  pub fn strip_base(path: &str) -> (Self, &str) {
    for locale in Self::ALL {
      let base = locale.base_path();
      if base.is_empty() {
        continue;
      }
      if let Some(rest) = path.strip_prefix(base) {
        if rest.is_empty() {
          return (locale, "/");
        }
        if rest.starts_with('/') {
          return (locale, rest);
        }
      }
    }
    (Self::default(), path)
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
