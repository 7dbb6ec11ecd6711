/* src/server/core/rust/src/nav.rs */

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavClass {
  /// Visual separator drawn before the entry; no navigational effect.
  Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavTarget {
  /// Open outside the current navigation history.
  #[serde(rename = "_blank")]
  Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
  pub title: String,
  /// Locale-qualified route path or absolute external URL
  pub path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub class: Option<NavClass>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target: Option<NavTarget>,
}

impl NavigationEntry {
  pub fn is_external(&self) -> bool {
    self.path.starts_with("http://") || self.path.starts_with("https://")
  }
}

/// Navigation bar for `locale`: home, one link per section, then external
/// services. Recomputed on every call.
pub fn navigation_links(taxonomy: &Taxonomy, locale: Locale) -> Vec<NavigationEntry> {
  let internal = |title: &str, path: &str| NavigationEntry {
    title: title.to_string(),
    path: locale.qualify(path),
    class: None,
    target: None,
  };

  let mut links = Vec::with_capacity(1 + taxonomy.sections.len() + taxonomy.external_links.len());
  links.push(internal(taxonomy.home.title.get(locale), &taxonomy.home.path));
  for section in &taxonomy.sections {
    links.push(internal(section.title.get(locale), &section.path()));
  }

  for link in &taxonomy.external_links {
    let path = if link.locale_suffix {
      format!("{}{}", link.url, locale.base_path())
    } else {
      link.url.clone()
    };
    links.push(NavigationEntry {
      title: link.title.get(locale).to_string(),
      path,
      class: link.class,
      target: link.target,
    });
  }

  links
}
