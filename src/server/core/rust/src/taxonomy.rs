/* src/server/core/rust/src/taxonomy.rs */

// Section taxonomy: the one description of the documentation tree from which
// the menu catalog, navigation bar, page registry and route table derive.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::errors::DocsError;
use crate::locale::Locale;
use crate::nav::{NavClass, NavTarget};

const BUILTIN_SITE: &str = include_str!("../data/site.json");

/// A string carried in every published locale. Deserialization fails when
/// either variant is missing, so a taxonomy cannot drift between locales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Localized {
  #[serde(rename = "zh-CN")]
  pub zh_cn: String,
  pub en: String,
}

impl Localized {
  pub fn new(zh_cn: impl Into<String>, en: impl Into<String>) -> Self {
    Self { zh_cn: zh_cn.into(), en: en.into() }
  }

  pub fn get(&self, locale: Locale) -> &str {
    match locale {
      Locale::ZhCn => &self.zh_cn,
      Locale::En => &self.en,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Taxonomy {
  pub home: HomeLink,
  pub sections: Vec<SectionDef>,
  #[serde(default)]
  pub external_links: Vec<ExternalLink>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HomeLink {
  pub title: Localized,
  /// Locale-relative, e.g. `/index`
  pub path: String,
}

/// A top-level documentation group (core, router, CLI, request plugin).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionDef {
  /// Path segment of the section, `base` for `/base`
  pub key: String,
  /// Label in the navigation bar
  pub title: Localized,
  pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryDef {
  pub title: Localized,
  #[serde(default)]
  pub description: Localized,
  pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageEntry {
  /// Section-relative segment. Empty marks the section's index page.
  #[serde(default)]
  pub slug: String,
  /// Page module path when it differs from `<section>/<slug>`.
  #[serde(default)]
  pub module: Option<String>,
  pub title: Localized,
  #[serde(default)]
  pub description: Localized,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalLink {
  pub title: Localized,
  pub url: String,
  /// Service localizes by path suffix: non-default locales append their base path.
  #[serde(default)]
  pub locale_suffix: bool,
  #[serde(default)]
  pub class: Option<NavClass>,
  #[serde(default)]
  pub target: Option<NavTarget>,
}

impl Taxonomy {
  /// The site taxonomy compiled into the binary. Parsed once per process.
  pub fn builtin() -> &'static Taxonomy {
    static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
    BUILTIN.get_or_init(|| Taxonomy::from_json(BUILTIN_SITE).expect("embedded site taxonomy"))
  }

  pub fn from_json(json: &str) -> Result<Self, DocsError> {
    serde_json::from_str(json).map_err(|e| DocsError::invalid_taxonomy(e.to_string()))
  }

  pub fn load(path: &Path) -> Result<Self, DocsError> {
    let content = std::fs::read_to_string(path)
      .map_err(|e| DocsError::internal(format!("failed to read {}: {e}", path.display())))?;
    Self::from_json(&content)
      .map_err(|e| DocsError::invalid_taxonomy(format!("{}: {}", path.display(), e.message())))
  }

  pub fn section(&self, key: &str) -> Option<&SectionDef> {
    self.sections.iter().find(|s| s.key == key)
  }

  pub fn page_count(&self) -> usize {
    self.sections.iter().map(|s| s.pages().count()).sum()
  }
}

impl SectionDef {
  /// Locale-relative section path, `/base`
  pub fn path(&self) -> String {
    format!("/{}", self.key)
  }

  /// Pages in display order, across categories.
  pub fn pages(&self) -> impl Iterator<Item = &PageEntry> {
    self.categories.iter().flat_map(|c| c.pages.iter())
  }

  pub fn first_page(&self) -> Option<&PageEntry> {
    self.pages().next()
  }
}

impl PageEntry {
  pub fn is_index(&self) -> bool {
    self.slug.is_empty()
  }

  /// Locale-relative path of this page within `section`.
  pub fn path_in(&self, section: &SectionDef) -> String {
    if self.is_index() { section.path() } else { format!("/{}/{}", section.key, self.slug) }
  }

  pub fn module_in(&self, section: &SectionDef) -> String {
    match self.module {
      Some(ref module) => module.clone(),
      None if self.is_index() => section.key.clone(),
      None => format!("{}/{}", section.key, self.slug),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_parses() {
    let site = Taxonomy::builtin();
    let keys: Vec<&str> = site.sections.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["base", "router", "cli", "requester"]);
    assert_eq!(site.page_count(), 46);
    assert_eq!(site.home.path, "/index");
  }

  #[test]
  fn builtin_section_sizes() {
    let site = Taxonomy::builtin();
    let counts: Vec<usize> = site.sections.iter().map(|s| s.pages().count()).collect();
    assert_eq!(counts, [21, 13, 11, 1]);
  }

  #[test]
  fn requester_is_index_page_with_module_override() {
    let site = Taxonomy::builtin();
    let section = site.section("requester").unwrap();
    let page = section.first_page().unwrap();
    assert!(page.is_index());
    assert_eq!(page.path_in(section), "/requester");
    assert_eq!(page.module_in(section), "plugins/request");
  }

  #[test]
  fn page_paths_and_modules() {
    let site = Taxonomy::builtin();
    let base = site.section("base").unwrap();
    let page = base.first_page().unwrap();
    assert_eq!(page.path_in(base), "/base/introduction");
    assert_eq!(page.module_in(base), "base/introduction");
  }

  #[test]
  fn localized_get() {
    let text = Localized::new("核心", "Core");
    assert_eq!(text.get(Locale::ZhCn), "核心");
    assert_eq!(text.get(Locale::En), "Core");
  }

  #[test]
  fn missing_locale_variant_is_rejected() {
    let json = r#"{
      "home": { "title": { "en": "Home" }, "path": "/index" },
      "sections": []
    }"#;
    let err = Taxonomy::from_json(json).unwrap_err();
    assert_eq!(err.code(), "INVALID_TAXONOMY");
    assert!(err.message().contains("zh-CN"));
  }

  #[test]
  fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");
    std::fs::write(
      &path,
      r#"{
        "home": { "title": { "zh-CN": "首页", "en": "Home" }, "path": "/index" },
        "sections": [{
          "key": "guide",
          "title": { "zh-CN": "指南", "en": "Guide" },
          "categories": [{
            "title": { "zh-CN": "开始", "en": "Start" },
            "pages": [{ "slug": "intro", "title": { "zh-CN": "简介", "en": "Intro" } }]
          }]
        }]
      }"#,
    )
    .unwrap();
    let site = Taxonomy::load(&path).unwrap();
    assert_eq!(site.page_count(), 1);
    assert!(site.external_links.is_empty());
    assert_eq!(site.sections[0].categories[0].description, Localized::default());
  }

  #[test]
  fn load_missing_file_is_error() {
    let err = Taxonomy::load(Path::new("/nonexistent/site.json")).unwrap_err();
    assert_eq!(err.code(), "INTERNAL_ERROR");
  }
}
