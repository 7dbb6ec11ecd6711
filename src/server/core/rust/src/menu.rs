/* src/server/core/rust/src/menu.rs */

use serde::Serialize;

use crate::locale::Locale;
use crate::taxonomy::Taxonomy;

/// One node of the table of contents, in the shape the TOC component renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSection {
  /// `<group>-<index>` for categories, `<group>-<index>-<index>` for pages
  #[serde(rename = "objectID")]
  pub object_id: String,
  pub title: String,
  pub description: String,
  /// Locale-qualified route path; only leaves carry one.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<MenuSection>,
}

impl MenuSection {
  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }
}

/// The menu trees of one top-level section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
  pub key: String,
  pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
  locale: Locale,
  groups: Vec<MenuGroup>,
}

/// Leaves adjacent to a page in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
  pub prev: Option<&'a MenuSection>,
  pub next: Option<&'a MenuSection>,
}

impl MenuCatalog {
  pub fn build(taxonomy: &Taxonomy, locale: Locale) -> Self {
    let groups = taxonomy
      .sections
      .iter()
      .enumerate()
      .map(|(gi, section)| {
        let group = gi + 1;
        let sections = section
          .categories
          .iter()
          .enumerate()
          .map(|(ci, category)| {
            let category_id = format!("{group}-{}", ci + 1);
            let children = category
              .pages
              .iter()
              .enumerate()
              .map(|(pi, page)| MenuSection {
                object_id: format!("{category_id}-{}", pi + 1),
                title: page.title.get(locale).to_string(),
                description: page.description.get(locale).to_string(),
                path: Some(locale.qualify(&page.path_in(section))),
                children: Vec::new(),
              })
              .collect();
            MenuSection {
              object_id: category_id,
              title: category.title.get(locale).to_string(),
              description: category.description.get(locale).to_string(),
              path: None,
              children,
            }
          })
          .collect();
        MenuGroup { key: section.key.clone(), sections }
      })
      .collect();

    Self { locale, groups }
  }

  /// Wrap hand-assembled groups, e.g. a catalog received from elsewhere that
  /// still has to pass validation.
  pub fn from_groups(locale: Locale, groups: Vec<MenuGroup>) -> Self {
    Self { locale, groups }
  }

  pub fn locale(&self) -> Locale {
    self.locale
  }

  pub fn groups(&self) -> &[MenuGroup] {
    &self.groups
  }

  /// Every group's trees concatenated in declaration order.
  pub fn all_menus(&self) -> Vec<&MenuSection> {
    self.groups.iter().flat_map(|g| g.sections.iter()).collect()
  }

  /// Leaves in depth-first display order.
  pub fn leaves(&self) -> Vec<&MenuSection> {
    fn collect<'a>(node: &'a MenuSection, out: &mut Vec<&'a MenuSection>) {
      if node.is_leaf() {
        out.push(node);
      }
      for child in &node.children {
        collect(child, out);
      }
    }
    let mut out = Vec::new();
    for root in self.all_menus() {
      collect(root, &mut out);
    }
    out
  }

  pub fn find(&self, object_id: &str) -> Option<&MenuSection> {
    fn walk<'a>(node: &'a MenuSection, id: &str) -> Option<&'a MenuSection> {
      if node.object_id == id {
        return Some(node);
      }
      node.children.iter().find_map(|c| walk(c, id))
    }
    self.all_menus().into_iter().find_map(|root| walk(root, object_id))
  }

  /// Previous and next leaf around the leaf at `path` (locale-qualified).
  pub fn neighbors(&self, path: &str) -> Option<Neighbors<'_>> {
    let leaves = self.leaves();
    let idx = leaves.iter().position(|l| l.path.as_deref() == Some(path))?;
    Some(Neighbors {
      prev: idx.checked_sub(1).map(|i| leaves[i]),
      next: leaves.get(idx + 1).copied(),
    })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn all_menus_concatenates_groups_in_order() {
    let catalog = MenuCatalog::build(Taxonomy::builtin(), Locale::En);
    let expected: Vec<&MenuSection> =
      catalog.groups().iter().flat_map(|g| g.sections.iter()).collect();
    assert_eq!(catalog.all_menus(), expected);
    let ids: Vec<&str> = catalog.all_menus().iter().map(|m| m.object_id.as_str()).collect();
    assert_eq!(
      ids,
      ["1-1", "1-2", "1-3", "1-4", "1-5", "2-1", "2-2", "2-3", "3-1", "3-2", "3-3", "3-4", "4-1"]
    );
  }

  #[test]
  fn object_ids_unique() {
    for locale in Locale::ALL {
      let catalog = MenuCatalog::build(Taxonomy::builtin(), locale);
      let mut seen = HashSet::new();
      for root in catalog.all_menus() {
        assert!(seen.insert(root.object_id.clone()));
        for child in &root.children {
          assert!(seen.insert(child.object_id.clone()), "duplicate {}", child.object_id);
        }
      }
      assert_eq!(seen.len(), 13 + 46);
    }
  }

  #[test]
  fn leaf_paths_are_locale_qualified() {
    let zh = MenuCatalog::build(Taxonomy::builtin(), Locale::ZhCn);
    let en = MenuCatalog::build(Taxonomy::builtin(), Locale::En);
    for (z, e) in zh.leaves().iter().zip(en.leaves()) {
      assert_eq!(z.object_id, e.object_id);
      let ep = e.path.as_deref().unwrap();
      assert_eq!(z.path.as_deref().unwrap(), format!("/cn{ep}"));
    }
  }

  #[test]
  fn categories_have_no_path() {
    let catalog = MenuCatalog::build(Taxonomy::builtin(), Locale::ZhCn);
    assert!(catalog.all_menus().iter().all(|m| m.path.is_none() && !m.is_leaf()));
  }

  #[test]
  fn find_by_id() {
    let catalog = MenuCatalog::build(Taxonomy::builtin(), Locale::ZhCn);
    let node = catalog.find("1-1-1").unwrap();
    assert_eq!(node.title, "简介");
    assert_eq!(node.path.as_deref(), Some("/cn/base/introduction"));
    assert_eq!(catalog.find("2-3").unwrap().title, "深入了解");
    assert!(catalog.find("9-9").is_none());
  }

  #[test]
  fn requester_leaf_points_at_section() {
    let catalog = MenuCatalog::build(Taxonomy::builtin(), Locale::En);
    let node = catalog.find("4-1-1").unwrap();
    assert_eq!(node.title, "Request");
    assert_eq!(node.path.as_deref(), Some("/requester"));
  }

  #[test]
  fn neighbors_cross_category_and_section() {
    let catalog = MenuCatalog::build(Taxonomy::builtin(), Locale::En);
    let n = catalog.neighbors("/base/quick-start").unwrap();
    assert_eq!(n.prev.unwrap().path.as_deref(), Some("/base/introduction"));
    assert_eq!(n.next.unwrap().path.as_deref(), Some("/base/component"));

    let first = catalog.neighbors("/base/introduction").unwrap();
    assert!(first.prev.is_none());

    let last = catalog.neighbors("/requester").unwrap();
    assert_eq!(last.prev.unwrap().path.as_deref(), Some("/cli/plugins"));
    assert!(last.next.is_none());

    assert!(catalog.neighbors("/nope").is_none());
  }

  #[test]
  fn serialized_shape() {
    let catalog = MenuCatalog::build(Taxonomy::builtin(), Locale::En);
    let json = serde_json::to_value(catalog.find("4-1").unwrap()).unwrap();
    assert_eq!(json["objectID"], "4-1");
    assert!(json.get("path").is_none());
    assert_eq!(json["children"][0]["path"], "/requester");
    assert!(json["children"][0].get("children").is_none());
  }
}
