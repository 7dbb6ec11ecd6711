/* src/cli/core/src/inspect.rs */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, bail};
use joker_docs::{
  FlatRoute, Locale, MemoryPageLoader, MenuCatalog, PageLoader, PageRegistry, Taxonomy,
  build_routes, flatten_routes, navigation_links, validate_site,
};
use joker_docs_axum::FsPageLoader;

use crate::ui;

/// Route tables are only listed here, never loaded; an empty loader is enough.
fn listing_loader() -> Arc<dyn PageLoader> {
  Arc::new(MemoryPageLoader::new())
}

pub fn run_check(taxonomy: &Taxonomy, pages_dir: Option<&Path>) -> Result<()> {
  ui::banner("check");
  let total = if pages_dir.is_some() { 3 } else { 2 };

  ui::step(1, total, "Validating taxonomy");
  if let Err(violations) = validate_site(taxonomy) {
    for v in &violations {
      ui::fail(&v.to_string());
    }
    bail!("{} violation(s) found", violations.len());
  }
  ui::ok(&format!(
    "{} sections, {} pages",
    taxonomy.sections.len(),
    taxonomy.page_count()
  ));

  ui::step(2, total, "Building route tables");
  let loader = listing_loader();
  for locale in Locale::ALL {
    let routes = build_routes(taxonomy, locale, &loader);
    ui::ok(&ui::route_summary(locale, &flatten_routes(&routes)));
  }

  if let Some(dir) = pages_dir {
    ui::step(3, total, "Looking for page modules");
    let missing = missing_pages(taxonomy, dir);
    if missing.is_empty() {
      ui::ok(&format!("all page modules present in {}", dir.display()));
    } else {
      // Missing modules only fail at navigation time; report, don't abort
      for file in &missing {
        ui::warn(&format!("missing {file}"));
      }
    }
  }

  ui::blank();
  Ok(())
}

/// Page files the filesystem loader would fail to find, home pages included.
pub fn missing_pages(taxonomy: &Taxonomy, dir: &Path) -> Vec<String> {
  let loader = FsPageLoader::new(dir);
  let registry = PageRegistry::from_taxonomy(taxonomy);
  let homes = Locale::ALL.map(joker_docs::PageId::home);
  homes
    .iter()
    .chain(registry.iter().map(|(_, _, id)| id))
    .map(|id| loader.file_for(id))
    .filter(|file| !file.is_file())
    .map(|file| file.display().to_string())
    .collect()
}

fn route_line(locale: Locale, flat: &FlatRoute<'_>) -> String {
  let path = locale.qualify(&flat.path);
  if let Some(target) = flat.node.redirect_target() {
    format!("{path} -> {}", locale.qualify(target))
  } else if let Some(page) = flat.node.deferred() {
    format!("{path}  {}", page.page())
  } else {
    path
  }
}

pub fn route_lines(taxonomy: &Taxonomy, locale: Locale) -> Vec<String> {
  let routes = build_routes(taxonomy, locale, &listing_loader());
  flatten_routes(&routes).iter().map(|flat| route_line(locale, flat)).collect()
}

pub fn routes_json(taxonomy: &Taxonomy, locale: Locale) -> serde_json::Value {
  let routes = build_routes(taxonomy, locale, &listing_loader());
  let entries: Vec<serde_json::Value> = flatten_routes(&routes)
    .iter()
    .map(|flat| {
      let mut entry = serde_json::json!({ "path": locale.qualify(&flat.path) });
      if let Some(target) = flat.node.redirect_target() {
        entry["redirect"] = serde_json::Value::String(locale.qualify(target));
      }
      if let Some(page) = flat.node.deferred() {
        entry["page"] = serde_json::Value::String(page.page().to_string());
      }
      entry
    })
    .collect();
  serde_json::Value::Array(entries)
}

pub fn run_routes(taxonomy: &Taxonomy, locale: Locale, json: bool) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(&routes_json(taxonomy, locale))?);
    return Ok(());
  }
  ui::lines(&route_lines(taxonomy, locale));
  Ok(())
}

pub fn run_menu(taxonomy: &Taxonomy, locale: Locale, json: bool) -> Result<()> {
  let catalog = MenuCatalog::build(taxonomy, locale);
  if json {
    println!("{}", serde_json::to_string_pretty(catalog.groups())?);
    return Ok(());
  }
  for group in catalog.groups() {
    ui::arrow(&group.key);
    for root in &group.sections {
      ui::lines(&ui::menu_lines(root, 0));
    }
  }
  Ok(())
}

pub fn run_nav(taxonomy: &Taxonomy, locale: Locale, json: bool) -> Result<()> {
  let links = navigation_links(taxonomy, locale);
  if json {
    println!("{}", serde_json::to_string_pretty(&links)?);
    return Ok(());
  }
  for link in &links {
    ui::lines(&ui::nav_lines(link));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn route_lines_show_redirects_and_modules() {
    let lines = route_lines(Taxonomy::builtin(), Locale::ZhCn);
    assert_eq!(lines[0], "/cn/base -> /cn/base/introduction");
    assert_eq!(lines[1], "/cn/base/introduction  zh-CN/base/introduction");
    assert_eq!(lines.last().unwrap(), "/cn/requester  zh-CN/plugins/request");
  }

  #[test]
  fn routes_json_shape() {
    let json = routes_json(Taxonomy::builtin(), Locale::En);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 49);
    assert_eq!(entries[0]["redirect"], "/base/introduction");
    assert!(entries[0].get("page").is_none());
    assert_eq!(entries[1]["page"], "en/base/introduction");
  }

  #[test]
  fn missing_pages_lists_absent_modules() {
    let dir = tempfile::tempdir().unwrap();
    let all = missing_pages(Taxonomy::builtin(), dir.path());
    assert_eq!(all.len(), 2 + 92);

    std::fs::create_dir_all(dir.path().join("en")).unwrap();
    std::fs::write(dir.path().join("en/index.html"), "home").unwrap();
    let rest = missing_pages(Taxonomy::builtin(), dir.path());
    assert_eq!(rest.len(), 2 + 92 - 1);
    assert!(!rest.iter().any(|f| f.ends_with("en/index.html")));
  }

  #[test]
  fn check_fails_on_invalid_taxonomy() {
    let mut site = Taxonomy::builtin().clone();
    site.sections[2].categories[0].pages.clear();
    let err = run_check(&site, None).unwrap_err();
    assert!(err.to_string().contains("violation"));
  }

  #[test]
  fn check_passes_builtin() {
    assert!(run_check(Taxonomy::builtin(), None).is_ok());
  }
}
