/* src/server/core/rust/src/validate.rs */

// Structural checks tying the menu catalog and the route table together.
// Both are derived from one taxonomy, so on the built-in site these only fire
// when a replacement taxonomy (or a hand-built catalog) is malformed.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::loader::{MemoryPageLoader, PageLoader};
use crate::locale::Locale;
use crate::menu::{MenuCatalog, MenuSection};
use crate::route::{RouteNode, build_routes, flatten_routes};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
  #[error("section key \"{key}\" is empty, reserved, contains '/' or is duplicated")]
  BadSectionKey { key: String },
  #[error("{locale}: malformed objectID \"{id}\"")]
  MalformedId { locale: Locale, id: String },
  #[error("{locale}: objectID \"{id}\" out of sequence, expected \"{expected}\"")]
  MisnumberedId { locale: Locale, id: String, expected: String },
  #[error("{locale}: menu node \"{id}\" nested deeper than two levels")]
  TooDeep { locale: Locale, id: String },
  #[error("{locale}: duplicate objectID \"{id}\"")]
  DuplicateId { locale: Locale, id: String },
  #[error("{locale}: leaf \"{id}\" has no path")]
  LeafWithoutPath { locale: Locale, id: String },
  #[error("{locale}: group node \"{id}\" carries path \"{path}\"")]
  GroupWithPath { locale: Locale, id: String, path: String },
  #[error("{locale}: menu path \"{path}\" is outside base path \"{base}\"")]
  ForeignPath { locale: Locale, path: String, base: &'static str },
  #[error("objectID \"{id}\" exists in {present} but not in {missing}")]
  ParityMismatch { id: String, present: Locale, missing: Locale },
  #[error("{locale}: menu leaf \"{path}\" is served by {count} routes, expected 1")]
  LeafRouteCount { locale: Locale, path: String, count: usize },
  #[error("{locale}: route \"{path}\" has no menu leaf")]
  OrphanRoute { locale: Locale, path: String },
  #[error("{locale}: no route node for section \"{section}\"")]
  MissingSectionRoute { locale: Locale, section: String },
  #[error("{locale}: section \"{section}\" has {count} redirects, expected {expected}")]
  RedirectCount { locale: Locale, section: String, count: usize, expected: usize },
  #[error("{locale}: section \"{section}\" redirects to \"{target}\", expected \"{expected}\"")]
  RedirectTarget { locale: Locale, section: String, target: String, expected: String },
  #[error("{locale}: route order differs from menu order at leaf {index}")]
  OrderMismatch { locale: Locale, index: usize },
  #[error("section \"{section}\": page {position} has an empty slug, only the first page may")]
  MisplacedIndex { section: String, position: usize },
  #[error("{locale}: {count} routes share the path \"{path}\"")]
  DuplicateRoute { locale: Locale, path: String, count: usize },
  #[error("home path \"{path}\" {reason}")]
  BadHomePath { path: String, reason: &'static str },
}

fn id_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"^[1-9][0-9]*-[1-9][0-9]*(-[1-9][0-9]*)?$").expect("id regex"))
}

/// Check a taxonomy end to end for every locale.
pub fn validate_site(taxonomy: &Taxonomy) -> Result<(), Vec<Violation>> {
  let mut violations = check_section_keys(taxonomy);
  violations.extend(check_home(taxonomy));
  violations.extend(check_index_pages(taxonomy));
  let loader: Arc<dyn PageLoader> = Arc::new(MemoryPageLoader::new());

  let catalogs: Vec<MenuCatalog> =
    Locale::ALL.iter().map(|&locale| MenuCatalog::build(taxonomy, locale)).collect();
  for catalog in &catalogs {
    let routes = build_routes(taxonomy, catalog.locale(), &loader);
    violations.extend(check_catalog(catalog));
    violations.extend(check_lockstep(catalog, &routes));
  }
  for pair in catalogs.windows(2) {
    violations.extend(check_parity(&pair[0], &pair[1]));
  }

  if violations.is_empty() { Ok(()) } else { Err(violations) }
}

/// First path segments already taken by the home page, locale prefixes and
/// the shell's own endpoints.
const RESERVED_KEYS: [&str; 4] = ["index", "cn", "_docs", "assets"];

fn check_section_keys(taxonomy: &Taxonomy) -> Vec<Violation> {
  let mut seen = HashSet::new();
  taxonomy
    .sections
    .iter()
    .filter(|s| {
      s.key.is_empty()
        || s.key.contains('/')
        || RESERVED_KEYS.contains(&s.key.as_str())
        || !seen.insert(s.key.as_str())
    })
    .map(|s| Violation::BadSectionKey { key: s.key.clone() })
    .collect()
}

/// First segments the home link may not start with.
const HOME_RESERVED: [&str; 3] = ["cn", "_docs", "assets"];

fn check_home(taxonomy: &Taxonomy) -> Vec<Violation> {
  let path = taxonomy.home.path.as_str();
  let bad = |reason| vec![Violation::BadHomePath { path: path.to_string(), reason }];
  let Some(rest) = path.strip_prefix('/') else {
    return bad("must start with '/'");
  };
  let first = rest.split('/').next().unwrap_or_default();
  if HOME_RESERVED.contains(&first) {
    return bad("starts with a reserved segment");
  }
  if taxonomy.sections.iter().any(|s| s.key == first) {
    return bad("lies inside a section");
  }
  Vec::new()
}

/// An empty slug answers the bare section path, which the section redirect
/// owns unless the page comes first.
fn check_index_pages(taxonomy: &Taxonomy) -> Vec<Violation> {
  taxonomy
    .sections
    .iter()
    .flat_map(|section| {
      section.pages().enumerate().skip(1).filter(|(_, page)| page.is_index()).map(
        move |(i, _)| Violation::MisplacedIndex { section: section.key.clone(), position: i + 1 },
      )
    })
    .collect()
}

/// Id shape, numbering, uniqueness and leaf/path rules of one catalog.
pub fn check_catalog(catalog: &MenuCatalog) -> Vec<Violation> {
  let locale = catalog.locale();
  let mut violations = Vec::new();
  let mut seen = HashSet::new();

  let mut check_id = |node: &MenuSection, expected: &str, violations: &mut Vec<Violation>| {
    let id = node.object_id.clone();
    if !id_pattern().is_match(&id) {
      violations.push(Violation::MalformedId { locale, id: id.clone() });
    } else if id != expected {
      violations.push(Violation::MisnumberedId {
        locale,
        id: id.clone(),
        expected: expected.to_string(),
      });
    }
    if !seen.insert(id.clone()) {
      violations.push(Violation::DuplicateId { locale, id });
    }
  };

  for (gi, group) in catalog.groups().iter().enumerate() {
    for (ci, root) in group.sections.iter().enumerate() {
      let expected = format!("{}-{}", gi + 1, ci + 1);
      check_id(root, &expected, &mut violations);
      check_node_path(locale, root, &mut violations);

      for (pi, child) in root.children.iter().enumerate() {
        let expected = format!("{}-{}", root.object_id, pi + 1);
        check_id(child, &expected, &mut violations);
        check_node_path(locale, child, &mut violations);
        for grandchild in &child.children {
          violations.push(Violation::TooDeep { locale, id: grandchild.object_id.clone() });
        }
      }
    }
  }

  violations
}

fn check_node_path(locale: Locale, node: &MenuSection, violations: &mut Vec<Violation>) {
  match (node.is_leaf(), node.path.as_deref()) {
    (true, None | Some("")) => {
      violations.push(Violation::LeafWithoutPath { locale, id: node.object_id.clone() });
    }
    (true, Some(path)) => {
      if relative_path(locale, path).is_none() {
        violations.push(Violation::ForeignPath {
          locale,
          path: path.to_string(),
          base: locale.base_path(),
        });
      }
    }
    (false, Some(path)) => violations.push(Violation::GroupWithPath {
      locale,
      id: node.object_id.clone(),
      path: path.to_string(),
    }),
    (false, None) => {}
  }
}

/// Strip the locale base from a menu path; `None` when it belongs elsewhere.
fn relative_path(locale: Locale, path: &str) -> Option<String> {
  let (found, rest) = Locale::strip_base(path);
  (found == locale && rest.starts_with('/')).then(|| rest.to_string())
}

/// Both catalogs must expose the same set of objectIDs.
pub fn check_parity(a: &MenuCatalog, b: &MenuCatalog) -> Vec<Violation> {
  fn ids(catalog: &MenuCatalog) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for root in catalog.all_menus() {
      out.insert(root.object_id.clone());
      for child in &root.children {
        out.insert(child.object_id.clone());
      }
    }
    out
  }

  let (ids_a, ids_b) = (ids(a), ids(b));
  let missing_in_b = ids_a.difference(&ids_b).map(|id| Violation::ParityMismatch {
    id: id.clone(),
    present: a.locale(),
    missing: b.locale(),
  });
  let missing_in_a = ids_b.difference(&ids_a).map(|id| Violation::ParityMismatch {
    id: id.clone(),
    present: b.locale(),
    missing: a.locale(),
  });
  missing_in_b.chain(missing_in_a).collect()
}

/// Every menu leaf is served by exactly one page route, no page route lacks
/// a leaf, each section redirects to its first leaf, and order agrees.
pub fn check_lockstep(catalog: &MenuCatalog, routes: &[RouteNode]) -> Vec<Violation> {
  let locale = catalog.locale();
  let mut violations = Vec::new();

  let leaf_paths: Vec<String> = catalog
    .leaves()
    .iter()
    .filter_map(|leaf| leaf.path.as_deref().and_then(|p| relative_path(locale, p)))
    .collect();

  let flat = flatten_routes(routes);
  let page_paths: Vec<&str> =
    flat.iter().filter(|f| f.node.deferred().is_some()).map(|f| f.path.as_str()).collect();

  let mut route_counts: HashMap<&str, usize> = HashMap::new();
  for path in &page_paths {
    *route_counts.entry(*path).or_default() += 1;
  }
  let leaf_set: HashSet<&str> = leaf_paths.iter().map(String::as_str).collect();

  for path in &leaf_paths {
    let count = route_counts.get(path.as_str()).copied().unwrap_or(0);
    if count != 1 {
      violations.push(Violation::LeafRouteCount { locale, path: path.clone(), count });
    }
  }
  for path in route_counts.keys() {
    if !leaf_set.contains(path) {
      violations.push(Violation::OrphanRoute { locale, path: (*path).to_string() });
    }
  }

  let mut terminal_counts: BTreeMap<&str, usize> = BTreeMap::new();
  for f in &flat {
    *terminal_counts.entry(f.path.as_str()).or_default() += 1;
  }
  for (path, count) in terminal_counts {
    if count > 1 {
      violations.push(Violation::DuplicateRoute { locale, path: path.to_string(), count });
    }
  }

  if violations.is_empty() {
    if let Some(index) = leaf_paths.iter().zip(&page_paths).position(|(l, r)| l != r) {
      violations.push(Violation::OrderMismatch { locale, index });
    }
  }

  for group in catalog.groups() {
    let section_path = format!("/{}", group.key);
    let Some(node) = routes.iter().find(|r| r.path == section_path) else {
      violations.push(Violation::MissingSectionRoute { locale, section: group.key.clone() });
      continue;
    };

    let first_leaf = group
      .sections
      .iter()
      .flat_map(|root| if root.is_leaf() { vec![root] } else { root.children.iter().collect() })
      .find_map(|leaf| leaf.path.as_deref().and_then(|p| relative_path(locale, p)));

    let redirects: Vec<&str> = node.children.iter().filter_map(|c| c.redirect_target()).collect();
    let expected = match first_leaf {
      Some(ref leaf) if *leaf != section_path => Some(leaf.as_str()),
      _ => None,
    };
    let expected_count = usize::from(expected.is_some());
    if redirects.len() != expected_count {
      violations.push(Violation::RedirectCount {
        locale,
        section: group.key.clone(),
        count: redirects.len(),
        expected: expected_count,
      });
    } else if let (Some(target), Some(expected)) = (redirects.first(), expected) {
      if *target != expected {
        violations.push(Violation::RedirectTarget {
          locale,
          section: group.key.clone(),
          target: (*target).to_string(),
          expected: expected.to_string(),
        });
      }
    }
  }

  violations
}
