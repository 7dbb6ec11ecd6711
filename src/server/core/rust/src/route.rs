/* src/server/core/rust/src/route.rs */

use std::fmt;
use std::sync::Arc;

use crate::errors::DocsError;
use crate::loader::{BoxFuture, PageComponent, PageId, PageLoader, PageRegistry};
use crate::locale::Locale;
use crate::taxonomy::Taxonomy;

/// Shell component wrapping every section (menu sidebar + page outlet).
pub const LAYOUT: &str = "layout";

/// A page component that is only produced when the router navigates to it.
#[derive(Clone)]
pub struct DeferredPage {
  page: PageId,
  loader: Arc<dyn PageLoader>,
}

impl DeferredPage {
  pub fn new(page: PageId, loader: Arc<dyn PageLoader>) -> Self {
    Self { page, loader }
  }

  pub fn page(&self) -> &PageId {
    &self.page
  }

  /// Start loading the page module. Errors are returned to the caller as-is:
  /// no retry, no substitute page.
  pub fn load(&self) -> BoxFuture<Result<PageComponent, DocsError>> {
    tracing::debug!(page = %self.page, "loading page module");
    self.loader.load(&self.page)
  }
}

// Two deferred pages are the same route target when they name the same
// module; the loader instance is not part of the table's structure.
impl PartialEq for DeferredPage {
  fn eq(&self, other: &Self) -> bool {
    self.page == other.page
  }
}

impl Eq for DeferredPage {}

impl fmt::Debug for DeferredPage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("DeferredPage").field(&self.page).finish()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteComponent {
  Layout(&'static str),
  Deferred(DeferredPage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
  Component(RouteComponent),
  /// Locale-relative path the router should redirect to
  Redirect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNode {
  /// Absolute for top-level nodes (`/base`), relative for children
  /// (`introduction`). Empty means the parent's own path.
  pub path: String,
  pub target: RouteTarget,
  pub children: Vec<RouteNode>,
}

impl RouteNode {
  pub fn redirect_target(&self) -> Option<&str> {
    match self.target {
      RouteTarget::Redirect(ref to) => Some(to),
      RouteTarget::Component(_) => None,
    }
  }

  pub fn deferred(&self) -> Option<&DeferredPage> {
    match self.target {
      RouteTarget::Component(RouteComponent::Deferred(ref page)) => Some(page),
      _ => None,
    }
  }
}

/// Route table for `locale`: one layout node per section, each holding a
/// redirect for the bare section path plus one deferred page per leaf, in
/// menu order. No page is loaded here.
pub fn build_routes(
  taxonomy: &Taxonomy,
  locale: Locale,
  loader: &Arc<dyn PageLoader>,
) -> Vec<RouteNode> {
  build_routes_with(taxonomy, locale, &PageRegistry::from_taxonomy(taxonomy), loader)
}

/// Like [`build_routes`], with each leaf's page module looked up in
/// `registry`. Leaves the registry does not know are left out.
pub fn build_routes_with(
  taxonomy: &Taxonomy,
  locale: Locale,
  registry: &PageRegistry,
  loader: &Arc<dyn PageLoader>,
) -> Vec<RouteNode> {
  let routes: Vec<RouteNode> = taxonomy
    .sections
    .iter()
    .map(|section| {
      let mut children = Vec::new();

      // An index page already answers the bare section path
      if let Some(first) = section.first_page() {
        if !first.is_index() {
          children.push(RouteNode {
            path: String::new(),
            target: RouteTarget::Redirect(first.path_in(section)),
            children: Vec::new(),
          });
        }
      }

      for page in section.pages() {
        let path = page.path_in(section);
        let Some(id) = registry.lookup(locale, &path) else {
          tracing::warn!(%locale, %path, "no page module registered, leaf skipped");
          continue;
        };
        children.push(RouteNode {
          path: page.slug.clone(),
          target: RouteTarget::Component(RouteComponent::Deferred(DeferredPage::new(
            id.clone(),
            Arc::clone(loader),
          ))),
          children: Vec::new(),
        });
      }

      RouteNode {
        path: section.path(),
        target: RouteTarget::Component(RouteComponent::Layout(LAYOUT)),
        children,
      }
    })
    .collect();

  tracing::debug!(%locale, sections = routes.len(), "built route table");
  routes
}

/// Join a parent path and a child segment the way the router resolves them.
pub fn join_path(parent: &str, segment: &str) -> String {
  if segment.is_empty() {
    return parent.to_string();
  }
  if segment.starts_with('/') {
    return segment.to_string();
  }
  format!("{}/{segment}", parent.trim_end_matches('/'))
}

/// A terminal route with its full locale-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRoute<'a> {
  pub path: String,
  pub node: &'a RouteNode,
}

/// Terminal routes (redirects and pages) in table order.
pub fn flatten_routes(routes: &[RouteNode]) -> Vec<FlatRoute<'_>> {
  fn walk<'a>(prefix: &str, node: &'a RouteNode, out: &mut Vec<FlatRoute<'a>>) {
    let path = join_path(prefix, &node.path);
    if node.children.is_empty() {
      out.push(FlatRoute { path, node });
      return;
    }
    for child in &node.children {
      walk(&path, child, out);
    }
  }

  let mut out = Vec::new();
  for node in routes {
    walk("", node, &mut out);
  }
  out
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use crate::loader::MemoryPageLoader;
  use crate::menu::MenuCatalog;

  struct CountingLoader {
    calls: AtomicUsize,
  }

  impl PageLoader for CountingLoader {
    fn load(&self, page: &PageId) -> BoxFuture<Result<PageComponent, DocsError>> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let page = page.clone();
      Box::pin(async move { Ok(PageComponent { body: page.module.clone(), id: page }) })
    }
  }

  fn memory_loader() -> Arc<dyn PageLoader> {
    Arc::new(MemoryPageLoader::new())
  }

  #[test]
  fn one_layout_node_per_section() {
    let routes = build_routes(Taxonomy::builtin(), Locale::En, &memory_loader());
    let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/base", "/router", "/cli", "/requester"]);
    for route in &routes {
      assert_eq!(route.target, RouteTarget::Component(RouteComponent::Layout(LAYOUT)));
    }
  }

  #[test]
  fn sections_redirect_to_first_leaf() {
    let routes = build_routes(Taxonomy::builtin(), Locale::ZhCn, &memory_loader());
    let redirects: Vec<(&str, Vec<&str>)> = routes
      .iter()
      .map(|r| (r.path.as_str(), r.children.iter().filter_map(|c| c.redirect_target()).collect()))
      .collect();
    assert_eq!(
      redirects,
      [
        ("/base", vec!["/base/introduction"]),
        ("/router", vec!["/router/introduction"]),
        ("/cli", vec!["/cli/introduction"]),
        ("/requester", vec![]),
      ]
    );
    assert!(routes[0].children[0].path.is_empty());
  }

  #[test]
  fn index_leaf_serves_bare_section_path() {
    let routes = build_routes(Taxonomy::builtin(), Locale::ZhCn, &memory_loader());
    let requester = &routes[3];
    assert_eq!(requester.children.len(), 1);
    let page = requester.children[0].deferred().unwrap();
    assert_eq!(requester.children[0].path, "");
    assert_eq!(page.page(), &PageId::new(Locale::ZhCn, "plugins/request"));
  }

  #[test]
  fn leaves_match_menu_in_order() {
    let site = Taxonomy::builtin();
    for locale in Locale::ALL {
      let routes = build_routes(site, locale, &memory_loader());
      let route_paths: Vec<String> = flatten_routes(&routes)
        .into_iter()
        .filter(|f| f.node.deferred().is_some())
        .map(|f| locale.qualify(&f.path))
        .collect();
      let menu_paths: Vec<String> = MenuCatalog::build(site, locale)
        .leaves()
        .iter()
        .filter_map(|l| l.path.clone())
        .collect();
      assert_eq!(route_paths, menu_paths);
    }
  }

  #[test]
  fn loader_selects_resolved_locale() {
    let routes = build_routes(Taxonomy::builtin(), Locale::En, &memory_loader());
    let page = routes[1].children[1].deferred().unwrap();
    assert_eq!(page.page(), &PageId::new(Locale::En, "router/introduction"));
  }

  #[test]
  fn build_is_idempotent() {
    let site = Taxonomy::builtin();
    let first = build_routes(site, Locale::ZhCn, &memory_loader());
    let second = build_routes(site, Locale::ZhCn, &memory_loader());
    assert_eq!(first, second);
    assert_ne!(first, build_routes(site, Locale::En, &memory_loader()));
  }

  #[tokio::test]
  async fn building_does_not_load_and_loading_is_per_call() {
    let counting = Arc::new(CountingLoader { calls: AtomicUsize::new(0) });
    let loader: Arc<dyn PageLoader> = counting.clone();
    let routes = build_routes(Taxonomy::builtin(), Locale::En, &loader);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);

    let page = routes[0].children[1].deferred().unwrap();
    let loaded = page.load().await.unwrap();
    assert_eq!(loaded.body, "base/introduction");
    page.load().await.unwrap();
    assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
  }

  #[test]
  fn unregistered_leaves_are_left_out() {
    let site = Taxonomy::builtin();
    let registry = PageRegistry::from_taxonomy(site);
    assert_eq!(
      build_routes_with(site, Locale::ZhCn, &registry, &memory_loader()),
      build_routes(site, Locale::ZhCn, &memory_loader())
    );

    let routes = build_routes_with(site, Locale::En, &PageRegistry::default(), &memory_loader());
    let flat = flatten_routes(&routes);
    assert!(flat.iter().all(|f| f.node.deferred().is_none()));
    assert_eq!(flat.len(), 3);
  }

  #[test]
  fn unsupported_locale_requests_build_the_default_site() {
    let site = Taxonomy::builtin();
    let expected_menu = MenuCatalog::build(site, Locale::En);
    let expected_routes = build_routes(site, Locale::En, &memory_loader());

    for requested in [Some(""), Some("fr")] {
      let locale = Locale::resolve(requested);
      let menu = MenuCatalog::build(site, locale);
      let routes = build_routes(site, locale, &memory_loader());
      assert_eq!(menu, expected_menu, "{requested:?}");
      assert_eq!(routes, expected_routes, "{requested:?}");

      let menus = menu.all_menus().into_iter().chain(menu.leaves());
      assert!(menus.filter_map(|m| m.path.as_deref()).all(|path| !path.starts_with("/cn")));
      for flat in flatten_routes(&routes) {
        assert!(!flat.path.starts_with("/cn"));
        if let Some(page) = flat.node.deferred() {
          assert!(!page.page().to_string().starts_with("zh-CN/"), "{}", page.page());
        }
      }
    }
  }

  #[tokio::test]
  async fn load_failure_propagates() {
    let routes = build_routes(Taxonomy::builtin(), Locale::En, &memory_loader());
    let err = routes[2].children[1].deferred().unwrap().load().await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
  }

  #[test]
  fn join_path_rules() {
    assert_eq!(join_path("/base", ""), "/base");
    assert_eq!(join_path("/base", "ast"), "/base/ast");
    assert_eq!(join_path("", "/base"), "/base");
    assert_eq!(join_path("/base/", "ast"), "/base/ast");
  }

  #[test]
  fn flatten_counts() {
    let routes = build_routes(Taxonomy::builtin(), Locale::En, &memory_loader());
    let flat = flatten_routes(&routes);
    let redirects = flat.iter().filter(|f| f.node.redirect_target().is_some()).count();
    assert_eq!(redirects, 3);
    assert_eq!(flat.len(), 46 + 3);
    assert_eq!(flat[0].path, "/base");
    assert_eq!(flat[1].path, "/base/introduction");
    assert_eq!(flat.last().unwrap().path, "/requester");
  }
}
