/* src/server/adapter/axum/src/handler/mod.rs */

mod api;
pub(crate) mod page;


use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use joker_docs::{
  DeferredPage, DocsError, DocsParts, Locale, LocaleParts, PageId, ResolveStrategy,
  flatten_routes,
};

/// A leaf (or the home page) mounted at one concrete URL.
pub(crate) struct MountedPage {
  pub locale: Locale,
  /// Locale-qualified URL path, `/cn/base/ast`
  pub path: String,
  pub title: String,
  pub page: DeferredPage,
}

pub(crate) struct AppState {
  pub pages: HashMap<String, Arc<MountedPage>>,
  pub redirects: HashMap<String, String>,
  pub locales: HashMap<Locale, LocaleParts>,
  pub strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl AppState {
  pub fn locale(&self, locale: Locale) -> Option<&LocaleParts> {
    self.locales.get(&locale)
  }
}

/// URL paths answering the home page of `locale`: the bare base path plus
/// the taxonomy's home link.
fn home_paths(locale: Locale, home: &str) -> Vec<String> {
  let base = locale.base_path();
  let mut paths = match base {
    "" => vec!["/".to_string()],
    _ => vec![base.to_string(), format!("{base}/")],
  };
  let link = locale.qualify(home);
  if !paths.contains(&link) {
    paths.push(link);
  }
  paths
}

/// Paths already handed to the router. Axum refuses a path mounted twice, so
/// a collision becomes an error here instead.
#[derive(Default)]
struct Mounted(HashSet<String>);

impl Mounted {
  fn claim(&mut self, path: &str) -> Result<(), DocsError> {
    if !path.starts_with('/') {
      return Err(DocsError::invalid_taxonomy(format!("route path \"{path}\" is not absolute")));
    }
    if !self.0.insert(path.to_string()) {
      return Err(DocsError::invalid_taxonomy(format!("route path \"{path}\" mounted twice")));
    }
    Ok(())
  }
}

pub(crate) fn build_router(parts: DocsParts) -> Result<Router, DocsError> {
  let has_url_prefix = parts.has_url_prefix();
  let DocsParts { taxonomy, loader, registry, locales, strategies } = parts;

  let mut mounted = Mounted::default();
  let mut pages = HashMap::new();
  let mut redirects = HashMap::new();
  let mut router = Router::new();

  for parts in &locales {
    let locale = parts.locale;

    // Locale-prefixed data endpoints only make sense when the prefix is read
    if locale.is_default() || has_url_prefix {
      let base = locale.base_path();
      for (endpoint, handler) in [
        ("menus", get(api::handle_menus)),
        ("nav", get(api::handle_nav)),
        ("routes", get(api::handle_routes)),
      ] {
        let path = format!("{base}/_docs/{endpoint}");
        mounted.claim(&path)?;
        router = router.route(&path, handler);
      }
    }

    let home = Arc::new(MountedPage {
      locale,
      path: locale.qualify(&taxonomy.home.path),
      title: taxonomy.home.title.get(locale).to_string(),
      page: DeferredPage::new(PageId::home(locale), Arc::clone(&loader)),
    });
    for path in home_paths(locale, &taxonomy.home.path) {
      mounted.claim(&path)?;
      pages.insert(path.clone(), Arc::clone(&home));
      router = router.route(&path, get(page::handle_page));
    }

    for flat in flatten_routes(&parts.routes) {
      let path = locale.qualify(&flat.path);
      if let Some(target) = flat.node.redirect_target() {
        mounted.claim(&path)?;
        redirects.insert(path.clone(), locale.qualify(target));
        router = router.route(&path, get(page::handle_redirect));
      } else if let Some(deferred) = flat.node.deferred() {
        mounted.claim(&path)?;
        let title = parts
          .catalog
          .leaves()
          .into_iter()
          .find(|leaf| leaf.path.as_deref() == Some(path.as_str()))
          .map(|leaf| leaf.title.clone())
          .unwrap_or_default();
        pages.insert(
          path.clone(),
          Arc::new(MountedPage { locale, path: path.clone(), title, page: deferred.clone() }),
        );
        router = router.route(&path, get(page::handle_page));
      }
    }
  }

  tracing::debug!(
    pages = pages.len(),
    modules = registry.len(),
    redirects = redirects.len(),
    "mounted documentation routes"
  );

  let state = Arc::new(AppState {
    pages,
    redirects,
    locales: locales.into_iter().map(|p| (p.locale, p)).collect(),
    strategies,
  });

  Ok(router.fallback(page::handle_not_found).with_state(state))
}
