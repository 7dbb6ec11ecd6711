/* src/server/core/rust/src/server.rs */

use std::sync::Arc;

use crate::errors::DocsError;
use crate::loader::{PageLoader, PageRegistry};
use crate::locale::Locale;
use crate::menu::MenuCatalog;
use crate::nav::{NavigationEntry, navigation_links};
use crate::resolve::{ResolveStrategy, default_strategies};
use crate::route::{RouteNode, build_routes_with};
use crate::taxonomy::Taxonomy;
use crate::validate::validate_site;

/// Everything one locale's shell needs, built from the same taxonomy.
pub struct LocaleParts {
  pub locale: Locale,
  pub routes: Vec<RouteNode>,
  pub catalog: MenuCatalog,
  pub navigation: Vec<NavigationEntry>,
}

/// Framework-agnostic parts extracted from `DocsServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct DocsParts {
  pub taxonomy: Arc<Taxonomy>,
  pub loader: Arc<dyn PageLoader>,
  pub registry: PageRegistry,
  pub locales: Vec<LocaleParts>,
  pub strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl DocsParts {
  pub fn locale(&self, locale: Locale) -> Option<&LocaleParts> {
    self.locales.iter().find(|p| p.locale == locale)
  }

  pub fn has_url_prefix(&self) -> bool {
    self.strategies.iter().any(|s| s.kind() == "url_prefix")
  }
}

pub struct DocsServer {
  taxonomy: Option<Taxonomy>,
  loader: Arc<dyn PageLoader>,
  strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl DocsServer {
  pub fn new(loader: Arc<dyn PageLoader>) -> Self {
    Self { taxonomy: None, loader, strategies: Vec::new() }
  }

  /// Replace the built-in taxonomy.
  pub fn taxonomy(mut self, taxonomy: Taxonomy) -> Self {
    self.taxonomy = Some(taxonomy);
    self
  }

  pub fn resolve_strategies(mut self, strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
    self.strategies = strategies;
    self
  }

  /// Validate the taxonomy, then build route tables, catalogs and navigation
  /// for every locale. Tables are built fresh on every call.
  pub fn into_parts(self) -> Result<DocsParts, DocsError> {
    let taxonomy = self.taxonomy.unwrap_or_else(|| Taxonomy::builtin().clone());

    if let Err(violations) = validate_site(&taxonomy) {
      for v in &violations {
        tracing::error!("{v}");
      }
      let summary: Vec<String> = violations.iter().map(ToString::to_string).collect();
      return Err(DocsError::invalid_taxonomy(summary.join("; ")));
    }

    let registry = PageRegistry::from_taxonomy(&taxonomy);
    let locales = Locale::ALL
      .iter()
      .map(|&locale| LocaleParts {
        locale,
        routes: build_routes_with(&taxonomy, locale, &registry, &self.loader),
        catalog: MenuCatalog::build(&taxonomy, locale),
        navigation: navigation_links(&taxonomy, locale),
      })
      .collect();

    let strategies =
      if self.strategies.is_empty() { default_strategies() } else { self.strategies };

    tracing::info!(
      sections = taxonomy.sections.len(),
      pages = taxonomy.page_count(),
      modules = registry.len(),
      "documentation site assembled"
    );

    Ok(DocsParts {
      registry,
      taxonomy: Arc::new(taxonomy),
      loader: self.loader,
      locales,
      strategies,
    })
  }
}
