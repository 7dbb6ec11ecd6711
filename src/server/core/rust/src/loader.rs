/* src/server/core/rust/src/loader.rs */

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::DocsError;
use crate::locale::Locale;
use crate::taxonomy::Taxonomy;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Module of the landing page mounted at `/` and the home link.
pub const HOME_MODULE: &str = "index";

/// Stable identifier of one page module in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId {
  pub locale: Locale,
  /// Module path without extension, `base/introduction`
  pub module: String,
}

impl PageId {
  pub fn new(locale: Locale, module: impl Into<String>) -> Self {
    Self { locale, module: module.into() }
  }

  pub fn home(locale: Locale) -> Self {
    Self::new(locale, HOME_MODULE)
  }
}

impl fmt::Display for PageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.locale.page_dir(), self.module)
  }
}

/// A loaded page, ready to be mounted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageComponent {
  pub id: PageId,
  pub body: String,
}

/// Produces page components on demand. Implementations must not do any work
/// before `load` is called, and must report failures rather than substitute
/// another page.
pub trait PageLoader: Send + Sync {
  fn load(&self, page: &PageId) -> BoxFuture<Result<PageComponent, DocsError>>;
}

/// Maps (locale, locale-relative leaf path) to the page module serving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRegistry {
  pages: BTreeMap<(Locale, String), PageId>,
}

impl PageRegistry {
  pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
    let mut pages = BTreeMap::new();
    for locale in Locale::ALL {
      for section in &taxonomy.sections {
        for page in section.pages() {
          pages.insert(
            (locale, page.path_in(section)),
            PageId::new(locale, page.module_in(section)),
          );
        }
      }
    }
    Self { pages }
  }

  pub fn lookup(&self, locale: Locale, path: &str) -> Option<&PageId> {
    self.pages.get(&(locale, path.to_string()))
  }

  pub fn len(&self) -> usize {
    self.pages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pages.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Locale, &str, &PageId)> {
    self.pages.iter().map(|((locale, path), id)| (*locale, path.as_str(), id))
  }
}

/// Pages held in memory. Lookups happen at `load` time, not when the route
/// table is built.
#[derive(Clone, Default)]
pub struct MemoryPageLoader {
  pages: Arc<HashMap<PageId, String>>,
}

impl MemoryPageLoader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_page(mut self, id: PageId, body: impl Into<String>) -> Self {
    Arc::make_mut(&mut self.pages).insert(id, body.into());
    self
  }
}

impl PageLoader for MemoryPageLoader {
  fn load(&self, page: &PageId) -> BoxFuture<Result<PageComponent, DocsError>> {
    let result = match self.pages.get(page) {
      Some(body) => Ok(PageComponent { id: page.clone(), body: body.clone() }),
      None => Err(DocsError::not_found(format!("page module {page} not found"))),
    };
    Box::pin(std::future::ready(result))
  }
}
