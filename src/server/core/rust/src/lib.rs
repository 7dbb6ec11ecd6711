/* src/server/core/rust/src/lib.rs */

pub mod errors;
pub mod loader;
pub mod locale;
pub mod menu;
pub mod nav;
pub mod resolve;
pub mod route;
pub mod server;
pub mod taxonomy;
pub mod validate;

// Re-exports for ergonomic use
pub use errors::DocsError;
pub use loader::{
  BoxFuture, HOME_MODULE, MemoryPageLoader, PageComponent, PageId, PageLoader, PageRegistry,
};
pub use locale::Locale;
pub use menu::{MenuCatalog, MenuGroup, MenuSection, Neighbors};
pub use nav::{NavClass, NavTarget, NavigationEntry, navigation_links};
pub use resolve::{
  ResolveData, ResolveStrategy, default_strategies, from_accept_language, from_cookie,
  from_url_prefix, from_url_query, resolve_chain,
};
pub use route::{
  DeferredPage, FlatRoute, LAYOUT, RouteComponent, RouteNode, RouteTarget, build_routes,
  build_routes_with, flatten_routes, join_path,
};
pub use server::{DocsParts, DocsServer, LocaleParts};
pub use taxonomy::{Localized, Taxonomy};
pub use validate::{Violation, validate_site};
