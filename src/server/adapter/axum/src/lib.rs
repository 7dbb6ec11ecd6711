/* src/server/adapter/axum/src/lib.rs */

mod error;
mod fs_loader;
mod handler;

use std::path::Path;

use joker_docs::{DocsError, DocsServer};
use tower_http::services::ServeDir;

/// Re-export the core for convenience
pub use joker_docs;

pub use fs_loader::FsPageLoader;

/// Extension trait that converts a `DocsServer` into an Axum router.
pub trait IntoAxumRouter {
  /// Validate the taxonomy and mount every locale's pages, redirects and
  /// data endpoints. Page modules are not loaded here.
  fn into_axum_router(self) -> Result<axum::Router, DocsError>;
}

impl IntoAxumRouter for DocsServer {
  fn into_axum_router(self) -> Result<axum::Router, DocsError> {
    let parts = self.into_parts()?;
    handler::build_router(parts)
  }
}

/// Serve static files from `dir` under `/assets`.
pub fn with_assets(router: axum::Router, dir: impl AsRef<Path>) -> axum::Router {
  router.nest_service("/assets", ServeDir::new(dir.as_ref()))
}
