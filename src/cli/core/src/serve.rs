/* src/cli/core/src/serve.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use joker_docs::{DocsServer, Taxonomy};
use joker_docs_axum::{FsPageLoader, IntoAxumRouter, with_assets};

use crate::config::DocsConfig;
use crate::ui;

pub async fn run_serve(
  config_path: &Path,
  config: &DocsConfig,
  taxonomy: Option<PathBuf>,
) -> Result<()> {
  let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
  ui::banner("serve");

  let pages_dir = config.pages_dir(base_dir);
  if !pages_dir.is_dir() {
    ui::warn(&format!("pages directory {} does not exist", pages_dir.display()));
  }
  let mut server = DocsServer::new(Arc::new(FsPageLoader::new(&pages_dir)));

  if let Some(path) = taxonomy.or_else(|| config.taxonomy_path(base_dir)) {
    let site =
      Taxonomy::load(&path).with_context(|| format!("failed to load {}", path.display()))?;
    ui::arrow(&format!("taxonomy {}", path.display()));
    server = server.taxonomy(site);
  }

  let mut router = server.into_axum_router().context("failed to assemble documentation site")?;
  if let Some(assets) = config.assets_dir(base_dir) {
    ui::arrow(&format!("assets {} at /assets", assets.display()));
    router = with_assets(router, &assets);
  }

  let addr = config.addr();
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .with_context(|| format!("failed to bind {addr}"))?;
  let port = listener.local_addr()?.port();
  ui::ok(&format!("{} running on http://localhost:{port}", config.site.name));
  ui::detail(&format!("pages from {}", pages_dir.display()));
  ui::blank();
  tracing::info!(%addr, "listening");

  axum::serve(listener, router).await.context("server stopped")?;
  Ok(())
}
