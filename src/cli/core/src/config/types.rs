/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
  pub site: SiteSection,
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub pages: PagesSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  pub name: String,
  /// Replacement taxonomy JSON; the built-in one is used when absent
  #[serde(default)]
  pub taxonomy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// Default tracing filter; `RUST_LOG` takes precedence
  #[serde(default = "default_log")]
  pub log: String,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port(), log: default_log() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesSection {
  #[serde(default = "default_pages_dir")]
  pub dir: String,
  #[serde(default)]
  pub assets: Option<String>,
}

impl Default for PagesSection {
  fn default() -> Self {
    Self { dir: default_pages_dir(), assets: None }
  }
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_log() -> String {
  "info".to_string()
}

fn default_pages_dir() -> String {
  "pages".to_string()
}

impl DocsConfig {
  pub fn validate(&self) -> Result<()> {
    if self.site.name.trim().is_empty() {
      bail!("site.name must not be empty");
    }
    if self.server.port == 0 {
      bail!("server.port must be non-zero");
    }
    if self.pages.dir.trim().is_empty() {
      bail!("pages.dir must not be empty");
    }
    Ok(())
  }

  /// Apply a `PORT` environment value on top of `[server].port`.
  pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self> {
    if let Some(raw) = port {
      let port: u16 =
        raw.trim().parse().with_context(|| format!("PORT \"{raw}\" is not a valid port"))?;
      if port == 0 {
        bail!("PORT must be non-zero");
      }
      self.server.port = port;
    }
    Ok(self)
  }

  pub fn addr(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }

  /// Paths in the config are relative to the directory holding it.
  pub fn pages_dir(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.pages.dir)
  }

  pub fn assets_dir(&self, base_dir: &Path) -> Option<PathBuf> {
    self.pages.assets.as_ref().map(|a| base_dir.join(a))
  }

  pub fn taxonomy_path(&self, base_dir: &Path) -> Option<PathBuf> {
    self.site.taxonomy.as_ref().map(|t| base_dir.join(t))
  }
}
