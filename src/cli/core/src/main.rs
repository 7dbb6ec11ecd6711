/* src/cli/core/src/main.rs */

mod config;
mod inspect;
mod serve;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use joker_docs::{Locale, Taxonomy};
use tracing_subscriber::EnvFilter;

use config::{DocsConfig, find_docs_config, load_docs_config};

#[derive(Parser)]
#[command(name = "joker-docs", about = "Joker documentation site", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Args)]
struct SiteArgs {
  /// Path to docs.toml (auto-detected if omitted)
  #[arg(short, long)]
  config: Option<PathBuf>,
  /// Replacement taxonomy JSON (overrides [site].taxonomy)
  #[arg(short, long)]
  taxonomy: Option<PathBuf>,
}

#[derive(Args)]
struct ListArgs {
  #[command(flatten)]
  site: SiteArgs,
  /// Locale tag: zh-CN or en
  #[arg(short, long, default_value = "en", value_parser = parse_locale)]
  locale: Locale,
  /// Print JSON instead of text
  #[arg(long)]
  json: bool,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the documentation site
  Serve {
    #[command(flatten)]
    site: SiteArgs,
  },
  /// Validate the taxonomy and its derived menus and route tables
  Check {
    #[command(flatten)]
    site: SiteArgs,
    /// Also look for page modules in this directory (defaults to [pages].dir)
    #[arg(short, long)]
    pages: Option<PathBuf>,
  },
  /// Print the route table of one locale
  Routes(ListArgs),
  /// Print the menu catalog of one locale
  Menu(ListArgs),
  /// Print the navigation bar of one locale
  Nav(ListArgs),
}

fn parse_locale(tag: &str) -> Result<Locale, String> {
  Locale::parse(tag).ok_or_else(|| format!("unknown locale \"{tag}\" (expected zh-CN or en)"))
}

fn init_tracing(default_filter: &str) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, DocsConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_docs_config(&cwd)?
    }
  };
  let config = load_docs_config(&path)?;
  Ok((path, config))
}

/// Like `resolve_config`, but a missing docs.toml is fine when none was named
fn try_resolve_config(explicit: Option<PathBuf>) -> Result<Option<(PathBuf, DocsConfig)>> {
  if explicit.is_some() {
    return resolve_config(explicit).map(Some);
  }
  let Ok(cwd) = std::env::current_dir() else { return Ok(None) };
  match find_docs_config(&cwd) {
    Ok(path) => Ok(Some((path.clone(), load_docs_config(&path)?))),
    Err(_) => Ok(None),
  }
}

fn config_dir(path: &Path) -> &Path {
  path.parent().unwrap_or_else(|| Path::new("."))
}

/// Taxonomy named on the command line, else the config's, else the built-in one
fn load_taxonomy(
  explicit: Option<&Path>,
  config: Option<&(PathBuf, DocsConfig)>,
) -> Result<Taxonomy> {
  let path = explicit
    .map(Path::to_path_buf)
    .or_else(|| config.and_then(|(p, c)| c.taxonomy_path(config_dir(p))));
  match path {
    Some(path) => {
      Taxonomy::load(&path).with_context(|| format!("failed to load {}", path.display()))
    }
    None => Ok(Taxonomy::builtin().clone()),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Serve { site } => {
      let (path, config) = resolve_config(site.config)?;
      let port = std::env::var("PORT").ok();
      let config = config.with_port_override(port.as_deref())?;
      init_tracing(&config.server.log);
      serve::run_serve(&path, &config, site.taxonomy).await?;
    }
    Command::Check { site, pages } => {
      init_tracing("warn");
      let cfg = try_resolve_config(site.config)?;
      let taxonomy = load_taxonomy(site.taxonomy.as_deref(), cfg.as_ref())?;
      let pages = pages.or_else(|| cfg.as_ref().map(|(p, c)| c.pages_dir(config_dir(p))));
      if let Some(ref dir) = pages {
        if !dir.is_dir() {
          bail!("pages directory {} does not exist", dir.display());
        }
      }
      inspect::run_check(&taxonomy, pages.as_deref())?;
    }
    Command::Routes(args) => {
      init_tracing("warn");
      let cfg = try_resolve_config(args.site.config)?;
      let taxonomy = load_taxonomy(args.site.taxonomy.as_deref(), cfg.as_ref())?;
      inspect::run_routes(&taxonomy, args.locale, args.json)?;
    }
    Command::Menu(args) => {
      init_tracing("warn");
      let cfg = try_resolve_config(args.site.config)?;
      let taxonomy = load_taxonomy(args.site.taxonomy.as_deref(), cfg.as_ref())?;
      inspect::run_menu(&taxonomy, args.locale, args.json)?;
    }
    Command::Nav(args) => {
      init_tracing("warn");
      let cfg = try_resolve_config(args.site.config)?;
      let taxonomy = load_taxonomy(args.site.taxonomy.as_deref(), cfg.as_ref())?;
      inspect::run_nav(&taxonomy, args.locale, args.json)?;
    }
  }

  Ok(())
}
