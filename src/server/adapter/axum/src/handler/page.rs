/* src/server/adapter/axum/src/handler/page.rs */

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{MatchedPath, State};
use axum::http::Uri;
use axum::response::{Html, Redirect};
use joker_docs::{DocsError, Locale, MenuSection, Neighbors, PageComponent};

use super::{AppState, MountedPage};
use crate::error::ShellError;

pub(crate) fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

fn pager_link(out: &mut String, rel: &str, leaf: Option<&MenuSection>) {
  let Some(leaf) = leaf else { return };
  let Some(ref path) = leaf.path else { return };
  let _ = write!(
    out,
    r#"<a rel="{rel}" href="{}">{}</a>"#,
    escape_html(path),
    escape_html(&leaf.title)
  );
}

/// Wrap a loaded page body in the site document. The body is trusted page
/// markup and is inserted as-is.
pub(crate) fn render_page(
  mounted: &MountedPage,
  component: &PageComponent,
  neighbors: Option<Neighbors<'_>>,
) -> String {
  let mut pager = String::new();
  if let Some(n) = neighbors {
    pager_link(&mut pager, "prev", n.prev);
    pager_link(&mut pager, "next", n.next);
  }

  let mut html = String::new();
  let _ = write!(
    html,
    concat!(
      "<!DOCTYPE html>",
      r#"<html lang="{lang}"><head><meta charset="utf-8"><title>{title}</title></head>"#,
      r#"<body><main data-page="{page}">{body}</main>"#,
    ),
    lang = mounted.locale.as_str(),
    title = escape_html(&mounted.title),
    page = escape_html(&component.id.to_string()),
    body = component.body,
  );
  if !pager.is_empty() {
    let _ = write!(html, r#"<nav class="pager">{pager}</nav>"#);
  }
  html.push_str("</body></html>");
  html
}

/// Every navigation invokes the page's loader once; nothing is cached here.
pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  matched: MatchedPath,
) -> Result<Html<String>, ShellError> {
  let mounted = state.pages.get(matched.as_str()).ok_or_else(|| unmounted(matched.as_str()))?;

  let component = match mounted.page.load().await {
    Ok(component) => component,
    Err(err) => {
      tracing::warn!(
        path = %mounted.path,
        page = %mounted.page.page(),
        error = %err,
        "page load failed"
      );
      return Err(ShellError::page(mounted.locale, err));
    }
  };
  tracing::info!(path = %mounted.path, page = %component.id, "page served");

  let neighbors = state.locale(mounted.locale).and_then(|p| p.catalog.neighbors(&mounted.path));
  Ok(Html(render_page(mounted, &component, neighbors)))
}

fn unmounted(path: &str) -> ShellError {
  ShellError::page(Locale::strip_base(path).0, DocsError::not_found("Page not found"))
}

pub(super) async fn handle_redirect(
  State(state): State<Arc<AppState>>,
  matched: MatchedPath,
) -> Result<Redirect, ShellError> {
  let target =
    state.redirects.get(matched.as_str()).ok_or_else(|| unmounted(matched.as_str()))?;
  tracing::debug!(from = matched.as_str(), to = %target, "section redirect");
  Ok(Redirect::temporary(target))
}

/// Unknown data endpoints keep the JSON envelope; anything else is a page
/// miss answered in the locale its path carries.
pub(super) async fn handle_not_found(uri: Uri) -> ShellError {
  tracing::debug!(path = uri.path(), "no route");
  let (locale, rest) = Locale::strip_base(uri.path());
  let err = DocsError::not_found(format!("no page at {}", uri.path()));
  if rest.starts_with("/_docs/") { ShellError::Data(err) } else { ShellError::page(locale, err) }
}

#[cfg(test)]
mod tests {
  use joker_docs::{DeferredPage, Locale, MemoryPageLoader, PageId};

  use super::*;

  fn mounted(title: &str) -> MountedPage {
    MountedPage {
      locale: Locale::ZhCn,
      path: "/cn/base/ast".to_string(),
      title: title.to_string(),
      page: DeferredPage::new(
        PageId::new(Locale::ZhCn, "base/ast"),
        Arc::new(MemoryPageLoader::new()),
      ),
    }
  }

  fn leaf(title: &str, path: &str) -> MenuSection {
    MenuSection {
      object_id: "1-1-1".to_string(),
      title: title.to_string(),
      description: String::new(),
      path: Some(path.to_string()),
      children: Vec::new(),
    }
  }

  #[test]
  fn escapes_markup() {
    assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
  }

  #[test]
  fn renders_lang_title_and_body() {
    let component = PageComponent {
      id: PageId::new(Locale::ZhCn, "base/ast"),
      body: "<h1>AST</h1>".to_string(),
    };
    let html = render_page(&mounted("AST <树>"), &component, None);
    assert!(html.starts_with("<!DOCTYPE html><html lang=\"zh-CN\">"));
    assert!(html.contains("<title>AST &lt;树&gt;</title>"));
    assert!(html.contains(r#"<main data-page="zh-CN/base/ast"><h1>AST</h1></main>"#));
    assert!(!html.contains("pager"));
  }

  #[test]
  fn renders_pager_links() {
    let component =
      PageComponent { id: PageId::new(Locale::ZhCn, "base/ast"), body: String::new() };
    let prev = leaf("模板", "/cn/base/template");
    let neighbors = Neighbors { prev: Some(&prev), next: None };
    let html = render_page(&mounted("AST"), &component, Some(neighbors));
    let pager = r#"<nav class="pager"><a rel="prev" href="/cn/base/template">模板</a></nav>"#;
    assert!(html.contains(pager));
    assert!(!html.contains(r#"rel="next""#));
  }
}
