/* src/server/adapter/axum/src/handler/api.rs */

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, Uri, header};
use joker_docs::{DocsError, Locale, LocaleParts, ResolveData, flatten_routes, resolve_chain};
use serde::Serialize;

use super::AppState;
use crate::error::ShellError;

/// Resolve the request locale with the configured strategy chain.
fn request_locale(state: &AppState, uri: &Uri, headers: &HeaderMap) -> Locale {
  let url = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
  let data = ResolveData {
    url,
    cookie_header: headers.get(header::COOKIE).and_then(|v| v.to_str().ok()),
    accept_language: headers.get(header::ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
  };
  resolve_chain(&state.strategies, &data)
}

fn locale_parts<'a>(
  state: &'a AppState,
  uri: &Uri,
  headers: &HeaderMap,
) -> Result<&'a LocaleParts, DocsError> {
  let locale = request_locale(state, uri, headers);
  state.locale(locale).ok_or_else(|| DocsError::internal(format!("locale {locale} not mounted")))
}

pub(super) async fn handle_menus(
  State(state): State<Arc<AppState>>,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ShellError> {
  let parts = locale_parts(&state, &uri, &headers)?;
  Ok(Json(serde_json::json!({
    "ok": true,
    "locale": parts.locale,
    "groups": parts.catalog.groups(),
  })))
}

pub(super) async fn handle_nav(
  State(state): State<Arc<AppState>>,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ShellError> {
  let parts = locale_parts(&state, &uri, &headers)?;
  Ok(Json(serde_json::json!({
    "ok": true,
    "locale": parts.locale,
    "links": parts.navigation,
  })))
}

#[derive(Serialize)]
struct RouteEntry {
  path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  redirect: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  page: Option<String>,
}

fn route_entries(parts: &LocaleParts) -> Vec<RouteEntry> {
  let locale = parts.locale;
  flatten_routes(&parts.routes)
    .into_iter()
    .map(|flat| RouteEntry {
      path: locale.qualify(&flat.path),
      redirect: flat.node.redirect_target().map(|t| locale.qualify(t)),
      page: flat.node.deferred().map(|d| d.page().to_string()),
    })
    .collect()
}

pub(super) async fn handle_routes(
  State(state): State<Arc<AppState>>,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ShellError> {
  let parts = locale_parts(&state, &uri, &headers)?;
  Ok(Json(serde_json::json!({
    "ok": true,
    "locale": parts.locale,
    "routes": route_entries(parts),
  })))
}
