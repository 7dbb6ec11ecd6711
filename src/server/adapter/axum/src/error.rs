/* src/server/adapter/axum/src/error.rs */

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use joker_docs::{DocsError, Locale};

use crate::handler::page::escape_html;

/// A failed request. Data endpoints answer with the JSON envelope their
/// clients parse; page navigations get an error document in the locale the
/// reader was browsing.
pub(crate) enum ShellError {
  Data(DocsError),
  Page { locale: Locale, error: DocsError },
}

impl ShellError {
  pub fn page(locale: Locale, error: DocsError) -> Self {
    Self::Page { locale, error }
  }
}

fn status_of(err: &DocsError) -> StatusCode {
  StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn headline(locale: Locale, code: &str) -> &'static str {
  match (locale, code == "NOT_FOUND") {
    (Locale::ZhCn, true) => "页面未找到",
    (Locale::ZhCn, false) => "页面加载失败",
    (Locale::En, true) => "Page not found",
    (Locale::En, false) => "Page failed to load",
  }
}

/// Error document linking back to the locale's home page.
pub(crate) fn render_error_page(locale: Locale, err: &DocsError) -> String {
  let title = headline(locale, err.code());
  let (home, back) = match locale {
    Locale::ZhCn => (locale.base_path(), "返回首页"),
    Locale::En => ("/", "Back to home"),
  };
  let mut html = String::new();
  let _ = write!(
    html,
    concat!(
      "<!DOCTYPE html>",
      r#"<html lang="{lang}"><head><meta charset="utf-8"><title>{title}</title></head>"#,
      r#"<body><main data-error="{code}"><h1>{title}</h1><p>{message}</p>"#,
      r#"<a href="{home}">{back}</a></main></body></html>"#,
    ),
    lang = locale.as_str(),
    title = title,
    code = escape_html(err.code()),
    message = escape_html(err.message()),
    home = home,
    back = back,
  );
  html
}

impl IntoResponse for ShellError {
  fn into_response(self) -> Response {
    match self {
      Self::Data(err) => {
        let body = serde_json::json!({
          "ok": false,
          "error": {
            "code": err.code(),
            "message": err.message(),
          }
        });
        (status_of(&err), axum::Json(body)).into_response()
      }
      Self::Page { locale, error } => {
        (status_of(&error), Html(render_error_page(locale, &error))).into_response()
      }
    }
  }
}

impl From<DocsError> for ShellError {
  fn from(err: DocsError) -> Self {
    Self::Data(err)
  }
}

#[cfg(test)]
mod tests {
  use axum::http::header;

  use super::*;

  #[test]
  fn status_follows_error_code() {
    let res = ShellError::page(Locale::En, DocsError::page_load("disk gone")).into_response();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let res = ShellError::Data(DocsError::not_found("nope")).into_response();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn unknown_status_falls_back_to_500() {
    let res = ShellError::Data(DocsError::new("WEIRD", "odd", 1000)).into_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn page_errors_are_html_and_data_errors_json() {
    let res = ShellError::page(Locale::ZhCn, DocsError::not_found("x")).into_response();
    let ty = res.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(ty.starts_with("text/html"));

    let res = ShellError::Data(DocsError::not_found("x")).into_response();
    let ty = res.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert_eq!(ty, "application/json");
  }

  #[test]
  fn error_page_is_localized() {
    let zh = render_error_page(Locale::ZhCn, &DocsError::not_found("no page at /cn/x"));
    assert!(zh.starts_with(r#"<!DOCTYPE html><html lang="zh-CN">"#));
    assert!(zh.contains(r#"<main data-error="NOT_FOUND"><h1>页面未找到</h1>"#));
    assert!(zh.contains(r#"<a href="/cn">返回首页</a>"#));

    let en = render_error_page(Locale::En, &DocsError::page_load("<base/ast> unavailable"));
    assert!(en.contains("<title>Page failed to load</title>"));
    assert!(en.contains("<p>&lt;base/ast&gt; unavailable</p>"));
    assert!(en.contains(r#"<a href="/">Back to home</a>"#));
  }
}
