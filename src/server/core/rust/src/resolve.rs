/* src/server/core/rust/src/resolve.rs */

use crate::locale::Locale;

/// Request facts a strategy may inspect.
pub struct ResolveData<'a> {
  /// Path and query, e.g. `/cn/base/ast?lang=en`
  pub url: &'a str,
  pub cookie_header: Option<&'a str>,
  pub accept_language: Option<&'a str>,
}

/// One link of the locale resolution chain. Returning `None` passes the
/// decision to the next strategy.
pub trait ResolveStrategy: Send + Sync {
  fn kind(&self) -> &'static str;
  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale>;
}

/// Run strategies in order; the first hit wins, otherwise the default locale.
pub fn resolve_chain(strategies: &[Box<dyn ResolveStrategy>], data: &ResolveData<'_>) -> Locale {
  for strategy in strategies {
    if let Some(locale) = strategy.resolve(data) {
      return locale;
    }
  }
  Locale::default()
}

/// url prefix -> `?lang=` -> `joker-lang` cookie -> Accept-Language
pub fn default_strategies() -> Vec<Box<dyn ResolveStrategy>> {
  vec![from_url_prefix(), from_url_query("lang"), from_cookie("joker-lang"), from_accept_language()]
}

struct UrlPrefix;

impl ResolveStrategy for UrlPrefix {
  fn kind(&self) -> &'static str {
    "url_prefix"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    let path = data.url.split('?').next().unwrap_or("");
    match Locale::strip_base(path) {
      (locale, _) if !locale.is_default() => Some(locale),
      _ => None,
    }
  }
}

pub fn from_url_prefix() -> Box<dyn ResolveStrategy> {
  Box::new(UrlPrefix)
}

struct UrlQuery {
  param: String,
}

impl ResolveStrategy for UrlQuery {
  fn kind(&self) -> &'static str {
    "url_query"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    let (_, query) = data.url.split_once('?')?;
    query
      .split('&')
      .filter_map(|pair| pair.split_once('='))
      .find(|(k, _)| *k == self.param)
      .and_then(|(_, v)| Locale::parse(v))
  }
}

pub fn from_url_query(param: &str) -> Box<dyn ResolveStrategy> {
  Box::new(UrlQuery { param: param.to_string() })
}

struct Cookie {
  name: String,
}

impl ResolveStrategy for Cookie {
  fn kind(&self) -> &'static str {
    "cookie"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    let header = data.cookie_header?;
    for pair in header.split(';') {
      if let Some((k, v)) = pair.trim().split_once('=') {
        if k.trim() == self.name {
          return Locale::parse(v.trim());
        }
      }
    }
    None
  }
}

pub fn from_cookie(name: &str) -> Box<dyn ResolveStrategy> {
  Box::new(Cookie { name: name.to_string() })
}

struct AcceptLanguage;

impl ResolveStrategy for AcceptLanguage {
  fn kind(&self) -> &'static str {
    "accept_language"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    parse_accept_language(data.accept_language?)
  }
}

pub fn from_accept_language() -> Box<dyn ResolveStrategy> {
  Box::new(AcceptLanguage)
}

/// Map a language tag onto a site locale. Region variants of Chinese fall
/// onto the one Chinese locale the site ships.
fn match_tag(tag: &str) -> Option<Locale> {
  let primary = tag.split('-').next().unwrap_or("");
  if primary.eq_ignore_ascii_case("zh") {
    Some(Locale::ZhCn)
  } else if primary.eq_ignore_ascii_case("en") {
    Some(Locale::En)
  } else {
    None
  }
}

fn parse_accept_language(header: &str) -> Option<Locale> {
  let mut entries: Vec<(&str, f64)> = Vec::new();
  for part in header.split(',') {
    let part = part.trim();
    if part.is_empty() {
      continue;
    }
    let mut segments = part.split(';');
    let lang = segments.next().unwrap_or("").trim();
    let mut q = 1.0_f64;
    for s in segments {
      if let Some(val) = s.trim().strip_prefix("q=") {
        if let Ok(v) = val.parse::<f64>() {
          q = v;
        }
      }
    }
    // q=0 marks a language as not acceptable
    if q > 0.0 {
      entries.push((lang, q));
    }
  }

  // Stable sort keeps header order among equal weights
  entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
  entries.iter().find_map(|(lang, _)| match_tag(lang))
}
