/* src/cli/core/src/ui.rs */

use joker_docs::{FlatRoute, Locale, MenuSection, NavigationEntry};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn step(n: u32, total: u32, msg: &str) {
  println!("  {BOLD}[{n}/{total}]{RESET} {msg}...");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}Joker Docs{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

pub fn blank() {
  println!();
}

pub fn lines(lines: &[String]) {
  for line in lines {
    println!("{line}");
  }
}

/// A menu node and everything under it. Categories print bold, leaves print
/// their path.
pub fn menu_lines(node: &MenuSection, depth: usize) -> Vec<String> {
  let indent = "  ".repeat(depth + 1);
  let id = &node.object_id;
  let title = &node.title;
  let mut out = vec![match node.path.as_deref() {
    Some(path) => format!("{indent}{DIM}{id}{RESET} {title} {CYAN}{path}{RESET}"),
    None => format!("{indent}{DIM}{id}{RESET} {BOLD}{title}{RESET}"),
  }];
  for child in &node.children {
    out.extend(menu_lines(child, depth + 1));
  }
  out
}

/// One navigation bar entry, preceded by a rule when the entry carries a
/// divider class.
pub fn nav_lines(link: &NavigationEntry) -> Vec<String> {
  let mut out = Vec::new();
  if link.class.is_some() {
    out.push(format!("  {DIM}----{RESET}"));
  }
  let marker = if link.is_external() { format!(" {DIM}(external){RESET}") } else { String::new() };
  out.push(format!("  {}  {CYAN}{}{RESET}{marker}", link.title, link.path));
  out
}

/// Page and redirect counts of one locale's flattened route table.
pub fn route_summary(locale: Locale, flat: &[FlatRoute<'_>]) -> String {
  let redirects = flat.iter().filter(|f| f.node.redirect_target().is_some()).count();
  let pages = flat.iter().filter(|f| f.node.deferred().is_some()).count();
  format!("{locale}{DIM}{}{RESET}: {pages} pages, {redirects} redirects", locale.base_path())
}
