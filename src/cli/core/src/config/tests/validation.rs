/* src/cli/core/src/config/tests/validation.rs */

use crate::config::DocsConfig;

fn config(extra: &str) -> DocsConfig {
  toml::from_str(&format!("[site]\nname = \"docs\"\n{extra}")).unwrap()
}

#[test]
fn zero_port_rejected() {
  let err = config("[server]\nport = 0\n").validate().unwrap_err();
  assert!(err.to_string().contains("server.port"));
}

#[test]
fn empty_pages_dir_rejected() {
  let err = config("[pages]\ndir = \"\"\n").validate().unwrap_err();
  assert!(err.to_string().contains("pages.dir"));
}

#[test]
fn blank_site_name_rejected() {
  let cfg: DocsConfig = toml::from_str("[site]\nname = \"  \"\n").unwrap();
  assert!(cfg.validate().unwrap_err().to_string().contains("site.name"));
}

#[test]
fn port_env_override() {
  let cfg = config("").with_port_override(Some("8081")).unwrap();
  assert_eq!(cfg.server.port, 8081);

  let cfg = config("[server]\nport = 5000\n").with_port_override(None).unwrap();
  assert_eq!(cfg.server.port, 5000);
}

#[test]
fn bad_port_env_rejected() {
  assert!(config("").with_port_override(Some("http")).is_err());
  assert!(config("").with_port_override(Some("0")).is_err());
  assert!(config("").with_port_override(Some("70000")).is_err());
}
