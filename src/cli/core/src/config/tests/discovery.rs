/* src/cli/core/src/config/tests/discovery.rs */

use crate::config::loader::CONFIG_FILE;
use crate::config::{find_docs_config, load_docs_config};

#[test]
fn finds_config_in_ancestor() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join(CONFIG_FILE), "[site]\nname = \"docs\"\n").unwrap();
  let nested = tmp.path().join("pages/en/base");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_docs_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join(CONFIG_FILE));
  assert_eq!(load_docs_config(&found).unwrap().site.name, "docs");
}

#[test]
fn invalid_config_fails_on_load() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join(CONFIG_FILE);
  std::fs::write(&path, "[site]\nname = \"docs\"\n[server]\nport = 0\n").unwrap();
  let err = load_docs_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("server.port"));
}

#[test]
fn unparsable_config_reports_path() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join(CONFIG_FILE);
  std::fs::write(&path, "[site\n").unwrap();
  let err = load_docs_config(&path).unwrap_err();
  assert!(err.to_string().contains("failed to parse"));
}
