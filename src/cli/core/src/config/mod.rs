/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{find_docs_config, load_docs_config};
pub use types::DocsConfig;
