/* src/server/adapter/axum/src/fs_loader.rs */

use std::io::ErrorKind;
use std::path::PathBuf;

use joker_docs::{BoxFuture, DocsError, PageComponent, PageId, PageLoader};

/// Reads page modules from `<root>/<locale dir>/<module>.html`.
/// Nothing touches the disk until a page is navigated to.
#[derive(Debug, Clone)]
pub struct FsPageLoader {
  root: PathBuf,
}

impl FsPageLoader {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn file_for(&self, page: &PageId) -> PathBuf {
    self.root.join(page.locale.page_dir()).join(format!("{}.html", page.module))
  }
}

impl PageLoader for FsPageLoader {
  fn load(&self, page: &PageId) -> BoxFuture<Result<PageComponent, DocsError>> {
    let file = self.file_for(page);
    let id = page.clone();
    Box::pin(async move {
      match tokio::fs::read_to_string(&file).await {
        Ok(body) => Ok(PageComponent { id, body }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
          Err(DocsError::not_found(format!("page module {id} not found")))
        }
        Err(e) => Err(DocsError::page_load(format!("{}: {e}", file.display()))),
      }
    })
  }
}
