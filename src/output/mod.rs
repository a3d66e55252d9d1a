// Output generation module

pub mod html;
pub mod json;
pub mod templates;

pub use html::*;
pub use json::*;
pub use templates::*;

use crate::error::Result;
use crate::model::{IndexEntry, PageModel};
use std::fs;
use std::path::Path;

/// Turns page models into documents on disk
///
/// Shared across generation tasks, so implementations must be `Sync`.
pub trait Renderer: Sync {
    /// Extension of generated documents, without the dot
    fn extension(&self) -> &str;

    /// Render and write one package page
    fn render_page(&self, doc_file: &str, page: &PageModel) -> Result<()>;

    /// Render and write the index over every generated page
    fn render_index(
        &self,
        index_file: &str,
        entries: &[IndexEntry],
        root_name: &str,
    ) -> Result<()>;
}

/// Write `contents` to `path` through a sibling temp file and a rename
///
/// Readers see either the old file, the complete new one, or nothing.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
