// JSON renderer: the page models as pretty-printed documents

use crate::error::Result;
use crate::model::{IndexEntry, PageModel};
use crate::output::{write_atomically, Renderer};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes pages and the index as JSON documents
pub struct JsonRenderer {
    output_dir: PathBuf,
}

#[derive(Serialize)]
struct IndexDocument<'a> {
    project_name: &'a str,
    packages: &'a [IndexEntry],
}

impl JsonRenderer {
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }
}

impl Renderer for JsonRenderer {
    fn extension(&self) -> &str {
        "json"
    }

    fn render_page(&self, doc_file: &str, page: &PageModel) -> Result<()> {
        let json = serde_json::to_string_pretty(page)?;
        write_atomically(&self.output_dir.join(doc_file), &json)
    }

    fn render_index(
        &self,
        index_file: &str,
        entries: &[IndexEntry],
        root_name: &str,
    ) -> Result<()> {
        let index = IndexDocument {
            project_name: root_name,
            packages: entries,
        };
        let json = serde_json::to_string_pretty(&index)?;
        write_atomically(&self.output_dir.join(index_file), &json)
    }
}
