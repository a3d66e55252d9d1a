// HTML site renderer
//
// Writes one page per package plus the index into a flat output directory,
// so the document names produced during generation are also the links.

use crate::error::{Error, Result};
use crate::model::{IndexEntry, PageModel};
use crate::output::templates::TemplateEngine;
use crate::output::{write_atomically, Renderer};
use std::fs;
use std::path::{Path, PathBuf};

/// HTML renderer backed by the embedded templates
pub struct HtmlRenderer {
    output_dir: PathBuf,
    template_engine: TemplateEngine,
}

impl HtmlRenderer {
    /// Create the renderer, creating the output directory if needed
    pub fn new(output_dir: &Path) -> Result<Self> {
        let template_engine = TemplateEngine::new()?;
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            template_engine,
        })
    }
}

impl Renderer for HtmlRenderer {
    fn extension(&self) -> &str {
        "html"
    }

    fn render_page(&self, doc_file: &str, page: &PageModel) -> Result<()> {
        let html = self
            .template_engine
            .render_page(page)
            .map_err(|e| Error::render(doc_file, e.to_string()))?;
        write_atomically(&self.output_dir.join(doc_file), &html)
    }

    fn render_index(
        &self,
        index_file: &str,
        entries: &[IndexEntry],
        root_name: &str,
    ) -> Result<()> {
        let html = self.template_engine.render_index(entries, root_name)?;
        write_atomically(&self.output_dir.join(index_file), &html)
    }
}
