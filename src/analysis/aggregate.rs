// Page aggregation: one parsed directory into one page per package

use crate::analysis::naming::DocNaming;
use crate::analysis::subpackages::discover_subpackages;
use crate::analysis::walk::{DirFilter, ParsedDirectory};
use crate::extract::extract_decl;
use crate::model::{IndexEntry, PageModel};
use crate::parser::GoParser;
use std::path::Path;

/// A page ready for rendering
#[derive(Debug, Clone)]
pub struct Page {
    pub doc_file: String,
    pub model: PageModel,
}

impl Page {
    /// The entry this page contributes to the index
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry::new(&self.model.package_name, &self.doc_file)
    }
}

/// Document name of each package's page, in package order
pub fn page_files(dir: &ParsedDirectory, naming: &DocNaming) -> Vec<String> {
    let base = naming.base_name(&dir.rel_path);
    let multi = dir.packages.len() > 1;

    dir.packages
        .keys()
        .map(|package| naming.file_name(&base, multi.then_some(package.as_str())))
        .collect()
}

/// Build the sorted page models for every package in a directory
pub fn build_pages(
    dir: &ParsedDirectory,
    parser: &mut GoParser,
    root: &Path,
    filter: &DirFilter,
    naming: &DocNaming,
) -> Vec<Page> {
    let subpackages = discover_subpackages(parser, root, &dir.rel_path, filter, naming);

    dir.packages
        .iter()
        .zip(page_files(dir, naming))
        .map(|((package, files), doc_file)| {
            let mut model = PageModel::new(package);
            for file in files {
                for decl in &file.decls {
                    for entity in extract_decl(decl) {
                        model.push(entity);
                    }
                }
            }
            model.subpackages = subpackages.clone();
            model.sort();
            Page { doc_file, model }
        })
        .collect()
}
