// Output document naming

use std::path::{Component, Path};

/// Base name used for the source root, which has no relative path of its own
pub const ROOT_BASE: &str = "main";

/// Maps relative directory paths to output document names
#[derive(Debug, Clone)]
pub struct DocNaming {
    extension: String,
}

impl DocNaming {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
        }
    }

    /// Relative path with separators replaced by `_`
    pub fn base_name(&self, rel_path: &Path) -> String {
        let parts: Vec<String> = rel_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            ROOT_BASE.to_string()
        } else {
            parts.join("_")
        }
    }

    /// `<base>-docs.<ext>`, or `<base>-<package>-docs.<ext>` when the
    /// directory holds several packages
    pub fn file_name(&self, base: &str, package: Option<&str>) -> String {
        match package {
            Some(package) => format!("{}-{}-docs.{}", base, package, self.extension),
            None => format!("{}-docs.{}", base, self.extension),
        }
    }

    /// Document name for a directory, straight from its relative path
    pub fn doc_file(&self, rel_path: &Path, package: Option<&str>) -> String {
        self.file_name(&self.base_name(rel_path), package)
    }

    /// Name of the index document
    pub fn index_file(&self) -> String {
        format!("index.{}", self.extension)
    }
}
