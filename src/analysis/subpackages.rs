// Subpackage discovery
//
// Lists the immediate children of a directory that will get pages of their
// own, without descending further. Each child is named the way the
// coordinator will name it when the walk reaches it.

use crate::analysis::naming::DocNaming;
use crate::analysis::walk::{parse_directory, DirFilter};
use crate::model::IndexEntry;
use crate::parser::GoParser;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Link stubs for the documentable children of `root/rel_path`
///
/// Unreadable directories and children that fail to parse produce no
/// stubs. The result is sorted by child name.
pub fn discover_subpackages(
    parser: &mut GoParser,
    root: &Path,
    rel_path: &Path,
    filter: &DirFilter,
    naming: &DocNaming,
) -> Vec<IndexEntry> {
    let dir = root.join(rel_path);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut stubs = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let is_dir = entry.file_type().map_or(false, |t| t.is_dir());
        if !is_dir {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let child_rel = rel_path.join(&name);
        if !filter.allows(&name, &child_rel) {
            continue;
        }

        let parsed = match parse_directory(parser, &entry.path(), &child_rel, filter.source()) {
            Ok(parsed) if !parsed.is_empty() => parsed,
            Ok(_) => continue,
            Err(e) => {
                debug!("Skipping subpackage {}: {}", child_rel.display(), e);
                continue;
            }
        };

        let package = page_package(&name, &parsed.packages);
        stubs.push(IndexEntry::new(
            &name,
            &naming.doc_file(&child_rel, package),
        ));
    }

    stubs.sort_by(|a, b| a.package_name.cmp(&b.package_name));
    stubs
}

/// Package whose page a multi-package child links to
///
/// The package named like its directory wins; otherwise the alphabetically
/// first. `None` when the directory holds a single package.
fn page_package<'a, V>(dir_name: &str, packages: &'a BTreeMap<String, V>) -> Option<&'a str> {
    if packages.len() <= 1 {
        return None;
    }
    packages
        .get_key_value(dir_name)
        .or_else(|| packages.iter().next())
        .map(|(name, _)| name.as_str())
}
