// Source tree walking helpers
//
// Both the coordinator's walk and subpackage discovery go through
// `DirFilter` and `parse_directory`, so a directory gets a page exactly when
// its parent links to one.

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::parser::{GoParser, SourceFile};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Suffix marking external test packages
const TEST_PACKAGE_SUFFIX: &str = "_test";

/// Decides which directories take part in generation
#[derive(Debug, Clone)]
pub struct DirFilter {
    source: SourceConfig,
    excludes: Vec<glob::Pattern>,
}

impl DirFilter {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        Ok(Self {
            excludes: source.exclude_patterns()?,
            source: source.clone(),
        })
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Whether a directory below the root should be visited
    ///
    /// `rel_path` is relative to the source root and ends in `name`.
    pub fn allows(&self, name: &str, rel_path: &Path) -> bool {
        if self.source.is_skipped_dir(name) {
            return false;
        }
        !self.excludes.iter().any(|p| p.matches_path(rel_path))
    }
}

/// One directory's worth of parsed source, test files already removed
#[derive(Debug, Clone)]
pub struct ParsedDirectory {
    pub path: PathBuf,
    /// Relative to the source root; empty for the root itself
    pub rel_path: PathBuf,
    /// Files grouped by package clause
    pub packages: BTreeMap<String, Vec<SourceFile>>,
}

impl ParsedDirectory {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Non-test source files directly inside `dir`, sorted
pub fn source_files(dir: &Path, source: &SourceConfig) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_string_lossy();
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(dir_str.trim_end_matches('/')),
        source.extension
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Io(e.into_error()))?;
        let is_source = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| source.is_source_file(n));
        if is_source && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parse every non-test source file in `dir` and group by package
///
/// Any file failing to parse fails the whole directory. External `_test`
/// packages are dropped.
pub fn parse_directory(
    parser: &mut GoParser,
    dir: &Path,
    rel_path: &Path,
    source: &SourceConfig,
) -> Result<ParsedDirectory> {
    let mut packages: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();

    for path in source_files(dir, source)? {
        let file = parser.parse_file(&path)?;
        if file.package.ends_with(TEST_PACKAGE_SUFFIX) {
            continue;
        }
        packages.entry(file.package.clone()).or_default().push(file);
    }

    Ok(ParsedDirectory {
        path: dir.to_path_buf(),
        rel_path: rel_path.to_path_buf(),
        packages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_source_files_filters_tests_and_other_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.go"), "package p\n").unwrap();
        fs::write(dir.path().join("a.go"), "package p\n").unwrap();
        fs::write(dir.path().join("a_test.go"), "package p\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = source_files(dir.path(), &SourceConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_parse_directory_groups_packages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool.go"), "package tools\n").unwrap();
        fs::write(dir.path().join("gen.go"), "//go:build ignore\n\npackage main\n").unwrap();
        fs::write(dir.path().join("x_test.go"), "package tools_test\n").unwrap();

        let mut parser = GoParser::new().unwrap();
        let parsed = parse_directory(
            &mut parser,
            dir.path(),
            Path::new("tools"),
            &SourceConfig::default(),
        )
        .unwrap();

        let names: Vec<_> = parsed.packages.keys().cloned().collect();
        assert_eq!(names, vec!["main", "tools"]);
        assert_eq!(parsed.rel_path, PathBuf::from("tools"));
    }

    #[test]
    fn test_parse_directory_drops_external_test_package() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("helpers.go"), "package store_test\n").unwrap();

        let mut parser = GoParser::new().unwrap();
        let parsed =
            parse_directory(&mut parser, dir.path(), Path::new(""), &SourceConfig::default())
                .unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_directory_fails_on_syntax_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.go"), "package p\n").unwrap();
        fs::write(dir.path().join("broken.go"), "package p\nfunc {\n").unwrap();

        let mut parser = GoParser::new().unwrap();
        let result =
            parse_directory(&mut parser, dir.path(), Path::new(""), &SourceConfig::default());
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_dir_filter() {
        let mut source = SourceConfig::default();
        source.exclude = vec!["internal/gen*".to_string()];
        let filter = DirFilter::new(&source).unwrap();

        assert!(filter.allows("api", Path::new("api")));
        assert!(!filter.allows(".git", Path::new(".git")));
        assert!(!filter.allows("vendor", Path::new("vendor")));
        assert!(!filter.allows("generated", Path::new("internal/generated")));
        assert!(filter.allows("store", Path::new("internal/store")));
    }
}
