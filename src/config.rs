use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gopherdoc.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Display name for the index page; the source root's directory name when unset
    pub name: Option<String>,
}

/// Which files and directories count as documentable source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source file extension, without the dot
    pub extension: String,
    /// File name suffix marking test files
    pub test_suffix: String,
    /// Directory names never documented or linked
    pub skip_dirs: Vec<String>,
    /// Glob patterns matched against directory paths relative to the root
    pub exclude: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: OutputFormat,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: "go".to_string(),
            test_suffix: "_test.go".to_string(),
            skip_dirs: vec!["vendor".to_string(), "testdata".to_string()],
            exclude: vec![],
        }
    }
}

impl SourceConfig {
    /// Whether a file name is extractable source (right extension, not a test file)
    pub fn is_source_file(&self, file_name: &str) -> bool {
        let has_extension = Path::new(file_name)
            .extension()
            .map_or(false, |e| e == self.extension.as_str());
        has_extension && !self.is_test_file(file_name)
    }

    /// Whether a file name carries the test suffix
    pub fn is_test_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.test_suffix)
    }

    /// Whether a directory name is hidden or reserved
    pub fn is_skipped_dir(&self, dir_name: &str) -> bool {
        dir_name.starts_with('.') || self.skip_dirs.iter().any(|d| d == dir_name)
    }

    /// Compile the exclude globs
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|p| glob::Pattern::new(p).map_err(Error::from))
            .collect()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./docs"),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        exclude: Vec<String>,
        format: Option<String>,
    ) {
        if let Some(out) = output {
            self.output.directory = out;
        }

        if !exclude.is_empty() {
            self.source.exclude.extend(exclude);
        }

        if let Some(fmt) = format {
            self.output.format = match fmt.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Html,
            };
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.source.extension.is_empty() {
            return Err(Error::config_validation("source extension must not be empty"));
        }

        if self.source.extension.starts_with('.') {
            return Err(Error::config_validation(
                "source extension must not start with a dot",
            ));
        }

        if self.source.test_suffix.is_empty() {
            return Err(Error::config_validation("test suffix must not be empty"));
        }

        self.source.exclude_patterns()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.project.name.is_none());
        assert_eq!(config.source.extension, "go");
        assert_eq!(config.source.test_suffix, "_test.go");
        assert_eq!(config.output.directory, PathBuf::from("./docs"));
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[project]
name = "My Service"

[source]
skip_dirs = ["vendor", "third_party"]
exclude = ["internal/gen*"]

[output]
directory = "site"
format = "json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.project.name.as_deref(), Some("My Service"));
        assert_eq!(config.source.skip_dirs, vec!["vendor", "third_party"]);
        assert_eq!(config.source.extension, "go");
        assert_eq!(config.output.directory, PathBuf::from("site"));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/gopherdoc.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_empty_extension() {
        let mut config = Config::default();
        config.source.extension.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_dotted_extension() {
        let mut config = Config::default();
        config.source.extension = ".go".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_glob() {
        let mut config = Config::default();
        config.source.exclude = vec!["[unclosed".to_string()];
        assert!(matches!(config.validate(), Err(Error::GlobPattern(_))));
    }

    #[test]
    fn test_merge_cli_output() {
        let mut config = Config::default();
        config.merge_cli(Some(PathBuf::from("/custom/output")), vec![], None);
        assert_eq!(config.output.directory, PathBuf::from("/custom/output"));
    }

    #[test]
    fn test_merge_cli_exclude() {
        let mut config = Config::default();
        config.merge_cli(None, vec!["cmd/*".to_string()], None);
        assert_eq!(config.source.exclude, vec!["cmd/*".to_string()]);
    }

    #[test]
    fn test_merge_cli_format() {
        let mut config = Config::default();
        config.merge_cli(None, vec![], Some("json".to_string()));
        assert_eq!(config.output.format, OutputFormat::Json);
        config.merge_cli(None, vec![], Some("html".to_string()));
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn test_source_file_filters() {
        let source = SourceConfig::default();
        assert!(source.is_source_file("server.go"));
        assert!(!source.is_source_file("server_test.go"));
        assert!(!source.is_source_file("README.md"));
        assert!(!source.is_source_file("go"));
        assert!(source.is_test_file("server_test.go"));
    }

    #[test]
    fn test_skipped_dirs() {
        let source = SourceConfig::default();
        assert!(source.is_skipped_dir(".git"));
        assert!(source.is_skipped_dir("vendor"));
        assert!(source.is_skipped_dir("testdata"));
        assert!(!source.is_skipped_dir("internal"));
    }

    #[test]
    fn test_output_format_parsing() {
        let toml_str = r#"format = "json""#;
        let output: OutputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(output.format, OutputFormat::Json);
    }
}
