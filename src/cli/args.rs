//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate package documentation from Go source trees
#[derive(Parser, Debug)]
#[command(name = "gopherdoc")]
#[command(about = "Generate package documentation from Go source trees")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate documentation for a Go source tree
    Generate {
        /// Root of the Go source tree
        path: PathBuf,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Glob patterns of directories to exclude, relative to the root (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_parser = ["html", "json"])]
        format: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["gopherdoc", "generate", "./src"]).unwrap();
        match args.command {
            Command::Generate {
                path,
                output,
                exclude,
                config,
                format,
                verbose,
            } => {
                assert_eq!(path, PathBuf::from("./src"));
                assert!(output.is_none());
                assert!(exclude.is_empty());
                assert!(config.is_none());
                assert!(format.is_none());
                assert!(!verbose);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let args = Args::try_parse_from([
            "gopherdoc", "generate", "./project",
            "--output", "/tmp/docs",
            "--exclude", "internal/gen*",
            "--exclude", "examples",
            "--config", "custom.toml",
            "--format", "json",
            "--verbose",
        ])
        .unwrap();

        match args.command {
            Command::Generate {
                path,
                output,
                exclude,
                config,
                format,
                verbose,
            } => {
                assert_eq!(path, PathBuf::from("./project"));
                assert_eq!(output, Some(PathBuf::from("/tmp/docs")));
                assert_eq!(exclude, vec!["internal/gen*".to_string(), "examples".to_string()]);
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
                assert_eq!(format.as_deref(), Some("json"));
                assert!(verbose);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Args::try_parse_from(["gopherdoc", "generate", ".", "--format", "markdown"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_path_required() {
        assert!(Args::try_parse_from(["gopherdoc", "generate"]).is_err());
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["gopherdoc", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
    }
}
