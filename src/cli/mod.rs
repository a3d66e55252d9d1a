//! CLI module for gopherdoc

mod args;

pub use args::{Args, Command};

use crate::analysis::Generator;
use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::error::Result;
use crate::output::{HtmlRenderer, JsonRenderer, Renderer};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Generate {
            path,
            output,
            exclude,
            config,
            format,
            verbose,
        } => {
            init_tracing(verbose);

            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(output, exclude, format);
            cfg.validate()?;

            if verbose {
                println!("Source: {}", path.display());
                println!("Output: {}", cfg.output.directory.display());
                println!("Format: {:?}", cfg.output.format);
                if !cfg.source.exclude.is_empty() {
                    println!("Exclude: {:?}", cfg.source.exclude);
                }
            }

            let renderer = create_renderer(cfg.output.format, &cfg.output.directory)?;
            let output_dir = cfg.output.directory.clone();
            let generator = Generator::new(cfg, renderer.as_ref()).with_verbose(verbose);
            let report = generator.run(&path)?;

            println!("{}", report.summary());
            println!("Documentation written to: {}", output_dir.display());
            Ok(())
        }

        Command::Version => {
            println!("gopherdoc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// An explicit config path must load; the default file is optional
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                Config::load(&default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn create_renderer(format: OutputFormat, output_dir: &Path) -> Result<Box<dyn Renderer>> {
    Ok(match format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(output_dir)?),
        OutputFormat::Json => Box::new(JsonRenderer::new(output_dir)?),
    })
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let level = if verbose { "gopherdoc=debug" } else { "gopherdoc=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
