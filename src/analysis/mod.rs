// Analysis module: walks a Go source tree and fans page generation out
// across directories

pub mod aggregate;
pub mod naming;
pub mod subpackages;
pub mod walk;

pub use aggregate::*;
pub use naming::*;
pub use subpackages::*;
pub use walk::*;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::IndexEntry;
use crate::output::Renderer;
use crate::parser::GoParser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Display name used when neither the config nor the root path provides one
const DEFAULT_ROOT_NAME: &str = "Project";

/// Outcome of one generation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Directories that produced at least one package
    pub directories: usize,
    /// Pages rendered and listed in the index
    pub pages: usize,
    /// Directories skipped because a file failed to parse
    pub skipped: usize,
    /// Pages that failed to render and were left out of the index
    pub failed: usize,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Generated {} pages from {} directories ({} skipped, {} failed)",
            self.pages, self.directories, self.skipped, self.failed
        )
    }
}

#[derive(Default)]
struct Counters {
    directories: AtomicUsize,
    pages: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl Counters {
    fn report(&self) -> GenerationReport {
        GenerationReport {
            directories: self.directories.load(Ordering::Relaxed),
            pages: self.pages.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// State shared by every directory task of one run
struct RunContext {
    root: PathBuf,
    filter: DirFilter,
    naming: DocNaming,
    entries: Mutex<Vec<IndexEntry>>,
    counters: Counters,
    progress: Option<ProgressBar>,
}

/// Main generator that orchestrates the documentation pipeline
pub struct Generator<'r> {
    config: Config,
    renderer: &'r dyn Renderer,
    verbose: bool,
}

impl<'r> Generator<'r> {
    /// Create a new generator writing through `renderer`
    pub fn new(config: Config, renderer: &'r dyn Renderer) -> Self {
        Self {
            config,
            renderer,
            verbose: false,
        }
    }

    /// Show a progress spinner while pages render
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Name shown on the index page
    pub fn root_name(&self, root: &Path) -> String {
        if let Some(name) = &self.config.project.name {
            return name.clone();
        }
        root.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string())
    }

    /// Document every package under `root` and write the index
    ///
    /// The walk runs on the calling thread; each directory with packages is
    /// handed to its own rayon task. The index is rendered only after every
    /// task has finished.
    pub fn run(&self, root: &Path) -> Result<GenerationReport> {
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let ctx = RunContext {
            root: root.canonicalize()?,
            filter: DirFilter::new(&self.config.source)?,
            naming: DocNaming::new(self.renderer.extension()),
            entries: Mutex::new(Vec::new()),
            counters: Counters::default(),
            progress: self.progress_bar(),
        };
        let mut parser = GoParser::new()?;

        info!("Generating documentation for {}", ctx.root.display());

        rayon::scope(|scope| -> Result<()> {
            let ctx = &ctx;
            // Document names already taken, with the directory that took them
            let mut claimed: HashMap<String, PathBuf> = HashMap::new();
            let walker = WalkDir::new(&ctx.root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| {
                    if e.depth() == 0 {
                        return true;
                    }
                    if !e.file_type().is_dir() {
                        return false;
                    }
                    let rel = e.path().strip_prefix(&ctx.root).unwrap_or(e.path());
                    ctx.filter.allows(&e.file_name().to_string_lossy(), rel)
                });

            for entry in walker {
                let entry = entry?;
                let rel_path = entry
                    .path()
                    .strip_prefix(&ctx.root)
                    .map(Path::to_path_buf)
                    .unwrap_or_default();

                let parsed = match parse_directory(
                    &mut parser,
                    entry.path(),
                    &rel_path,
                    ctx.filter.source(),
                ) {
                    Ok(parsed) if parsed.is_empty() => continue,
                    Ok(parsed) => parsed,
                    Err(e) => {
                        warn!("Skipping {}: {}", entry.path().display(), e);
                        ctx.counters.skipped.fetch_add(1, Ordering::Relaxed);
                        continue;
                    }
                };

                let mut blocked = Vec::new();
                for doc_file in page_files(&parsed, &ctx.naming) {
                    match claimed.entry(doc_file) {
                        Entry::Occupied(owner) => {
                            warn!(
                                "{} and {} both map to {}; keeping the first",
                                owner.get().display(),
                                parsed.path.display(),
                                owner.key()
                            );
                            blocked.push(owner.key().clone());
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(parsed.path.clone());
                        }
                    }
                }

                ctx.counters.directories.fetch_add(1, Ordering::Relaxed);
                scope.spawn(move |_| self.generate_directory(parsed, blocked, ctx));
            }

            Ok(())
        })?;

        if let Some(pb) = &ctx.progress {
            pb.finish_with_message("done");
        }

        let entries = ctx
            .entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        self.renderer.render_index(
            &ctx.naming.index_file(),
            &entries,
            &self.root_name(&ctx.root),
        )?;
        info!("Wrote index with {} entries", entries.len());

        Ok(ctx.counters.report())
    }

    /// Build, render and record the pages of one directory
    ///
    /// Pages named in `blocked` belong to an earlier directory and are dropped.
    fn generate_directory(&self, dir: ParsedDirectory, blocked: Vec<String>, ctx: &RunContext) {
        debug!("Building pages for {}", dir.path.display());

        let mut parser = match GoParser::new() {
            Ok(parser) => parser,
            Err(e) => {
                warn!("Skipping {}: {}", dir.path.display(), e);
                ctx.counters
                    .failed
                    .fetch_add(dir.packages.len(), Ordering::Relaxed);
                return;
            }
        };

        let pages = build_pages(&dir, &mut parser, &ctx.root, &ctx.filter, &ctx.naming);
        let mut rendered = Vec::with_capacity(pages.len());

        for page in pages {
            if blocked.contains(&page.doc_file) {
                ctx.counters.failed.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            match self.renderer.render_page(&page.doc_file, &page.model) {
                Ok(()) => {
                    info!("Generated {}", page.doc_file);
                    ctx.counters.pages.fetch_add(1, Ordering::Relaxed);
                    rendered.push(page.index_entry());
                }
                Err(e) => {
                    warn!("Skipping page {}: {}", page.doc_file, e);
                    ctx.counters.failed.fetch_add(1, Ordering::Relaxed);
                }
            }
            if let Some(pb) = &ctx.progress {
                pb.inc(1);
            }
        }

        ctx.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(rendered);
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if !self.verbose {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {pos} pages {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
