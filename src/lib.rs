//! gopherdoc - Generate package documentation from Go source trees
//!
//! Walks a Go source tree, extracts the top-level declarations of every
//! package and renders one page per package plus an index.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{GenerationReport, Generator};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Entity, IndexEntry, PageModel};
pub use output::{HtmlRenderer, JsonRenderer, Renderer};
