// Parser module: Go source into the declaration tree

mod go;
pub mod syntax;

pub use go::GoParser;
pub use syntax::*;
