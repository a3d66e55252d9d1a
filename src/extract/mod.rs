// Extraction: declaration tree into documentable entities

pub mod declarations;
pub mod signature;
pub mod stringify;

pub use declarations::{extract_decl, is_test_function, normalize_doc};
pub use stringify::{format_field_list, stringify};
