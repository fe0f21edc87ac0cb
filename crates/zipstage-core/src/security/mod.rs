//! Path containment checks for archive extraction.

pub mod path;

pub use path::normalize_path;
pub use path::sanitize_extract_path;
