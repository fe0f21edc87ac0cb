//! Types carrying the extraction containment guarantees.
//!
//! `DestRoot` and `SafePath` can only be built through normalization and
//! validation, so code holding a `SafePath` never needs to re-check
//! containment.

pub mod dest_root;
pub mod entry;
pub mod safe_path;

pub use dest_root::DestRoot;
pub use entry::ArchiveEntry;
pub use entry::EntryKind;
pub use safe_path::SafePath;
