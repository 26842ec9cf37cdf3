/// Open Packaging Conventions (OPC) pieces of a NuGet package.
///
/// This module provides the container-level parts every package carries:
///
/// - Entry name normalization and escaping (`packuri`)
/// - Content type table derived from the written entries (`content_types`)
/// - Package relationships (`rel`) and core properties (`core_props`)
/// - ZIP-based physical packaging (`phys_pkg`)

pub mod constants;
pub mod content_types;
pub mod core_props;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use content_types::ContentTypes;
pub use phys_pkg::{ArchiveSink, ZipSink};
pub use rel::Relationship;
