//! Nupack - write NuGet packages (`.nupkg`) as Open Packaging Conventions archives
//!
//! A package is a ZIP container holding the payload files chosen by the caller plus
//! four generated parts: the `.nuspec` manifest, the core properties, the package
//! relationships, and `[Content_Types].xml`.
//!
//! # Features
//!
//! - **Deterministic entry names**: `\` and `/` are interchangeable, `.` and `..`
//!   are resolved, and every segment is percent-escaped (except `@`)
//! - **Exclusions**: glob patterns relative to the working directory prune whole
//!   directories or single files
//! - **First write wins**: a second file mapped to the same entry is dropped silently
//! - **Exact content types**: one row per extension actually present in the archive
//!
//! # Example
//!
//! ```no_run
//! use nupack::{CoreInfo, Dependency, OptionalInfo};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let core = CoreInfo::new(
//!     "Foo",
//!     Some("1.0.0".to_string()),
//!     "The Foo library",
//!     vec!["Jane Doe".to_string()],
//! );
//! let optional = OptionalInfo::new()
//!     .title("Foo")
//!     .tags(["parsing", "text"])
//!     .dependency(Dependency::new("Bar", "[1.2, 2.0)"))
//!     .file("bin/Release", "lib/net45")
//!     .exclude("bin/Release/*.pdb");
//!
//! let path = nupack::write(&core, &optional, Path::new("."), Path::new("out"))?;
//! println!("Created {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exclusion;
pub mod info;
pub mod nuspec;
pub mod opc;
pub mod options;
pub mod writer;
pub mod xml;

// Re-export commonly used types for convenience
pub use error::{PackError, Result};
pub use exclusion::{ExclusionRule, ExclusionSet};
pub use info::{CoreInfo, Dependency, FileMapping, FrameworkAssemblyReference, OptionalInfo};
pub use options::WriteOptions;
pub use writer::{PackageWriter, write};
