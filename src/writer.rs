//! Package writer: assembles payload files and metadata parts into a `.nupkg`.
//!
//! Entries are written in this order:
//!
//! 1. Payload files, one file mapping at a time, in the caller's order. Inside a
//!    mapped directory, files come before subdirectories and names are sorted.
//! 2. The manifest, the core properties, and `_rels/.rels`.
//! 3. `[Content_Types].xml`, derived from every entry written before it.
//!
//! An entry name can only be written once. The first registration wins and
//! later ones for the same name are dropped without error, which also applies to
//! a payload file that collides with a metadata part name.

use crate::error::{PackError, Result};
use crate::exclusion::ExclusionSet;
use crate::info::{CoreInfo, FileMapping, OptionalInfo};
use crate::nuspec::{manifest_document, manifest_part_name};
use crate::opc::constants::part_name;
use crate::opc::content_types::ContentTypes;
use crate::opc::core_props::core_properties_document;
use crate::opc::packuri::{ensure_valid_name, ensure_valid_target_name, join_target, normalize_path};
use crate::opc::phys_pkg::{ArchiveSink, ZipSink};
use crate::opc::rel::relationships_document;
use crate::options::WriteOptions;
use indexmap::IndexSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Writes packages to disk with a fixed set of [`WriteOptions`].
///
/// The writer holds no state between calls, so one instance can build any
/// number of packages.
///
/// # Example
///
/// ```no_run
/// use nupack::{CoreInfo, OptionalInfo, PackageWriter, WriteOptions};
/// use std::path::Path;
///
/// let core = CoreInfo::new("Foo", Some("1.0.0".into()), "Foo library", vec!["me".into()]);
/// let optional = OptionalInfo::new().file("bin", "lib/net45").exclude("bin/*.pdb");
///
/// let path = PackageWriter::new(WriteOptions::default())
///     .write(&core, &optional, Path::new("."), Path::new("out"))?;
/// println!("wrote {}", path.display());
/// # Ok::<(), nupack::PackError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageWriter {
    options: WriteOptions,
}

impl PackageWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Build the package and write it to `output_dir/<package file name>`.
    ///
    /// Any existing file at that path is replaced. If assembly fails after the
    /// file was created, the partial archive is removed before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`PackError::MissingVersion`] before anything touches the output path
    /// - [`PackError::InvalidPath`] / [`PackError::InvalidPattern`] for bad exclusions
    /// - [`PackError::OutputPath`] if the output file cannot be recreated
    /// - [`PackError::SourceNotFound`] if a file mapping's source does not exist
    pub fn write(
        &self,
        core: &CoreInfo,
        optional: &OptionalInfo,
        working_dir: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        require_version(core)?;
        let exclusions = ExclusionSet::compile(working_dir, &optional.files_excluded)?;

        let output_path = output_dir.join(&core.package_file_name);
        let file = create_output(&output_path)?;

        let written = self
            .write_file(file, core, optional, working_dir, &exclusions)
            .inspect_err(|err| {
                warn!(path = %output_path.display(), error = %err, "removing partial package");
                if let Err(remove_err) = fs::remove_file(&output_path) {
                    warn!(
                        path = %output_path.display(),
                        error = %remove_err,
                        "could not remove partial package"
                    );
                }
            })?;

        info!(
            id = %core.id,
            path = %output_path.display(),
            entries = written.len(),
            "package written"
        );
        Ok(output_path)
    }

    /// Assemble the package into an arbitrary sink.
    ///
    /// Returns every entry name in write order, `[Content_Types].xml` last.
    pub fn write_to<S: ArchiveSink>(
        &self,
        sink: &mut S,
        core: &CoreInfo,
        optional: &OptionalInfo,
        working_dir: &Path,
    ) -> Result<Vec<String>> {
        require_version(core)?;
        let exclusions = ExclusionSet::compile(working_dir, &optional.files_excluded)?;
        Assembler::new(sink, &exclusions).run(core, optional, working_dir)
    }

    fn write_file(
        &self,
        file: File,
        core: &CoreInfo,
        optional: &OptionalInfo,
        working_dir: &Path,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<String>> {
        let mut sink = ZipSink::new(BufWriter::new(file), &self.options);
        let written = Assembler::new(&mut sink, exclusions).run(core, optional, working_dir)?;
        sink.finish()?.flush()?;
        Ok(written)
    }
}

/// Build a package with default [`WriteOptions`].
///
/// See [`PackageWriter::write`].
pub fn write(
    core: &CoreInfo,
    optional: &OptionalInfo,
    working_dir: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    PackageWriter::default().write(core, optional, working_dir, output_dir)
}

fn require_version(core: &CoreInfo) -> Result<()> {
    match core.version {
        Some(_) => Ok(()),
        None => Err(PackError::MissingVersion {
            id: core.id.clone(),
        }),
    }
}

/// Remove any previous archive at `path` and create an empty one.
fn create_output(path: &Path) -> Result<File> {
    let output_error = |source| PackError::OutputPath {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output_error)?;
    }
    if path.exists() {
        fs::remove_file(path).map_err(output_error)?;
    }
    File::create(path).map_err(output_error)
}

/// One assembly run: owns the dedup set and borrows the sink.
struct Assembler<'a, S: ArchiveSink> {
    sink: &'a mut S,
    exclusions: &'a ExclusionSet,
    entries: IndexSet<String>,
}

impl<'a, S: ArchiveSink> Assembler<'a, S> {
    fn new(sink: &'a mut S, exclusions: &'a ExclusionSet) -> Self {
        Self {
            sink,
            exclusions,
            entries: IndexSet::new(),
        }
    }

    fn run(
        mut self,
        core: &CoreInfo,
        optional: &OptionalInfo,
        working_dir: &Path,
    ) -> Result<Vec<String>> {
        for mapping in &optional.files {
            self.add_mapping(working_dir, mapping)?;
        }

        let manifest = manifest_document(core, optional)?.to_bytes()?;
        self.add_bytes(manifest_part_name(core), &manifest)?;

        let core_props = core_properties_document(core)?.to_bytes()?;
        self.add_bytes(part_name::CORE_PROPERTIES.to_string(), &core_props)?;

        let rels = relationships_document(core).to_bytes()?;
        self.add_bytes(part_name::PACKAGE_RELS.to_string(), &rels)?;

        let content_types = ContentTypes::from_entries(&self.entries)
            .to_document()
            .to_bytes()?;
        self.sink
            .add_bytes(part_name::CONTENT_TYPES, &content_types)?;

        let mut written: Vec<String> = self.entries.into_iter().collect();
        written.push(part_name::CONTENT_TYPES.to_string());
        Ok(written)
    }

    fn add_mapping(&mut self, working_dir: &Path, mapping: &FileMapping) -> Result<()> {
        let target = ensure_valid_target_name(&mapping.target);
        let joined = std::path::absolute(working_dir.join(&mapping.source))?;
        let source = PathBuf::from(normalize_path(&joined.to_string_lossy()));

        if source.is_dir() {
            self.add_dir(&source, &target)
        } else if source.is_file() {
            if self.exclusions.is_excluded(&source) {
                debug!(source = %source.display(), "excluded");
                return Ok(());
            }
            let name = file_name(&source)?;
            self.add_file(join_target(&target, &ensure_valid_name(&name)), &source)
        } else {
            Err(PackError::SourceNotFound { path: source })
        }
    }

    fn add_dir(&mut self, source: &Path, target: &str) -> Result<()> {
        if self.exclusions.is_excluded(source) {
            debug!(source = %source.display(), "excluded directory");
            return Ok(());
        }

        let mut walker = WalkDir::new(source)
            .min_depth(1)
            .follow_links(true)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let is_dir = entry.file_type().is_dir();

            if self.exclusions.is_excluded(entry.path()) {
                debug!(source = %entry.path().display(), "excluded");
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }
            if is_dir {
                continue;
            }

            let relative = escaped_relative(source, entry.path())?;
            self.add_file(join_target(target, &relative), entry.path())?;
        }
        Ok(())
    }

    /// Register `name`; false if it was already taken.
    fn register(&mut self, name: &str) -> bool {
        if name == part_name::CONTENT_TYPES {
            debug!(entry = name, "reserved entry name, skipping");
            return false;
        }
        if !self.entries.insert(name.to_string()) {
            debug!(entry = name, "duplicate entry, keeping first");
            return false;
        }
        true
    }

    fn add_file(&mut self, name: String, source: &Path) -> Result<()> {
        if self.register(&name) {
            debug!(entry = %name, source = %source.display(), "adding file");
            self.sink.add_file(&name, source)?;
        }
        Ok(())
    }

    fn add_bytes(&mut self, name: String, data: &[u8]) -> Result<()> {
        if self.register(&name) {
            debug!(entry = %name, bytes = data.len(), "adding part");
            self.sink.add_bytes(&name, data)?;
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PackError::InvalidPath(path.display().to_string()))
}

/// Path of `path` below `root`, each segment escaped, joined with `/`.
fn escaped_relative(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackError::InvalidPath(path.display().to_string()))?;

    Ok(relative
        .components()
        .map(|c| ensure_valid_name(&c.as_os_str().to_string_lossy()))
        .collect::<Vec<_>>()
        .join("/"))
}
