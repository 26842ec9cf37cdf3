//! Physical package writing: the ZIP container behind a package.
//!
//! The assembler only needs two operations from the container, "add a named
//! byte stream" and "add a file by path", so they sit behind [`ArchiveSink`].
//! [`ZipSink`] implements them on top of the `zip` crate.

use crate::error::Result;
use crate::options::WriteOptions;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Destination for archive entries.
pub trait ArchiveSink {
    /// Write `data` as entry `name`.
    fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<()>;

    /// Copy the file at `source` into entry `name`.
    fn add_file(&mut self, name: &str, source: &Path) -> Result<()>;
}

/// ZIP writer applying one set of [`WriteOptions`] to every entry.
pub struct ZipSink<W: Write + Seek> {
    archive: ZipWriter<W>,
    options: SimpleFileOptions,
}

impl ZipSink<std::io::Cursor<Vec<u8>>> {
    /// Create a sink that writes to memory.
    pub fn in_memory(options: &WriteOptions) -> Self {
        Self::new(std::io::Cursor::new(Vec::new()), options)
    }
}

impl<W: Write + Seek> ZipSink<W> {
    pub fn new(writer: W, options: &WriteOptions) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(options.compression_method())
            .last_modified_time(options.timestamp())
            .unix_permissions(0o644);

        Self {
            archive: ZipWriter::new(writer),
            options,
        }
    }

    /// Write the central directory and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.archive.finish()?)
    }
}

impl<W: Write + Seek> ArchiveSink for ZipSink<W> {
    fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.archive.start_file(name, self.options)?;
        self.archive.write_all(data)?;
        Ok(())
    }

    fn add_file(&mut self, name: &str, source: &Path) -> Result<()> {
        let mut file = File::open(source)?;
        self.archive.start_file(name, self.options)?;
        std::io::copy(&mut file, &mut self.archive)?;
        Ok(())
    }
}
