//! Archive writers
//!
//! [`ArchiveSink`] is the narrow interface the packager writes through: append
//! a file from disk, append an in-memory text blob, finish. Entry names are
//! always `/`-separated archive paths.

use crate::error::Result;
use bzip2::write::BzEncoder;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Mode of in-memory entries
const TEXT_MODE: u32 = 0o644;

/// Whether a zip entry of `len` bytes needs zip64 extensions
fn needs_large_file(len: u64) -> bool {
    len > u64::from(u32::MAX)
}

/// Destination for archive entries
pub trait ArchiveSink {
    /// Append the contents of `src` under `name`
    fn append_file(&mut self, src: &Path, name: &str) -> Result<()>;

    /// Append `text` under `name`
    fn append_text(&mut self, name: &str, text: &str) -> Result<()>;

    /// Flush and close the archive
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Deflate-compressed zip archive
pub struct ZipSink {
    writer: ZipWriter<File>,
}

impl ZipSink {
    /// Create or truncate a zip archive at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: ZipWriter::new(file),
        })
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }
}

impl ArchiveSink for ZipSink {
    fn append_file(&mut self, src: &Path, name: &str) -> Result<()> {
        let metadata = fs::metadata(src)?;
        #[allow(unused_mut)]
        let mut options = Self::options().large_file(needs_large_file(metadata.len()));

        // Keep the executable bit on installed binaries
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(metadata.permissions().mode());
        }

        debug!("zip: {} <- {}", name, src.display());
        self.writer.start_file(name, options)?;
        let mut file = File::open(src)?;
        io::copy(&mut file, &mut self.writer)?;
        Ok(())
    }

    fn append_text(&mut self, name: &str, text: &str) -> Result<()> {
        debug!("zip: {} <- <generated>", name);
        let options = Self::options().unix_permissions(TEXT_MODE);
        self.writer.start_file(name, options)?;
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let mut file = self.writer.finish()?;
        file.flush()?;
        Ok(())
    }
}

/// bzip2-compressed tarball
pub struct TarBz2Sink {
    builder: tar::Builder<BzEncoder<File>>,
}

impl TarBz2Sink {
    /// Create or truncate a `.tar.bz2` archive at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        let encoder = BzEncoder::new(file, bzip2::Compression::best());
        Ok(Self {
            builder: tar::Builder::new(encoder),
        })
    }
}

impl ArchiveSink for TarBz2Sink {
    fn append_file(&mut self, src: &Path, name: &str) -> Result<()> {
        debug!("tar: {} <- {}", name, src.display());
        self.builder.append_path_with_name(src, name)?;
        Ok(())
    }

    fn append_text(&mut self, name: &str, text: &str) -> Result<()> {
        debug!("tar: {} <- <generated>", name);
        let mut header = tar::Header::new_gnu();
        header.set_size(text.len() as u64);
        header.set_mode(TEXT_MODE);
        self.builder.append_data(&mut header, name, text.as_bytes())?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let encoder = self.builder.into_inner()?;
        let mut file = encoder.finish()?;
        file.flush()?;
        Ok(())
    }
}
