//! Filepath: src/infra/io.rs
//! Source loading: memory-mapped above 1 MiB, buffered below.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, anyhow};
use memmap2::Mmap;
use tracing::debug;

use crate::core::source::{Lang, Source};

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

pub enum FileContent
{
    Mapped(Mmap),
    Buffered(String),
}

impl FileContent
{
    /// Borrow the content as UTF-8
    pub fn as_str(&self) -> Result<&str>
    {
        match self
        {
            FileContent::Mapped(mmap) =>
            {
                std::str::from_utf8(mmap).map_err(|e| anyhow!("not valid UTF-8: {e}"))
            }
            FileContent::Buffered(s) => Ok(s.as_str()),
        }
    }
}

pub fn read_file_smart<P: AsRef<Path>>(path: P) -> Result<FileContent>
{
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.len() > MMAP_THRESHOLD
    {
        let file =
            File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;

        // Safety: the map is read-only and dropped before we return
        // ownership of the text to the caller
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map {}", path.display()))?;

        Ok(FileContent::Mapped(mmap))
    }
    else
    {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        Ok(FileContent::Buffered(content))
    }
}

/// Load `path` as a source whose id is `id`; the language comes from
/// the file extension
pub fn load_source(
    path: &Path,
    id: impl Into<String>,
) -> Result<Source>
{
    let lang = Lang::detect(path)
        .ok_or_else(|| anyhow!("Unsupported source language: {}", path.display()))?;

    let content = read_file_smart(path)?;
    let text = content
        .as_str()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    debug!(path = %path.display(), %lang, bytes = text.len(), "loaded source");

    Ok(Source::from_text(id, lang, text))
}
