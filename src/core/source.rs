//! Filepath: src/core/source.rs
//! Immutable sources and the corpus they form.
//!
//! A `Source` owns its text; everything downstream (locations,
//! regions, term vectors) only borrows or refers to it by id.

use std::{collections::HashSet, fmt, path::Path};

use serde::{Deserialize, Serialize};

/// File identity used for location ordering and equality
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId
{
    pub fn new(id: impl Into<String>) -> Self
    {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str
    {
        &self.0
    }
}

impl fmt::Display for SourceId
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(&self.0)
    }
}

/// Languages with an element locator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang
{
    Java,
    Rust,
    Python,
}

impl Lang
{
    /// Map a file extension (without dot) to a language
    pub fn from_extension(ext: &str) -> Option<Self>
    {
        match ext
            .to_ascii_lowercase()
            .as_str()
        {
            "java" => Some(Self::Java),
            "rs" => Some(Self::Rust),
            "py" | "pyi" => Some(Self::Python),
            _ => None,
        }
    }

    /// Detect the language of a path from its extension
    pub fn detect(path: &Path) -> Option<Self>
    {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension for this language
    pub fn extension(self) -> &'static str
    {
        match self
        {
            Self::Java => "java",
            Self::Rust => "rs",
            Self::Python => "py",
        }
    }
}

impl fmt::Display for Lang
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        let label = match self
        {
            Self::Java => "java",
            Self::Rust => "rust",
            Self::Python => "python",
        };
        f.write_str(label)
    }
}

/// One unit of source text with a stable identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source
{
    id: SourceId,
    lang: Lang,
    content: String,
}

impl Source
{
    /// Build an in-memory source
    pub fn from_text(
        id: impl Into<String>,
        lang: Lang,
        content: impl Into<String>,
    ) -> Self
    {
        Self { id: SourceId::new(id), lang, content: content.into() }
    }

    pub fn id(&self) -> &SourceId
    {
        &self.id
    }

    pub fn lang(&self) -> Lang
    {
        self.lang
    }

    /// Full text of the source
    pub fn content(&self) -> &str
    {
        &self.content
    }

    pub fn len(&self) -> usize
    {
        self.content
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.content
            .is_empty()
    }
}

/// Ordered population of sources, deduplicated by id (first wins).
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Corpus
{
    sources: Vec<Source>,
}

impl Corpus
{
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Source>,
    {
        let mut seen = HashSet::new();
        let sources = sources
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        Self { sources }
    }

    pub fn len(&self) -> usize
    {
        self.sources
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.sources
            .is_empty()
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Source>
    {
        self.sources
            .get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source>
    {
        self.sources
            .iter()
    }

    pub fn as_slice(&self) -> &[Source]
    {
        &self.sources
    }
}

impl FromIterator<Source> for Corpus
{
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self
    {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Corpus
{
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.iter()
    }
}
