//! Filepath: src/infra/walk.rs
//! Gitignore-aware corpus walker.
//! - Respects .gitignore, .git/info/exclude, and global gitignore
//! - Extra ignore globs (early prune + late filter)
//! - Extension filter for the languages being analyzed
//! - Deterministic ordering, so corpus order and ties are stable

use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use tracing::warn;

pub struct FileWalker
{
    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,

    /// Lowercase extensions to keep; empty keeps everything
    extensions: Vec<String>,
}

impl FileWalker
{
    /// Build a walker with additional ignore patterns (e.g. "target/**").
    /// Patterns match on paths relative to the walk root.
    pub fn new(additional_ignores: &[String]) -> Result<Self>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self { ignore_patterns: builder.build()?, extensions: Vec::new() })
    }

    /// Keep only files with one of these extensions (without the dot)
    pub fn with_extensions<S: AsRef<str>>(
        mut self,
        extensions: &[S],
    ) -> Self
    {
        self.extensions = extensions
            .iter()
            .map(|e| {
                e.as_ref()
                    .trim_start_matches('.')
                    .to_ascii_lowercase()
            })
            .collect();
        self
    }

    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // Skip dotfiles; hidden sources are rarely part of a corpus
        b.hidden(true);
        b.git_ignore(true);
        b.git_global(true);
        b.git_exclude(true);

        // Early directory pruning using extra ignores
        let extra = self
            .ignore_patterns
            .clone();
        let base = root.to_path_buf();
        b.filter_entry(move |ent: &DirEntry| {
            let is_dir = ent
                .file_type()
                .is_some_and(|ft| ft.is_dir());

            let rel = ent
                .path()
                .strip_prefix(&base)
                .unwrap_or(ent.path());

            !(is_dir && extra.is_match(rel))
        });

        b
    }

    fn wanted(
        &self,
        path: &Path,
    ) -> bool
    {
        if self
            .extensions
            .is_empty()
        {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                self.extensions
                    .iter()
                    .any(|x| x.eq_ignore_ascii_case(e))
            })
    }

    /// Files under `root`, sorted for determinism
    pub fn walk_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<PathBuf>
    {
        let root_path = root.as_ref();
        let walker = self
            .build_walk(root_path)
            .build();

        let mut out: Vec<PathBuf> = walker
            .filter_map(|res| match res
            {
                Ok(entry) => Some(entry),
                Err(err) =>
                {
                    warn!(%err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|abs| self.wanted(abs))
            // Late file-level filtering on the relative path
            .filter(|abs| {
                let rel = abs
                    .strip_prefix(root_path)
                    .unwrap_or(abs);
                !self
                    .ignore_patterns
                    .is_match(rel)
            })
            .collect();

        out.sort();

        out
    }
}
