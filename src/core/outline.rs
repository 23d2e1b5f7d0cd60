//! Filepath: src/core/outline.rs
//! Program elements, identifiers and comments of one source, as
//! reported by a language-specific element locator.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        error::CueResult,
        region::{Location, Region},
        source::{Lang, Source},
    },
    parsers::{JavaLocator, PythonLocator, RustLocator},
};

/// Normalized element kinds across languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind
{
    /// Class, interface, enum, record, struct, trait
    Type,

    /// Method, constructor, free function
    Method,
}

/// A named declaration with its full span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramElement
{
    pub name: String,
    pub kind: ElementKind,
    pub location: Location,
}

/// A piece of raw text (identifier or comment) and where it sits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token
{
    pub text: String,
    pub location: Location,
}

/// Everything the concept extractor needs from a parsed source
#[derive(Debug, Clone, Default)]
pub struct SourceOutline
{
    pub elements: Vec<ProgramElement>,
    pub identifiers: Vec<Token>,
    pub comments: Vec<Token>,
}

impl SourceOutline
{
    /// Names of every declared element, in any scope
    pub fn declared_names(&self) -> HashSet<&str>
    {
        self.elements
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Region covering every element whose name is in `names`
    pub fn region_for<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> CueResult<Region>
    {
        let wanted: HashSet<&str> = names
            .iter()
            .map(|n| n.as_ref())
            .collect();

        Region::from_locations(
            self.elements
                .iter()
                .filter(|e| wanted.contains(e.name.as_str()))
                .map(|e| {
                    e.location
                        .clone()
                }),
        )
    }
}

/// Language-specific outline provider
pub trait ElementLocator: Send + Sync
{
    /// Parse `source` and report its elements, identifiers and comments
    fn outline(
        &self,
        source: &Source,
    ) -> CueResult<SourceOutline>;
}

/// Simple locator registry
pub fn locator_for(lang: Lang) -> Box<dyn ElementLocator>
{
    match lang
    {
        Lang::Java => Box::new(JavaLocator::new()),
        Lang::Rust => Box::new(RustLocator::new()),
        Lang::Python => Box::new(PythonLocator::new()),
    }
}
