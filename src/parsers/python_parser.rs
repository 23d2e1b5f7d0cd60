//! Filepath: src/parsers/python_parser.rs

use tree_sitter::Language;

use crate::{
    core::{
        error::CueResult,
        outline::{ElementLocator, SourceOutline},
        source::Source,
    },
    parsers::grammar::{GrammarProfile, build_outline},
};

// Docstrings are the only prose most Python sources carry, so they
// count as comments
const PYTHON: GrammarProfile = GrammarProfile {
    label: "python",
    type_kinds: &["class_definition"],
    method_kinds: &["function_definition"],
    identifier_kinds: &["identifier"],
    comment_kinds: &["comment"],
    docstrings: true,
};

pub struct PythonLocator
{
    language: Language,
}

impl PythonLocator
{
    pub fn new() -> Self
    {
        Self { language: tree_sitter_python::LANGUAGE.into() }
    }
}

impl Default for PythonLocator
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl ElementLocator for PythonLocator
{
    fn outline(
        &self,
        source: &Source,
    ) -> CueResult<SourceOutline>
    {
        build_outline(&PYTHON, &self.language, source)
    }
}
