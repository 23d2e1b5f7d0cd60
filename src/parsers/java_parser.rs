//! Filepath: src/parsers/java_parser.rs

use tree_sitter::Language;

use crate::{
    core::{
        error::CueResult,
        outline::{ElementLocator, SourceOutline},
        source::Source,
    },
    parsers::grammar::{GrammarProfile, build_outline},
};

const JAVA: GrammarProfile = GrammarProfile {
    label: "java",
    type_kinds: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "annotation_type_declaration",
    ],
    method_kinds: &["method_declaration", "constructor_declaration"],
    identifier_kinds: &["identifier", "type_identifier"],
    comment_kinds: &["line_comment", "block_comment", "comment"],
    docstrings: false,
};

pub struct JavaLocator
{
    language: Language,
}

impl JavaLocator
{
    pub fn new() -> Self
    {
        Self { language: tree_sitter_java::LANGUAGE.into() }
    }
}

impl Default for JavaLocator
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl ElementLocator for JavaLocator
{
    fn outline(
        &self,
        source: &Source,
    ) -> CueResult<SourceOutline>
    {
        build_outline(&JAVA, &self.language, source)
    }
}
