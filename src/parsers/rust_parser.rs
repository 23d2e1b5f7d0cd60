//! Filepath: src/parsers/rust_parser.rs

use tree_sitter::Language;

use crate::{
    core::{
        error::CueResult,
        outline::{ElementLocator, SourceOutline},
        source::Source,
    },
    parsers::grammar::{GrammarProfile, build_outline},
};

// impl blocks carry no name of their own; their functions are reported
// as methods and the implemented type is picked up as an identifier
const RUST: GrammarProfile = GrammarProfile {
    label: "rust",
    type_kinds: &["struct_item", "enum_item", "trait_item", "union_item", "type_item"],
    method_kinds: &["function_item", "function_signature_item"],
    identifier_kinds: &["identifier", "type_identifier", "field_identifier"],
    comment_kinds: &["line_comment", "block_comment"],
    docstrings: false,
};

pub struct RustLocator
{
    language: Language,
}

impl RustLocator
{
    pub fn new() -> Self
    {
        Self { language: tree_sitter_rust::LANGUAGE.into() }
    }
}

impl Default for RustLocator
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl ElementLocator for RustLocator
{
    fn outline(
        &self,
        source: &Source,
    ) -> CueResult<SourceOutline>
    {
        build_outline(&RUST, &self.language, source)
    }
}
