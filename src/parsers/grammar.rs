//! Filepath: src/parsers/grammar.rs
//! Grammar-agnostic outline builder. Each language contributes a
//! `GrammarProfile` naming the node kinds that matter; one preorder
//! walk then collects declarations, identifiers and comments.

use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::{
    core::{
        error::{CueError, CueResult},
        outline::{ElementKind, ProgramElement, SourceOutline, Token},
        region::Location,
        source::Source,
    },
    infra::utils::{TsNodeUtils, Utf8Utils},
};

/// Node kinds of interest for one grammar
#[derive(Debug, Clone, Copy)]
pub struct GrammarProfile
{
    /// Language label for diagnostics
    pub label: &'static str,

    /// Declarations reported as `ElementKind::Type`
    pub type_kinds: &'static [&'static str],

    /// Declarations reported as `ElementKind::Method`
    pub method_kinds: &'static [&'static str],

    /// Leaf kinds carrying identifier text
    pub identifier_kinds: &'static [&'static str],

    /// Comment node kinds
    pub comment_kinds: &'static [&'static str],

    /// Treat bare string statements (Python docstrings) as comments
    pub docstrings: bool,
}

impl GrammarProfile
{
    fn element_kind(
        &self,
        kind: &str,
    ) -> Option<ElementKind>
    {
        if self
            .type_kinds
            .contains(&kind)
        {
            Some(ElementKind::Type)
        }
        else if self
            .method_kinds
            .contains(&kind)
        {
            Some(ElementKind::Method)
        }
        else
        {
            None
        }
    }

    fn is_comment(
        &self,
        node: Node<'_>,
    ) -> bool
    {
        if self
            .comment_kinds
            .contains(&node.kind())
        {
            return true;
        }

        // Docstring: a bare string opening a module, class or function body
        self.docstrings
            && node.kind() == "string"
            && node
                .parent()
                .is_some_and(|p| {
                    p.kind() == "expression_statement"
                        && p.prev_named_sibling()
                            .is_none()
                })
    }
}

/// Parse `source` with `language` and collect its outline
pub fn build_outline(
    profile: &GrammarProfile,
    language: &Language,
    source: &Source,
) -> CueResult<SourceOutline>
{
    let parse_error = |reason: String| CueError::Parse {
        source_id: source
            .id()
            .to_string(),
        reason,
    };

    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| parse_error(format!("{} grammar: {e}", profile.label)))?;

    let text = source.content();
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| parse_error(format!("{} parser produced no tree", profile.label)))?;

    let mut outline = SourceOutline::default();

    TsNodeUtils::preorder(&tree, |node| {
        let kind = node.kind();

        // Declarations: name + full span
        if let Some(ek) = profile.element_kind(kind)
            && let Some(name) = TsNodeUtils::name_of(node, text)
            && let Some(location) = location_of(source, node)
        {
            outline
                .elements
                .push(ProgramElement { name: name.to_string(), kind: ek, location });
        }

        if profile
            .identifier_kinds
            .contains(&kind)
        {
            push_token(&mut outline.identifiers, source, node);
        }
        else if profile.is_comment(node)
        {
            push_token(&mut outline.comments, source, node);
        }
    });

    debug!(
        source = %source.id(),
        lang = profile.label,
        elements = outline.elements.len(),
        identifiers = outline.identifiers.len(),
        comments = outline.comments.len(),
        "outlined source"
    );

    Ok(outline)
}

fn location_of(
    source: &Source,
    node: Node<'_>,
) -> Option<Location>
{
    Location::new(
        source
            .id()
            .clone(),
        node.start_byte(),
        node.end_byte(),
    )
    .ok()
}

fn push_token(
    out: &mut Vec<Token>,
    source: &Source,
    node: Node<'_>,
)
{
    if let Some(text) = Utf8Utils::slice_node_text(source.content(), node)
        && let Some(location) = location_of(source, node)
    {
        out.push(Token { text: text.to_string(), location });
    }
}
