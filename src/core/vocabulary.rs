//! Filepath: src/core/vocabulary.rs
//! Word-level normalization shared by concept extraction and
//! relevant-term handling: identifier splitting, abbreviation
//! expansion, stop-word and keyword filtering.

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;

/// English function words, language keywords, and placeholder names
const STOP_WORDS: &[&str] = &[
    // English
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either", "else",
    "etc", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "may", "me", "might", "more", "most", "must", "my", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "yet", "you", "your",
    // Java
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "double", "enum", "extends", "final", "finally", "float", "goto",
    "implements", "import", "instanceof", "int", "interface", "long", "native", "new", "null",
    "package", "private", "protected", "public", "return", "short", "static", "strictfp", "super",
    "switch", "synchronized", "throw", "throws", "transient", "try", "void", "volatile", "true",
    "false", "var", "record", "java", "javax", "override", "deprecated",
    // Rust
    "as", "async", "await", "crate", "dyn", "extern", "fn", "impl", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "self", "struct", "trait", "type", "unsafe", "use", "where",
    "usize", "isize", "u8", "u16", "u32", "u64", "i32", "i64", "f32", "f64", "str", "bool", "vec",
    "option", "some", "none", "result", "ok",
    // Python
    "def", "del", "elif", "except", "global", "lambda", "nonlocal", "pass", "raise", "yield",
    "cls", "init", "none", "print",
    // Accessor noise and placeholders
    "get", "set", "foo", "bar", "baz", "qux", "quux", "todo", "fixme", "xxx",
];

/// Common programmer abbreviations and their expansions
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("arg", "argument"),
    ("args", "arguments"),
    ("attr", "attribute"),
    ("buf", "buffer"),
    ("calc", "calculate"),
    ("cfg", "configuration"),
    ("cmd", "command"),
    ("cnt", "count"),
    ("conf", "configuration"),
    ("config", "configuration"),
    ("conn", "connection"),
    ("ctx", "context"),
    ("db", "database"),
    ("desc", "description"),
    ("dest", "destination"),
    ("dir", "directory"),
    ("doc", "document"),
    ("dst", "destination"),
    ("env", "environment"),
    ("err", "error"),
    ("exc", "exception"),
    ("fmt", "format"),
    ("func", "function"),
    ("idx", "index"),
    ("img", "image"),
    ("len", "length"),
    ("lib", "library"),
    ("max", "maximum"),
    ("mem", "memory"),
    ("min", "minimum"),
    ("msg", "message"),
    ("num", "number"),
    ("obj", "object"),
    ("param", "parameter"),
    ("params", "parameters"),
    ("pkg", "package"),
    ("pos", "position"),
    ("prev", "previous"),
    ("ptr", "pointer"),
    ("repo", "repository"),
    ("req", "request"),
    ("res", "response"),
    ("resp", "response"),
    ("sock", "socket"),
    ("spec", "specification"),
    ("src", "source"),
    ("stmt", "statement"),
    ("tmp", "temporary"),
    ("temp", "temporary"),
    ("txt", "text"),
    ("usr", "user"),
    ("util", "utility"),
    ("utils", "utilities"),
    ("val", "value"),
];

static STOP_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

static ABBREV_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ABBREVIATIONS.iter().copied().collect());

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_$]*").expect("static word pattern"));

/// Is `word` (already lowercase) excluded by policy?
pub fn is_stop_word(word: &str) -> bool
{
    STOP_SET.contains(word)
}

/// Expand a known abbreviation, else return the word unchanged
pub fn expand(word: &str) -> &str
{
    ABBREV_MAP
        .get(word)
        .copied()
        .unwrap_or(word)
}

/// Split an identifier on camelCase, PascalCase, acronym, digit,
/// and underscore boundaries. Returned parts keep their case.
///
/// `createTxtFile` -> [create, Txt, File];
/// `HTTPServer2go` -> [HTTP, Server, go].
pub fn split_identifier(ident: &str) -> Vec<&str>
{
    let chars: Vec<(usize, char)> = ident
        .char_indices()
        .collect();
    let mut parts = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(pos, ch)) in chars
        .iter()
        .enumerate()
    {
        // Separators end the current part
        if !ch.is_alphabetic()
        {
            if let Some(s) = start.take()
            {
                parts.push(&ident[s..pos]);
            }
            continue;
        }

        if let Some(s) = start
        {
            let prev = chars[i - 1].1;
            let next = chars
                .get(i + 1)
                .map(|&(_, c)| c);

            // lower -> Upper, or the last capital of an acronym before a lowercase run
            let boundary = (prev.is_lowercase() && ch.is_uppercase())
                || (prev.is_uppercase()
                    && ch.is_uppercase()
                    && next.is_some_and(|c| c.is_lowercase()));

            if boundary
            {
                parts.push(&ident[s..pos]);
                start = Some(pos);
            }
        }
        else
        {
            start = Some(pos);
        }
    }

    if let Some(s) = start
    {
        parts.push(&ident[s..]);
    }

    parts
}

/// Identifier-like words of free text (comments, docstrings)
pub fn words_of(text: &str) -> impl Iterator<Item = &str>
{
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
}

/// Normalizes raw words into concept terms
#[derive(Debug, Clone, Copy)]
pub struct Normalizer
{
    min_len: usize,
}

impl Normalizer
{
    pub fn new(min_len: usize) -> Self
    {
        Self { min_len }
    }

    /// Lowercase, expand, and filter one word part
    pub fn term(
        &self,
        part: &str,
    ) -> Option<String>
    {
        let lower = part.to_lowercase();
        let word = expand(&lower);

        if word
            .chars()
            .count()
            < self.min_len
            || is_stop_word(word)
        {
            return None;
        }

        Some(word.to_string())
    }

    /// All surviving terms of one identifier
    pub fn terms_of_identifier(
        &self,
        ident: &str,
    ) -> Vec<String>
    {
        split_identifier(ident)
            .into_iter()
            .filter_map(|p| self.term(p))
            .collect()
    }

    /// All surviving terms of free text
    pub fn terms_of_text(
        &self,
        text: &str,
    ) -> Vec<String>
    {
        words_of(text)
            .flat_map(|w| self.terms_of_identifier(w))
            .collect()
    }
}
