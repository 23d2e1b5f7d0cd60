//! Filepath: src/core/concepts.rs
//! Concept extraction: turns a source (optionally scoped to a region)
//! into a weighted term vector and a ranked concept list.
//!
//! Identifier vocabulary comes from identifiers that name a type or
//! method declared in the same source, either at the declaration or
//! at a use site. Comment words in scope are mined too, at a lower
//! weight, so they reinforce concepts more than they introduce them.

use std::collections::BTreeMap;

use crate::{
    core::{
        outline::SourceOutline,
        region::{Location, Region},
        similarity::TermSimilarity,
        vocabulary::Normalizer,
    },
    infra::config::AnalysisConfig,
};

/// Term -> weight for one source (or a merged batch)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector
{
    weights: BTreeMap<String, f64>,
}

impl TermVector
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Add `weight` to `term`
    pub fn add(
        &mut self,
        term: impl Into<String>,
        weight: f64,
    )
    {
        *self
            .weights
            .entry(term.into())
            .or_insert(0.0) += weight;
    }

    pub fn get(
        &self,
        term: &str,
    ) -> f64
    {
        self.weights
            .get(term)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize
    {
        self.weights
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.weights
            .is_empty()
    }

    /// Terms in lexicographic order with their weights
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)>
    {
        self.weights
            .iter()
            .map(|(t, w)| (t.as_str(), *w))
    }

    /// Sum another vector into this one
    pub fn absorb(
        &mut self,
        other: &TermVector,
    )
    {
        for (t, w) in other.iter()
        {
            self.add(t, w);
        }
    }

    /// Terms sorted by descending weight, ties lexicographic
    pub fn by_weight(&self) -> Vec<(&str, f64)>
    {
        let mut v: Vec<(&str, f64)> = self
            .iter()
            .collect();
        v.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| a.0.cmp(b.0))
        });
        v
    }

    /// Fold near-duplicate terms together. Terms are visited heaviest
    /// first; each joins the first earlier survivor it is similar to.
    /// Survivors are pairwise dissimilar, so merging twice is a no-op.
    pub fn merged(
        &self,
        similarity: &TermSimilarity,
    ) -> TermVector
    {
        let mut survivors: Vec<(String, f64)> = Vec::new();

        for (term, weight) in self.by_weight()
        {
            match survivors
                .iter_mut()
                .find(|(s, _)| similarity.is_similar(s, term))
            {
                Some((_, w)) => *w += weight,
                None => survivors.push((term.to_string(), weight)),
            }
        }

        let mut out = TermVector::new();
        for (t, w) in survivors
        {
            out.add(t, w);
        }
        out
    }

    /// Concepts: terms reaching `min_weight`, heaviest first
    pub fn ranked(
        &self,
        min_weight: f64,
    ) -> Vec<String>
    {
        self.by_weight()
            .into_iter()
            .filter(|(_, w)| *w >= min_weight)
            .map(|(t, _)| t.to_string())
            .collect()
    }
}

/// Builds term vectors from outlines
#[derive(Debug, Clone)]
pub struct ConceptExtractor
{
    normalizer: Normalizer,
    similarity: TermSimilarity,
    comment_weight: f64,
    min_concept_weight: f64,
}

impl ConceptExtractor
{
    pub fn new(settings: &AnalysisConfig) -> Self
    {
        Self {
            normalizer: Normalizer::new(settings.min_term_length),
            similarity: TermSimilarity::new(settings.merge_threshold),
            comment_weight: settings.comment_weight,
            min_concept_weight: settings.min_concept_weight,
        }
    }

    pub fn similarity(&self) -> &TermSimilarity
    {
        &self.similarity
    }

    pub fn normalizer(&self) -> &Normalizer
    {
        &self.normalizer
    }

    /// Merged term vector of everything visible in `scope`
    /// (the whole outline when `scope` is `None`)
    pub fn term_vector(
        &self,
        outline: &SourceOutline,
        scope: Option<&Region>,
    ) -> TermVector
    {
        let visible = |loc: &Location| scope.is_none_or(|r| r.covers(loc));
        let declared = outline.declared_names();
        let mut raw = TermVector::new();

        for tok in outline
            .identifiers
            .iter()
            .filter(|t| declared.contains(t.text.as_str()) && visible(&t.location))
        {
            for term in self
                .normalizer
                .terms_of_identifier(&tok.text)
            {
                raw.add(term, 1.0);
            }
        }

        for tok in outline
            .comments
            .iter()
            .filter(|t| visible(&t.location))
        {
            for term in self
                .normalizer
                .terms_of_text(&tok.text)
            {
                raw.add(term, self.comment_weight);
            }
        }

        raw.merged(&self.similarity)
    }

    /// Ranked concept list of one vector
    pub fn concepts(
        &self,
        vector: &TermVector,
    ) -> Vec<String>
    {
        vector.ranked(self.min_concept_weight)
    }

    /// Sum per-source vectors and re-merge across sources
    pub fn combine<'a, I>(
        &self,
        vectors: I,
    ) -> TermVector
    where
        I: IntoIterator<Item = &'a TermVector>,
    {
        let mut sum = TermVector::new();
        for v in vectors
        {
            sum.absorb(v);
        }
        sum.merged(&self.similarity)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::{
        outline::{ElementKind, ProgramElement, Token},
        source::SourceId,
    };

    fn at(
        start: usize,
        end: usize,
    ) -> Location
    {
        Location::new(SourceId::new("S"), start, end).unwrap()
    }

    fn token(
        text: &str,
        start: usize,
    ) -> Token
    {
        Token { text: text.into(), location: at(start, start + text.len()) }
    }

    fn sample_outline() -> SourceOutline
    {
        SourceOutline {
            elements: vec![
                ProgramElement {
                    name: "readFile".into(),
                    kind: ElementKind::Method,
                    location: at(0, 50),
                },
                ProgramElement {
                    name: "FileCache".into(),
                    kind: ElementKind::Type,
                    location: at(60, 120),
                },
            ],
            identifiers: vec![
                token("readFile", 5),
                token("helper", 20),
                token("FileCache", 30),
                token("FileCache", 65),
            ],
            comments: vec![token("// cache the file quickly", 14)],
        }
    }

    #[test]
    fn only_declared_identifiers_count()
    {
        let ex = ConceptExtractor::new(&AnalysisConfig::default());
        let v = ex.term_vector(&sample_outline(), None);

        assert_eq!(v.get("file"), 3.5);
        assert_eq!(v.get("cache"), 2.5);
        assert_eq!(v.get("read"), 1.0);
        assert_eq!(v.get("helper"), 0.0);
        assert_eq!(v.get("quickly"), 0.5);

        assert_eq!(ex.concepts(&v), vec!["file", "cache", "read"]);
    }

    #[test]
    fn scope_restricts_tokens()
    {
        let ex = ConceptExtractor::new(&AnalysisConfig::default());
        let scope = Region::from_locations([at(0, 50)]).unwrap();
        let v = ex.term_vector(&sample_outline(), Some(&scope));

        // FileCache at 65 falls outside the scope
        assert_eq!(v.get("read"), 1.0);
        assert_eq!(v.get("file"), 2.5);
        assert_eq!(v.get("cache"), 1.5);
    }

    #[test]
    fn merge_folds_variants_into_heavier_term()
    {
        let mut v = TermVector::new();
        v.add("file", 3.0);
        v.add("files", 1.0);
        v.add("code", 2.0);

        let m = v.merged(&TermSimilarity::new(0.8));

        assert_eq!(m.len(), 2);
        assert_eq!(m.get("file"), 4.0);
        assert_eq!(m.get("code"), 2.0);

        // merging again changes nothing
        assert_eq!(m.merged(&TermSimilarity::new(0.8)), m);
    }

    #[test]
    fn ranked_ties_are_lexicographic()
    {
        let mut v = TermVector::new();
        v.add("zeta", 2.0);
        v.add("alpha", 2.0);
        v.add("mid", 5.0);
        v.add("low", 0.5);

        assert_eq!(v.ranked(1.0), vec!["mid", "alpha", "zeta"]);
    }
}
