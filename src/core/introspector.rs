//! Filepath: src/core/introspector.rs
//! Library entry points: concept assignment, typicality and
//! representative queries. Each call is self-contained; nothing is
//! cached between calls.

use rayon::prelude::*;

use crate::{
    core::{
        concepts::{ConceptExtractor, TermVector},
        error::{CueError, CueResult, check_k},
        outline::locator_for,
        region::Region,
        representative::RepresentativeSelector,
        source::{Corpus, Source},
        typicality::{Ranking, TypicalityRanker},
    },
    infra::config::AnalysisConfig,
};

/// Engine facade configured with one set of analysis parameters
#[derive(Debug, Clone)]
pub struct Cue
{
    settings: AnalysisConfig,
    extractor: ConceptExtractor,
    ranker: TypicalityRanker,
}

impl Default for Cue
{
    fn default() -> Self
    {
        Self::build(AnalysisConfig::default())
    }
}

impl Cue
{
    /// Engine with validated settings
    pub fn new(settings: AnalysisConfig) -> CueResult<Self>
    {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    fn build(settings: AnalysisConfig) -> Self
    {
        Self {
            extractor: ConceptExtractor::new(&settings),
            ranker: TypicalityRanker::new(&settings),
            settings,
        }
    }

    pub fn settings(&self) -> &AnalysisConfig
    {
        &self.settings
    }

    /// Concepts of a whole source
    pub fn assigned_concepts(
        &self,
        source: &Source,
    ) -> CueResult<Vec<String>>
    {
        let v = self.term_vector(source, None)?;
        Ok(self
            .extractor
            .concepts(&v))
    }

    /// Concepts of the elements named in `names` (e.g. method names)
    pub fn assigned_concepts_in<S: AsRef<str>>(
        &self,
        source: &Source,
        names: &[S],
    ) -> CueResult<Vec<String>>
    {
        if names.is_empty()
        {
            return Err(CueError::invalid("no element names given"));
        }

        let outline = locator_for(source.lang()).outline(source)?;
        let region = outline.region_for(names)?;

        if region.is_empty()
        {
            return Ok(Vec::new());
        }

        let v = self
            .extractor
            .term_vector(&outline, Some(&region));
        Ok(self
            .extractor
            .concepts(&v))
    }

    /// Concepts inside an explicit region of `source`
    pub fn assigned_concepts_in_region(
        &self,
        source: &Source,
        region: &Region,
    ) -> CueResult<Vec<String>>
    {
        if region.source_id()? != source.id()
        {
            return Err(CueError::invalid(format!(
                "region does not select from {}",
                source.id()
            )));
        }

        let v = self.term_vector(source, Some(region))?;
        Ok(self
            .extractor
            .concepts(&v))
    }

    /// Concepts of a batch: per-source vectors are summed before
    /// ranking, so terms shared by many files rise to the top
    pub fn assigned_concepts_batch(
        &self,
        sources: &[Source],
    ) -> CueResult<Vec<String>>
    {
        let vectors = self.term_vectors(sources)?;
        let merged = self
            .extractor
            .combine(&vectors);
        Ok(self
            .extractor
            .concepts(&merged))
    }

    /// The `k` most typical sources, default bandwidth
    pub fn typicality_query<'c, S: AsRef<str>>(
        &self,
        corpus: &'c Corpus,
        relevant: &[S],
        k: usize,
    ) -> CueResult<Vec<&'c Source>>
    {
        self.typicality_query_with_bandwidth(corpus, relevant, self.settings.bandwidth, k)
    }

    /// The `k` most typical sources for an explicit bandwidth
    pub fn typicality_query_with_bandwidth<'c, S: AsRef<str>>(
        &self,
        corpus: &'c Corpus,
        relevant: &[S],
        bandwidth: f64,
        k: usize,
    ) -> CueResult<Vec<&'c Source>>
    {
        check_k(k, corpus.len())?;
        let ranking = self.rank(corpus, relevant, bandwidth)?;

        Ok(Self::resolve(corpus, ranking.top(k)))
    }

    /// Up to `k` sources that jointly cover the corpus concept space
    pub fn representative_query<'c>(
        &self,
        corpus: &'c Corpus,
        k: usize,
    ) -> CueResult<Vec<&'c Source>>
    {
        check_k(k, corpus.len())?;
        let ranking = self.rank::<&str>(corpus, &[], self.settings.bandwidth)?;
        let picked = RepresentativeSelector.select(&ranking, k)?;

        Ok(Self::resolve(corpus, &picked))
    }

    /// Full ranking with per-source densities
    pub fn rank<S: AsRef<str>>(
        &self,
        corpus: &Corpus,
        relevant: &[S],
        bandwidth: f64,
    ) -> CueResult<Ranking>
    {
        if corpus.is_empty()
        {
            return Err(CueError::invalid("corpus is empty"));
        }

        let vectors = self.term_vectors(corpus.as_slice())?;
        self.ranker
            .rank(&vectors, relevant, bandwidth)
    }

    /// Merged term vector of one source, optionally scoped
    pub fn term_vector(
        &self,
        source: &Source,
        scope: Option<&Region>,
    ) -> CueResult<TermVector>
    {
        let outline = locator_for(source.lang()).outline(source)?;
        Ok(self
            .extractor
            .term_vector(&outline, scope))
    }

    /// Per-source vectors in input order; built in parallel
    fn term_vectors(
        &self,
        sources: &[Source],
    ) -> CueResult<Vec<TermVector>>
    {
        sources
            .par_iter()
            .map(|s| self.term_vector(s, None))
            .collect()
    }

    fn resolve<'c>(
        corpus: &'c Corpus,
        indices: &[usize],
    ) -> Vec<&'c Source>
    {
        indices
            .iter()
            .filter_map(|&i| corpus.get(i))
            .collect()
    }
}
