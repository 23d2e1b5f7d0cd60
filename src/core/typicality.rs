//! Filepath: src/core/typicality.rs
//! Typicality ranking with a kernel density estimate over term vectors.
//!
//! Every source becomes a point in a shared term space. The density at
//! a source is the mean kernel value of its scaled distance to every
//! corpus member (itself included):
//!
//!   density(s) = 1/N * sum_t K(distance(s, t) / h)
//!
//! Higher density means more typical. Scores only compare within one
//! ranking. Ties keep corpus order.

use std::collections::HashMap;

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        concepts::TermVector,
        error::{CueError, CueResult},
        similarity::TermSimilarity,
        vocabulary::Normalizer,
    },
    infra::config::AnalysisConfig,
};

/// Smoothing kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Kernel
{
    /// exp(-u^2 / 2) / sqrt(2 pi)
    #[default]
    Gaussian,

    /// 3/4 (1 - u^2) on |u| <= 1, zero elsewhere
    Epanechnikov,
}

impl Kernel
{
    pub fn eval(
        self,
        u: f64,
    ) -> f64
    {
        match self
        {
            Self::Gaussian => (-0.5 * u * u).exp() / (2.0 * std::f64::consts::PI).sqrt(),
            Self::Epanechnikov =>
            {
                if u.abs() <= 1.0
                {
                    0.75 * (1.0 - u * u)
                }
                else
                {
                    0.0
                }
            }
        }
    }
}

/// Distance between two term-space points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Distance
{
    /// 1 - cosine similarity, in [0, 1] for non-negative weights
    #[default]
    Cosine,

    /// Euclidean distance between unit-normalized points, in [0, sqrt 2]
    Euclidean,
}

impl Distance
{
    pub fn between(
        self,
        a: &[f64],
        b: &[f64],
    ) -> f64
    {
        let na = norm(a);
        let nb = norm(b);

        // Empty sources are alike and unlike everything else
        match (na == 0.0, nb == 0.0)
        {
            (true, true) => return 0.0,
            (true, false) | (false, true) => return 1.0,
            _ =>
            {}
        }

        match self
        {
            Self::Cosine =>
            {
                let dot: f64 = a
                    .iter()
                    .zip(b)
                    .map(|(x, y)| x * y)
                    .sum();
                (1.0 - dot / (na * nb)).max(0.0)
            }
            Self::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| {
                    let d = x / na - y / nb;
                    d * d
                })
                .sum::<f64>()
                .sqrt(),
        }
    }
}

fn norm(v: &[f64]) -> f64
{
    v.iter()
        .map(|x| x * x)
        .sum::<f64>()
        .sqrt()
}

/// Shared dimensions for a corpus: spelling variants across sources
/// collapse into one canonical term per dimension.
#[derive(Debug, Clone)]
pub struct TermSpace
{
    /// Canonical term -> dimension index (insertion order is dimension order)
    dims: IndexMap<String, usize>,

    /// One dense point per source, corpus order
    points: Vec<Vec<f64>>,
}

impl TermSpace
{
    /// Embed `vectors`, boosting dimensions that match `relevant`
    pub fn build(
        vectors: &[TermVector],
        similarity: &TermSimilarity,
        relevant: &[String],
        boost: f64,
    ) -> Self
    {
        // Corpus totals decide which spelling is canonical
        let mut total = TermVector::new();
        for v in vectors
        {
            total.absorb(v);
        }

        let mut dims: IndexMap<String, usize> = IndexMap::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();

        for (term, _) in total.by_weight()
        {
            let dim = match dims
                .keys()
                .position(|c| similarity.is_similar(c, term))
            {
                Some(d) => d,
                None =>
                {
                    let d = dims.len();
                    dims.insert(term.to_string(), d);
                    d
                }
            };
            lookup.insert(term.to_string(), dim);
        }

        let mut points: Vec<Vec<f64>> = vectors
            .iter()
            .map(|v| {
                let mut p = vec![0.0; dims.len()];
                for (term, w) in v.iter()
                {
                    if let Some(&d) = lookup.get(term)
                    {
                        p[d] += w;
                    }
                }
                p
            })
            .collect();

        // Up-weight relevant dimensions before density estimation
        let boosted: Vec<usize> = dims
            .iter()
            .filter(|(c, _)| {
                relevant
                    .iter()
                    .any(|r| similarity.is_similar(c, r))
            })
            .map(|(_, &d)| d)
            .collect();

        for p in &mut points
        {
            for &d in &boosted
            {
                p[d] *= boost;
            }
        }

        Self { dims, points }
    }

    pub fn dimensions(&self) -> usize
    {
        self.dims
            .len()
    }

    /// Canonical term of dimension `d`
    pub fn term(
        &self,
        d: usize,
    ) -> Option<&str>
    {
        self.dims
            .get_index(d)
            .map(|(t, _)| t.as_str())
    }

    /// Dimension of a canonical term
    pub fn dimension_of(
        &self,
        term: &str,
    ) -> Option<usize>
    {
        self.dims
            .get(term)
            .copied()
    }

    pub fn point(
        &self,
        i: usize,
    ) -> &[f64]
    {
        &self.points[i]
    }

    pub fn len(&self) -> usize
    {
        self.points
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.points
            .is_empty()
    }

    /// Corpus-wide weight of every dimension
    pub fn importance(&self) -> Vec<f64>
    {
        let mut out = vec![0.0; self.dimensions()];
        for p in &self.points
        {
            for (acc, w) in out
                .iter_mut()
                .zip(p)
            {
                *acc += w;
            }
        }
        out
    }
}

/// Result of one typicality query
#[derive(Debug, Clone)]
pub struct Ranking
{
    scores: Vec<f64>,
    order: Vec<usize>,
    space: TermSpace,
}

impl Ranking
{
    /// Density per source, corpus order
    pub fn scores(&self) -> &[f64]
    {
        &self.scores
    }

    /// Corpus indices, most typical first
    pub fn order(&self) -> &[usize]
    {
        &self.order
    }

    /// The `k` most typical corpus indices
    pub fn top(
        &self,
        k: usize,
    ) -> &[usize]
    {
        &self.order[..k.min(self.order.len())]
    }

    /// Position of corpus index `i` in the ranking (0 = most typical)
    pub fn rank_of(
        &self,
        i: usize,
    ) -> Option<usize>
    {
        self.order
            .iter()
            .position(|&x| x == i)
    }

    pub fn space(&self) -> &TermSpace
    {
        &self.space
    }
}

/// Kernel density ranker
#[derive(Debug, Clone)]
pub struct TypicalityRanker
{
    kernel: Kernel,
    distance: Distance,
    relevance_boost: f64,
    similarity: TermSimilarity,
    normalizer: Normalizer,
}

impl TypicalityRanker
{
    pub fn new(settings: &AnalysisConfig) -> Self
    {
        Self {
            kernel: settings.kernel,
            distance: settings.distance,
            relevance_boost: settings.relevance_boost,
            similarity: TermSimilarity::new(settings.merge_threshold),
            normalizer: Normalizer::new(settings.min_term_length),
        }
    }

    /// Rank per-source vectors (corpus order) by density
    pub fn rank<S: AsRef<str>>(
        &self,
        vectors: &[TermVector],
        relevant: &[S],
        bandwidth: f64,
    ) -> CueResult<Ranking>
    {
        if vectors.is_empty()
        {
            return Err(CueError::invalid("corpus is empty"));
        }

        if !(bandwidth.is_finite() && bandwidth > 0.0)
        {
            return Err(CueError::invalid(format!(
                "bandwidth must be a positive number, got {bandwidth}"
            )));
        }

        // Relevant terms go through the same normalization as extracted words
        let relevant: Vec<String> = relevant
            .iter()
            .flat_map(|r| {
                self.normalizer
                    .terms_of_identifier(r.as_ref())
            })
            .collect();

        let space = TermSpace::build(vectors, &self.similarity, &relevant, self.relevance_boost);
        let scores = self.densities(&space, bandwidth);

        // Stable sort: equal densities keep corpus order
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        Ok(Ranking { scores, order, space })
    }

    fn densities(
        &self,
        space: &TermSpace,
        bandwidth: f64,
    ) -> Vec<f64>
    {
        let n = space.len();

        // Every row sums over j = 0..n in the same order
        let raw: Vec<f64> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let d = self
                            .distance
                            .between(space.point(i), space.point(j));
                        self.kernel
                            .eval(d / bandwidth)
                    })
                    .sum::<f64>()
                    / n as f64
            })
            .collect();

        snap_ties(raw)
    }
}

/// Significant digits two densities must share to count as a tie
const TIE_DIGITS: f64 = 1e12;

/// Round densities relative to the largest one so values that differ
/// only by summation roundoff become bitwise equal and keep corpus order
fn snap_ties(scores: Vec<f64>) -> Vec<f64>
{
    let max = scores
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    if max <= 0.0
    {
        return scores;
    }

    scores
        .into_iter()
        .map(|s| (s / max * TIE_DIGITS).round() / TIE_DIGITS * max)
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn vector(terms: &[(&str, f64)]) -> TermVector
    {
        let mut v = TermVector::new();
        for (t, w) in terms
        {
            v.add(*t, *w);
        }
        v
    }

    #[test]
    fn kernels_are_bounded_and_decreasing()
    {
        for k in [Kernel::Gaussian, Kernel::Epanechnikov]
        {
            assert!(k.eval(0.0) > k.eval(0.5));
            assert!(k.eval(0.5) >= k.eval(2.0));
            assert_eq!(k.eval(0.7), k.eval(-0.7));
        }
        assert_eq!(Kernel::Epanechnikov.eval(1.5), 0.0);
    }

    #[test]
    fn distances_on_simple_points()
    {
        let a = [1.0, 0.0];
        let b = [0.0, 2.0];
        let c = [3.0, 0.0];

        assert!((Distance::Cosine.between(&a, &b) - 1.0).abs() < 1e-12);
        assert!(Distance::Cosine.between(&a, &c).abs() < 1e-12);
        assert!((Distance::Euclidean.between(&a, &b) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(Distance::Cosine.between(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(Distance::Euclidean.between(&[0.0, 0.0], &a), 1.0);
    }

    #[test]
    fn term_space_merges_variants_across_sources()
    {
        let vs = vec![vector(&[("file", 2.0)]), vector(&[("files", 1.0), ("socket", 1.0)])];
        let space = TermSpace::build(&vs, &TermSimilarity::new(0.8), &[], 1.0);

        assert_eq!(space.dimensions(), 2);
        let d = space
            .dimension_of("file")
            .unwrap();
        assert_eq!(space.point(0)[d], 2.0);
        assert_eq!(space.point(1)[d], 1.0);
        assert_eq!(space.importance()[d], 3.0);
    }

    #[test]
    fn relevant_terms_are_boosted()
    {
        let vs = vec![vector(&[("file", 1.0), ("socket", 1.0)])];
        let space = TermSpace::build(
            &vs,
            &TermSimilarity::new(0.8),
            &["socket".to_string()],
            3.0,
        );
        let d = space
            .dimension_of("socket")
            .unwrap();
        assert_eq!(space.point(0)[d], 3.0);
    }

    #[test]
    fn cluster_beats_outliers()
    {
        let vs = vec![
            vector(&[("matrix", 2.0), ("invert", 1.0)]),
            vector(&[("file", 2.0), ("read", 1.0)]),
            vector(&[("file", 2.0), ("read", 1.0)]),
            vector(&[("file", 2.0), ("read", 1.0), ("close", 0.5)]),
            vector(&[("socket", 2.0), ("bind", 1.0)]),
        ];
        let ranker = TypicalityRanker::new(&AnalysisConfig::default());

        for h in [0.1, 0.3, 0.5, 1.0]
        {
            let r = ranker
                .rank::<&str>(&vs, &[], h)
                .unwrap();
            let s = r.scores();
            for member in [1, 2, 3]
            {
                assert!(s[member] > s[0], "h={h}");
                assert!(s[member] > s[4], "h={h}");
            }
            // identical members tie; corpus order decides
            assert_eq!(r.order()[0], 1);
            assert_eq!(r.order()[1], 2);
        }
    }

    #[test]
    fn roundoff_neighbours_tie_and_keep_corpus_order()
    {
        let a = 0.122_981_229_290_836_96;
        let b = 0.122_981_229_290_836_99;
        let snapped = snap_ties(vec![0.4, a, b]);

        assert_eq!(snapped[1], snapped[2]);
        assert!(snapped[0] > snapped[1]);
    }

    #[test]
    fn orthogonal_outliers_tie_under_every_setting()
    {
        // Two sources orthogonal to everything: mathematically equal densities
        let vs = vec![
            vector(&[("file", 2.0), ("load", 1.0), ("store", 1.0)]),
            vector(&[("file", 2.0), ("load", 1.0), ("cache", 1.0)]),
            vector(&[("file", 2.0), ("load", 1.0), ("index", 1.0)]),
            vector(&[("matrix", 2.0), ("invert", 1.0)]),
            vector(&[("socket", 3.0), ("bind", 1.0), ("close", 1.0), ("pool", 1.0)]),
        ];

        for distance in [Distance::Cosine, Distance::Euclidean]
        {
            for kernel in [Kernel::Gaussian, Kernel::Epanechnikov]
            {
                let ranker = TypicalityRanker::new(&AnalysisConfig {
                    kernel,
                    distance,
                    ..Default::default()
                });
                for h in [0.2, 0.3, 0.5, 1.0]
                {
                    let r = ranker
                        .rank::<&str>(&vs, &[], h)
                        .unwrap();
                    assert_eq!(r.scores()[3], r.scores()[4], "{distance:?} {kernel:?} h={h}");
                    assert_eq!(&r.order()[3..], &[3, 4], "{distance:?} {kernel:?} h={h}");
                }
            }
        }
    }

    #[test]
    fn rejects_bad_inputs()
    {
        let ranker = TypicalityRanker::new(&AnalysisConfig::default());
        let vs = vec![vector(&[("file", 1.0)])];

        assert!(matches!(ranker.rank::<&str>(&[], &[], 0.3), Err(CueError::InvalidArgument(_))));
        assert!(matches!(ranker.rank::<&str>(&vs, &[], 0.0), Err(CueError::InvalidArgument(_))));
        assert!(matches!(
            ranker.rank::<&str>(&vs, &[], f64::NAN),
            Err(CueError::InvalidArgument(_))
        ));
    }
}
