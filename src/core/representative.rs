//! Filepath: src/core/representative.rs
//! Diversity-aware pick of a small subset that stands in for a corpus.
//!
//! Greedy marginal gain over term coverage: start from the most
//! typical source, then keep taking the source that touches the most
//! still-uncovered corpus weight. Ties, including the case where
//! nothing new can be covered, go to the better typicality rank.

use crate::core::{
    error::{CueResult, check_k},
    typicality::Ranking,
};

/// Greedy coverage selector over a typicality ranking
#[derive(Debug, Clone, Copy, Default)]
pub struct RepresentativeSelector;

impl RepresentativeSelector
{
    /// Pick `k` distinct corpus indices, in selection order
    pub fn select(
        &self,
        ranking: &Ranking,
        k: usize,
    ) -> CueResult<Vec<usize>>
    {
        let space = ranking.space();
        check_k(k, space.len())?;

        let importance = space.importance();
        let mut covered = vec![false; space.dimensions()];
        let mut chosen: Vec<usize> = Vec::with_capacity(k);
        let mut remaining: Vec<usize> = ranking
            .order()
            .to_vec();

        // The most typical source always leads
        let lead = remaining.remove(0);
        Self::cover(space.point(lead), &mut covered);
        chosen.push(lead);

        while chosen.len() < k
        {
            // `remaining` is in rank order, so the first maximum wins ties
            let mut best: Option<(usize, f64)> = None;
            for (pos, &i) in remaining
                .iter()
                .enumerate()
            {
                let gain = Self::gain(space.point(i), &covered, &importance);
                if best.is_none_or(|(_, g)| gain > g)
                {
                    best = Some((pos, gain));
                }
            }

            let Some((pos, _)) = best
            else
            {
                break;
            };

            let pick = remaining.remove(pos);
            Self::cover(space.point(pick), &mut covered);
            chosen.push(pick);
        }

        Ok(chosen)
    }

    fn cover(
        point: &[f64],
        covered: &mut [bool],
    )
    {
        for (c, w) in covered
            .iter_mut()
            .zip(point)
        {
            if *w > 0.0
            {
                *c = true;
            }
        }
    }

    /// Corpus weight of the dimensions `point` would newly cover
    fn gain(
        point: &[f64],
        covered: &[bool],
        importance: &[f64],
    ) -> f64
    {
        point
            .iter()
            .zip(covered)
            .zip(importance)
            .filter(|((w, c), _)| **w > 0.0 && !**c)
            .map(|(_, imp)| *imp)
            .sum()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{
        core::{concepts::TermVector, error::CueError, typicality::TypicalityRanker},
        infra::config::AnalysisConfig,
    };

    fn vector(terms: &[(&str, f64)]) -> TermVector
    {
        let mut v = TermVector::new();
        for (t, w) in terms
        {
            v.add(*t, *w);
        }
        v
    }

    fn ranking(vs: &[TermVector]) -> Ranking
    {
        TypicalityRanker::new(&AnalysisConfig::default())
            .rank::<&str>(vs, &[], 0.3)
            .unwrap()
    }

    fn corpus() -> Vec<TermVector>
    {
        vec![
            vector(&[("file", 2.0), ("read", 1.0)]),
            vector(&[("file", 2.0), ("read", 1.0)]),
            vector(&[("socket", 3.0), ("bind", 1.0)]),
            vector(&[("file", 2.0), ("read", 1.0), ("close", 0.5)]),
            vector(&[("matrix", 1.0)]),
        ]
    }

    #[test]
    fn avoids_near_duplicates()
    {
        let r = ranking(&corpus());
        let picked = RepresentativeSelector
            .select(&r, 3)
            .unwrap();

        // most typical first, even though source 3 touches more weight
        assert_eq!(picked[0], 0);
        // then the outliers by uncovered weight, never the other file readers
        assert_eq!(picked[1], 2);
        assert_eq!(picked[2], 4);
    }

    #[test]
    fn returns_exactly_k_distinct()
    {
        let r = ranking(&corpus());
        let picked = RepresentativeSelector
            .select(&r, 5)
            .unwrap();

        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn k_out_of_range()
    {
        let r = ranking(&corpus());
        assert!(matches!(RepresentativeSelector.select(&r, 0), Err(CueError::InvalidArgument(_))));
        assert!(matches!(RepresentativeSelector.select(&r, 6), Err(CueError::InvalidArgument(_))));
    }
}
