//! Filepath: src/core/similarity.rs
//! Normalized string similarity used to fold spelling variants
//! ("txt" / "text", "file" / "files") into one concept.
//!
//! The score is built on the insert/delete edit distance, which is
//! `|a| + |b| - 2 * lcs(a, b)`. LCS length does not depend on
//! argument order, so both functions are exactly commutative.

/// Similarity metric plus the merge threshold that goes with it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermSimilarity
{
    threshold: f64,
}

impl TermSimilarity
{
    pub fn new(threshold: f64) -> Self
    {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64
    {
        self.threshold
    }

    /// Should `a` and `b` be treated as the same concept? The score must
    /// exceed the threshold; identical terms always match
    pub fn is_similar(
        &self,
        a: &str,
        b: &str,
    ) -> bool
    {
        a == b || similarity_score(a, b) > self.threshold
    }
}

/// Similarity in [0, 1]; 1 means identical
pub fn similarity_score(
    a: &str,
    b: &str,
) -> f64
{
    1.0 - normalize_distance(a, b)
}

/// Insert/delete edit distance divided by the combined length, in [0, 1]
pub fn normalize_distance(
    a: &str,
    b: &str,
) -> f64
{
    let a: Vec<char> = a
        .chars()
        .collect();
    let b: Vec<char> = b
        .chars()
        .collect();

    let total = a.len() + b.len();
    if total == 0
    {
        return 0.0;
    }

    let indel = total - 2 * lcs_len(&a, &b);
    indel as f64 / total as f64
}

/// Longest common subsequence length, two-row dynamic programming
fn lcs_len(
    a: &[char],
    b: &[char],
) -> usize
{
    if a.is_empty() || b.is_empty()
    {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for ca in a
    {
        for (j, cb) in b
            .iter()
            .enumerate()
        {
            cur[j + 1] = if ca == cb
            {
                prev[j] + 1
            }
            else
            {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn identical_and_empty()
    {
        assert_eq!(similarity_score("file", "file"), 1.0);
        assert_eq!(similarity_score("", ""), 1.0);
        assert_eq!(normalize_distance("", ""), 0.0);
        assert_eq!(similarity_score("abc", ""), 0.0);
    }

    #[test]
    fn abbreviation_is_close()
    {
        // lcs("text", "txt") = 3, indel = 1, total = 7
        let s = similarity_score("text", "txt");
        assert!((s - 6.0 / 7.0).abs() < 1e-12);
        assert!(TermSimilarity::new(0.8).is_similar("text", "txt"));
    }

    #[test]
    fn unrelated_words_are_far()
    {
        let sim = TermSimilarity::new(0.8);
        assert!(!sim.is_similar("code", "create"));
        assert!(!sim.is_similar("text", "exit"));
        assert!(!sim.is_similar("code", "core"));
        assert!(sim.is_similar("file", "files"));
    }

    #[test]
    fn threshold_is_exclusive()
    {
        // lcs("store", "stare") = 4, indel = 2, total = 10
        assert_eq!(similarity_score("store", "stare"), 0.8);
        assert!(!TermSimilarity::new(0.8).is_similar("store", "stare"));
        assert!(TermSimilarity::new(0.79).is_similar("store", "stare"));
        assert!(TermSimilarity::new(1.0).is_similar("store", "store"));
    }

    #[test]
    fn commutative_on_samples()
    {
        for (a, b) in [("text", "txt"), ("process", "processor"), ("abc", "")]
        {
            assert_eq!(similarity_score(a, b), similarity_score(b, a));
            assert_eq!(normalize_distance(a, b), normalize_distance(b, a));
        }
    }

    #[test]
    fn lcs_basics()
    {
        let a: Vec<char> = "abcbdab".chars().collect();
        let b: Vec<char> = "bdcaba".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
    }
}
