//! Cosine similarity and top-N ranking over idea embeddings.
//!
//! The corpus is small (one vector per idea), so ranking is a linear scan
//! that scores every candidate and keeps the best `limit`.

use std::cmp::Ordering;

use crate::error::CoreError;

/// Cosine similarity between two vectors of equal length.
///
/// Returns a value in `[-1.0, 1.0]`, or `0.0` when either vector has zero
/// norm. Accumulates in `f64` so self-similarity lands on `1.0` within
/// floating point tolerance even for long vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, CoreError> {
    if a.len() != b.len() {
        return Err(CoreError::Validation(format!(
            "Vectors must have the same length, got {} and {}",
            a.len(),
            b.len()
        )));
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// A candidate paired with its similarity to the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub similarity: f64,
}

/// Outcome of [`rank_by_similarity`].
#[derive(Debug, Clone)]
pub struct Ranking<T> {
    /// Best candidates, similarity non-increasing, at most `limit` long.
    pub ranked: Vec<Ranked<T>>,
    /// Candidates dropped because their vector could not be compared
    /// (dimension mismatch or non-finite score).
    pub skipped: usize,
}

/// Score every candidate against `target`, sort descending and keep the
/// top `limit`.
///
/// The sort is stable, so candidates with equal similarity keep their
/// input order.
pub fn rank_by_similarity<T, V>(
    target: &[f32],
    candidates: impl IntoIterator<Item = (T, V)>,
    limit: usize,
) -> Ranking<T>
where
    V: AsRef<[f32]>,
{
    let mut skipped = 0;
    let mut ranked: Vec<Ranked<T>> = candidates
        .into_iter()
        .filter_map(|(item, vector)| match cosine_similarity(target, vector.as_ref()) {
            Ok(similarity) if similarity.is_finite() => Some(Ranked { item, similarity }),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);

    Ranking { ranked, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn self_similarity_is_one() {
        for v in [
            vec![1.0f32, 2.0, 3.0],
            vec![-0.5, 0.25, 8.0, 1e-3],
            vec![1e6, -1e6],
        ] {
            let sim = cosine_similarity(&v, &v).unwrap();
            assert!((sim - 1.0).abs() < EPS, "got {sim} for {v:?}");
        }
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = [0.3f32, -1.2, 4.0];
        let b = [2.0f32, 0.1, -0.7];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn zero_vector_scores_zero() {
        let zero = [0.0f32; 3];
        let v = [1.0f32, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &v).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&v, &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn orthogonal_and_opposite_vectors() {
        let x = [1.0f32, 0.0];
        let y = [0.0f32, 1.0];
        let neg_x = [-1.0f32, 0.0];
        assert!(cosine_similarity(&x, &y).unwrap().abs() < EPS);
        assert!((cosine_similarity(&x, &neg_x).unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn ranking_sorts_descending_and_truncates() {
        let target = [1.0f32, 0.0, 0.0];
        let candidates = vec![
            (1, vec![0.0f32, 1.0, 0.0]),
            (2, vec![0.9f32, 0.1, 0.0]),
            (3, vec![-1.0f32, 0.0, 0.0]),
            (4, vec![0.5f32, 0.5, 0.0]),
        ];

        let ranking = rank_by_similarity(&target, candidates, 3);
        let ids: Vec<i32> = ranking.ranked.iter().map(|r| r.item).collect();
        assert_eq!(ids, vec![2, 4, 1]);
        assert_eq!(ranking.skipped, 0);
        assert!(ranking
            .ranked
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn ranking_skips_mismatched_dimensions() {
        let target = [1.0f32, 0.0];
        let candidates = vec![("ok", vec![1.0f32, 0.0]), ("bad", vec![1.0f32, 0.0, 0.0])];

        let ranking = rank_by_similarity(&target, candidates, 10);
        assert_eq!(ranking.ranked.len(), 1);
        assert_eq!(ranking.ranked[0].item, "ok");
        assert_eq!(ranking.skipped, 1);
    }

    #[test]
    fn ranking_keeps_input_order_on_ties() {
        let target = [1.0f32, 1.0];
        let candidates = vec![(10, [2.0f32, 2.0]), (11, [2.0f32, 2.0]), (12, [2.0f32, 2.0])];

        let ranking = rank_by_similarity(&target, candidates, 10);
        let ids: Vec<i32> = ranking.ranked.iter().map(|r| r.item).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn ranking_empty_corpus() {
        let ranking = rank_by_similarity::<i64, Vec<f32>>(&[1.0], Vec::new(), 5);
        assert!(ranking.ranked.is_empty());
    }
}
