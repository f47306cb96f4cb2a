//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;

use crate::error::{EmbeddingError, Result};

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors, or that either vector has zero norm
/// - -1.0 means opposite vectors
///
/// Vectors of different length are rejected rather than truncated.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    // f32 squares overflow above ~1e19 and underflow below ~1e-19.
    let mut dot_product = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot_product += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot_product / (norm_a.sqrt() * norm_b.sqrt());
    Ok(similarity.clamp(-1.0, 1.0) as f32)
}

/// Indices, in input order, whose similarity is at least `threshold`.
pub fn select_above_threshold(threshold: f32, similarities: &[f32]) -> Vec<usize> {
    similarities
        .iter()
        .enumerate()
        .filter(|(_, score)| **score >= threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Position and score of the highest similarity.
///
/// Ties keep the earliest position. NaN scores never win.
pub fn most_similar(similarities: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in similarities.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score || score.is_nan() => {}
            None if score.is_nan() => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Positions ordered by descending similarity.
///
/// Equal scores keep input order; NaN scores are left out.
pub fn rank_descending(similarities: &[f32]) -> Vec<usize> {
    let mut ranked: Vec<(usize, OrderedFloat<f32>)> = similarities
        .iter()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .map(|(i, &score)| (i, OrderedFloat(score)))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![0.3, -1.2, 4.5, 0.01];
        let sim = cosine_similarity(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let v = vec![0.5, 2.0, -3.0];
        let zero = vec![0.0; 3];
        assert_eq!(cosine_similarity(&v, &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &v).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_empty_vectors() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let pairs = [
            (vec![1.0, 2.0, 3.0], vec![-0.5, 0.25, 8.0]),
            (vec![0.1, 0.0], vec![0.7, 0.7]),
            (vec![-3.0, 1.5, 0.0, 2.0], vec![4.0, 4.0, -1.0, 0.5]),
        ];
        for (a, b) in pairs {
            let ab = cosine_similarity(&a, &b).unwrap();
            let ba = cosine_similarity(&b, &a).unwrap();
            assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
        }
    }

    #[test]
    fn test_cosine_similarity_extreme_magnitudes() {
        let large = vec![1e20_f32, 1e20];
        let sim = cosine_similarity(&large, &large).unwrap();
        assert!((sim - 1.0).abs() < 1e-6, "{sim}");

        let tiny = vec![1e-25_f32, 1e-25];
        let sim = cosine_similarity(&tiny, &tiny).unwrap();
        assert!((sim - 1.0).abs() < 1e-6, "{sim}");

        let huge = vec![f32::MAX, -f32::MAX];
        let sim = cosine_similarity(&huge, &[-f32::MAX, f32::MAX]).unwrap();
        assert!((sim - (-1.0)).abs() < 1e-6, "{sim}");
    }

    #[test]
    fn test_cosine_similarity_stays_in_range() {
        let pairs = [
            (vec![0.1_f32, 0.2, 0.3], vec![0.1_f32, 0.2, 0.3]),
            (vec![1e30, 1e-30, 3.0], vec![1e30, 1e-30, 3.0]),
            (vec![0.333_333_34, 0.666_666_7], vec![-0.333_333_34, -0.666_666_7]),
        ];
        for (a, b) in pairs {
            let sim = cosine_similarity(&a, &b).unwrap();
            assert!((-1.0..=1.0).contains(&sim), "{sim}");
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(matches!(
            cosine_similarity(&a, &b),
            Err(EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_select_above_threshold() {
        let similarities = [0.9, 0.5, 0.81, 0.79];
        assert_eq!(select_above_threshold(0.8, &similarities), vec![0, 2]);
    }

    #[test]
    fn test_select_above_threshold_is_inclusive() {
        let similarities = [0.8, 0.7999, -1.0];
        assert_eq!(select_above_threshold(0.8, &similarities), vec![0]);
        assert_eq!(select_above_threshold(-1.0, &similarities), vec![0, 1, 2]);
        assert!(select_above_threshold(0.5, &[]).is_empty());
    }

    #[test]
    fn test_most_similar_running_max() {
        assert_eq!(most_similar(&[0.2, 0.9, 0.4, 0.95, 0.1]), Some((3, 0.95)));
        assert_eq!(most_similar(&[-0.5, -0.2, -0.9]), Some((1, -0.2)));
        assert_eq!(most_similar(&[0.7, 0.7]), Some((0, 0.7)));
        assert_eq!(most_similar(&[f32::NAN, 0.1]), Some((1, 0.1)));
        assert_eq!(most_similar(&[]), None);
    }

    #[test]
    fn test_rank_descending() {
        assert_eq!(rank_descending(&[0.2, 0.9, 0.4, 0.9]), vec![1, 3, 2, 0]);
        assert_eq!(rank_descending(&[f32::NAN, -0.3]), vec![1]);
        assert!(rank_descending(&[]).is_empty());
    }
}
