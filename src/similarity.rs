use tracing::{debug, warn};

use crate::models::SimilarityMatrix;
use crate::vectorize::TfidfVectorizer;

/// Cosine of two equal-length weight vectors; zero vectors score 0.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na * nb)).clamp(0.0, 1.0)
}

/// Pairwise cosine over `rows`. Symmetric with a unit diagonal.
pub fn cosine_matrix(rows: &[Vec<f64>]) -> SimilarityMatrix {
    let n = rows.len();
    let mut m = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        m[i][i] = 1.0;
        for j in (i + 1)..n {
            let s = cosine(&rows[i], &rows[j]);
            m[i][j] = s;
            m[j][i] = s;
        }
    }
    m
}

/// Vectorize `units` with at most `max_features` terms and compare every pair.
///
/// `None` when fewer than two units are given or the vocabulary collapses.
pub fn similarity_matrix<S: AsRef<str>>(units: &[S], max_features: usize) -> Option<SimilarityMatrix> {
    if units.len() < 2 {
        debug!("Similarity skipped - units={} (need at least 2)", units.len());
        return None;
    }
    let Some(terms) = TfidfVectorizer::new(max_features).fit_transform(units) else {
        warn!("Similarity unavailable - empty vocabulary, units={}", units.len());
        return None;
    };
    Some(cosine_matrix(&terms.rows))
}

/// Mean over every entry, diagonal included.
pub fn mean_similarity(m: &SimilarityMatrix) -> f64 {
    let count: usize = m.iter().map(Vec::len).sum();
    if count == 0 {
        return 0.0;
    }
    m.iter().flatten().sum::<f64>() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_orthogonal_and_parallel_vectors() {
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 2.0]), 0.0);
        assert!((cosine(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn matrix_is_square_symmetric_with_unit_diagonal() {
        let docs = [
            "Offshore wind capacity keeps growing along the coast",
            "Coastal wind farms face opposition from fishing fleets",
            "Battery storage prices fell sharply last year",
        ];
        let m = similarity_matrix(&docs, 100).unwrap();
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m[i].len(), 3);
            assert!((m[i][i] - 1.0).abs() < 1e-9);
            for j in 0..3 {
                assert!((m[i][j] - m[j][i]).abs() < 1e-12);
                assert!((0.0..=1.0).contains(&m[i][j]));
            }
        }
        assert!(m[0][1] > 0.0);
        assert_eq!(m[0][2], 0.0);
    }

    #[test]
    fn fewer_than_two_units_has_no_matrix() {
        assert!(similarity_matrix(&["a single lonely document here"], 100).is_none());
        assert!(similarity_matrix::<&str>(&[], 100).is_none());
    }

    #[test]
    fn stop_word_only_units_have_no_matrix() {
        assert!(similarity_matrix(&["the and of", "it is"], 100).is_none());
    }

    #[test]
    fn mean_includes_diagonal() {
        let m = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!((mean_similarity(&m) - 0.5).abs() < 1e-12);
        assert_eq!(mean_similarity(&Vec::new()), 0.0);
    }
}
