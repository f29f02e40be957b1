//! Similarity Engine — per-batch TF-IDF space and cosine similarity.
//!
//! The space is fitted jointly over the reference and every candidate of a
//! single call, so IDF weights (and therefore scores) are batch-relative:
//! the same resume can score differently next to different peers.
//!
//! Weighting:
//! - terms are whitespace tokens of at least two characters
//! - TF = raw term count
//! - IDF = ln((1 + n) / (1 + df)) + 1 (smoothed, never zero)
//! - each document vector is L2-normalized

use std::collections::HashMap;

use tracing::debug;

use crate::screening::normalizer::NormalizedText;

/// Sparse document vector: (term index, weight), sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `u·v / (‖u‖‖v‖)`, 0 when either vector has zero norm. Clamped to [0, 1].
pub fn cosine_similarity(u: &SparseVector, v: &SparseVector) -> f64 {
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (u.dot(v) / denom).clamp(0.0, 1.0)
}

/// TF-IDF vector space fitted over one corpus. Never reused across calls.
#[derive(Debug, Clone)]
pub struct TfIdfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TfIdfSpace {
    /// Fits vocabulary and IDF over `documents` and vectorizes each one.
    pub fn fit(documents: &[&NormalizedText]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut tf: HashMap<usize, usize> = HashMap::new();
            for term in vector_terms(doc) {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term.to_string()).or_insert_with(|| {
                    doc_freq.push(0);
                    next
                });
                let count = tf.entry(idx).or_insert(0);
                if *count == 0 {
                    doc_freq[idx] += 1;
                }
                *count += 1;
            }
            counts.push(tf);
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| weigh_and_normalize(tf, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vector(&self, doc_index: usize) -> Option<&SparseVector> {
        self.vectors.get(doc_index)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }
}

/// Similarity of each candidate to `reference`, in candidate order.
pub fn compute_similarities(reference: &NormalizedText, candidates: &[NormalizedText]) -> Vec<f64> {
    let corpus: Vec<&NormalizedText> = std::iter::once(reference).chain(candidates).collect();
    let space = TfIdfSpace::fit(&corpus);
    debug!(
        documents = space.len(),
        terms = space.vocabulary_size(),
        "TF-IDF space fitted"
    );

    let reference_vec = match space.vector(0) {
        Some(v) if !v.is_zero() => v,
        _ => return vec![0.0; candidates.len()],
    };

    (1..space.len())
        .map(|i| {
            space
                .vector(i)
                .map(|v| cosine_similarity(v, reference_vec))
                .unwrap_or(0.0)
        })
        .collect()
}

/// Terms the vector space indexes: single-character tokens are ignored.
fn vector_terms(doc: &NormalizedText) -> impl Iterator<Item = &str> + '_ {
    doc.tokens().filter(|t| t.chars().count() >= 2)
}

fn weigh_and_normalize(tf: HashMap<usize, usize>, idf: &[f64]) -> SparseVector {
    let mut entries: Vec<(usize, f64)> = tf
        .into_iter()
        .map(|(idx, count)| (idx, count as f64 * idf[idx]))
        .collect();
    entries.sort_unstable_by_key(|&(idx, _)| idx);

    let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in entries.iter_mut() {
            *w /= norm;
        }
    }
    SparseVector { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::normalizer::TextNormalizer;

    fn text(raw: &str) -> NormalizedText {
        TextNormalizer::default().normalize(raw)
    }

    fn idf_of(space: &TfIdfSpace, term: &str) -> Option<f64> {
        space.vocabulary.get(term).map(|&idx| space.idf[idx])
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_documents_have_similarity_one() {
        let reference = text("python sql machine learning");
        let sims = compute_similarities(&reference, &[reference.clone()]);
        assert!(approx(sims[0], 1.0), "got {}", sims[0]);
    }

    #[test]
    fn test_disjoint_documents_have_similarity_zero() {
        let sims = compute_similarities(&text("python pandas"), &[text("welding carpentry")]);
        assert_eq!(sims, vec![0.0]);
    }

    #[test]
    fn test_empty_documents_degrade_to_zero() {
        let sims = compute_similarities(&text(""), &[text("python"), text("")]);
        assert_eq!(sims, vec![0.0, 0.0]);

        let sims = compute_similarities(&text("the and of"), &[text("a an")]);
        assert_eq!(sims, vec![0.0]);
    }

    #[test]
    fn test_no_candidates_returns_empty() {
        assert!(compute_similarities(&text("python"), &[]).is_empty());
    }

    #[test]
    fn test_smoothed_idf_values() {
        let reference = text("python sql");
        let candidate = text("python");
        let space = TfIdfSpace::fit(&[&reference, &candidate]);

        // df(python) = 2, df(sql) = 1, n = 2
        assert!(approx(idf_of(&space, "python").unwrap(), 1.0));
        assert!(approx(idf_of(&space, "sql").unwrap(), (1.5_f64).ln() + 1.0));
        assert_eq!(space.vocabulary_size(), 2);
    }

    #[test]
    fn test_cosine_matches_hand_computed_value() {
        let sims = compute_similarities(&text("python sql"), &[text("python")]);
        let sql_idf = (1.5_f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + sql_idf * sql_idf).sqrt();
        assert!(approx(sims[0], expected), "got {}, want {expected}", sims[0]);
    }

    #[test]
    fn test_single_character_tokens_are_not_indexed() {
        let doc = text("r x python");
        let space = TfIdfSpace::fit(&[&doc]);
        assert_eq!(space.vocabulary_size(), 1);
        assert!(idf_of(&space, "r").is_none());
    }

    #[test]
    fn test_output_follows_candidate_order() {
        let reference = text("rust tokio axum");
        let sims = compute_similarities(
            &reference,
            &[text("gardening"), text("rust tokio axum"), text("rust")],
        );
        assert_eq!(sims.len(), 3);
        assert_eq!(sims[0], 0.0);
        assert!(approx(sims[1], 1.0));
        assert!(sims[2] > 0.0 && sims[2] < 1.0);
    }

    #[test]
    fn test_scores_are_batch_relative() {
        let reference = text("python sql tableau");
        let candidate = text("python sql");

        let alone = compute_similarities(&reference, &[candidate.clone()]);
        let with_peers = compute_similarities(
            &reference,
            &[candidate, text("python"), text("python pandas")],
        );
        assert!(!approx(alone[0], with_peers[0]));
    }

    #[test]
    fn test_similarities_stay_in_unit_interval() {
        let reference = text("python python sql data science");
        let candidates = [
            text("python"),
            text("sql sql sql"),
            text("data science python sql python"),
            text(""),
        ];
        for sim in compute_similarities(&reference, &candidates) {
            assert!((0.0..=1.0).contains(&sim));
        }
    }

    #[test]
    fn test_sparse_dot_and_norm() {
        let u = SparseVector {
            entries: vec![(0, 3.0), (2, 4.0)],
        };
        let v = SparseVector {
            entries: vec![(1, 1.0), (2, 2.0)],
        };
        assert!(approx(u.norm(), 5.0));
        assert!(approx(u.dot(&v), 8.0));
        assert!(SparseVector::default().is_zero());
        assert_eq!(cosine_similarity(&u, &SparseVector::default()), 0.0);
    }
}
