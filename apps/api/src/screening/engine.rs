//! Screening Engine — runs one scoring batch end to end.
//!
//! Holds the immutable normalizer, vocabulary and weights built at startup.
//! `AppState` carries it as `Arc<ScreeningEngine>`; every call builds its own
//! transient vector space, so concurrent batches never share mutable state.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::screening::fusion::{fuse, FusedScore, ScoringWeights, Verdict};
use crate::screening::normalizer::{NormalizedText, TextNormalizer};
use crate::screening::skills::SkillVocabulary;

/// Batch-level precondition failures. Nothing is scored when one occurs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("Job description is empty.")]
    EmptyReference,

    #[error("No resumes uploaded.")]
    NoCandidates,

    #[error("Could not read any resume content.")]
    NoReadableCandidates,
}

/// A candidate that survived text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDocument {
    pub name: String,
    pub text: String,
}

/// Per-candidate result as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub candidate_name: String,
    /// 0 – 100, two decimals.
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub verdict: Verdict,
}

impl ScoreResult {
    fn from_fused(candidate_name: String, fused: FusedScore) -> Self {
        Self {
            candidate_name,
            match_score: fused.final_score,
            matched_skills: fused.matched_skills,
            missing_skills: fused.missing_skills,
            verdict: fused.verdict,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreeningEngine {
    normalizer: TextNormalizer,
    vocabulary: SkillVocabulary,
    weights: ScoringWeights,
}

impl ScreeningEngine {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self {
            normalizer: TextNormalizer::default(),
            vocabulary,
            weights: ScoringWeights::default(),
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn normalize(&self, raw: &str) -> NormalizedText {
        self.normalizer.normalize(raw)
    }

    /// Checks the batch preconditions, then scores every candidate.
    ///
    /// `candidates` must already be filtered to readable documents; results
    /// come back in the same order.
    pub fn score_batch(
        &self,
        reference: &str,
        candidates: &[CandidateDocument],
    ) -> Result<Vec<ScoreResult>, ScreeningError> {
        if reference.trim().is_empty() {
            return Err(ScreeningError::EmptyReference);
        }
        if candidates.is_empty() {
            return Err(ScreeningError::NoReadableCandidates);
        }

        let reference = self.normalize(reference);
        let normalized: Vec<NormalizedText> = candidates
            .iter()
            .map(|c| self.normalize(&c.text))
            .collect();

        let fused = fuse(&reference, &normalized, &self.vocabulary, &self.weights);

        Ok(candidates
            .iter()
            .zip(fused)
            .map(|(candidate, fused)| {
                debug!(
                    candidate = %candidate.name,
                    similarity = fused.similarity,
                    skill_overlap = fused.skill_overlap,
                    score = fused.final_score,
                    "Candidate scored"
                );
                ScoreResult::from_fused(candidate.name.clone(), fused)
            })
            .collect())
    }
}
