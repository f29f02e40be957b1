//! Score Fusion — combines lexical similarity and skill overlap into a
//! 0–100 score and a verdict tier.
//!
//! ```text
//! required      = skills(reference)  or the whole vocabulary if none
//! skill_overlap = |required ∩ skills(candidate)| / |required|
//! final_score   = (0.4 × similarity + 0.6 × skill_overlap) × 100
//! ```

use serde::Serialize;

use crate::screening::normalizer::NormalizedText;
use crate::screening::similarity::compute_similarities;
use crate::screening::skills::SkillVocabulary;

/// Lower bound (inclusive) of the `Selected` tier.
pub const SELECTED_THRESHOLD: f64 = 75.0;
/// Lower bound (inclusive) of the `Review` tier.
pub const REVIEW_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub similarity: f64,
    pub skill_overlap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 0.4,
            skill_overlap: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Selected,
    Review,
    Reject,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        if score >= SELECTED_THRESHOLD {
            Verdict::Selected
        } else if score >= REVIEW_THRESHOLD {
            Verdict::Review
        } else {
            Verdict::Reject
        }
    }
}

/// Fused outcome for one candidate, before the identifier is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedScore {
    pub similarity: f64,
    pub skill_overlap: f64,
    /// Rounded to 2 decimals for display, within [0, 100].
    pub final_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub verdict: Verdict,
}

/// Scores every candidate against `reference`. Output order = input order.
pub fn fuse(
    reference: &NormalizedText,
    candidates: &[NormalizedText],
    vocabulary: &SkillVocabulary,
    weights: &ScoringWeights,
) -> Vec<FusedScore> {
    let required = required_skills(reference, vocabulary);
    let similarities = compute_similarities(reference, candidates);

    candidates
        .iter()
        .zip(similarities)
        .map(|(candidate, similarity)| {
            let candidate_skills = vocabulary.extract(candidate);
            let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required
                .iter()
                .cloned()
                .partition(|skill| candidate_skills.contains(skill));

            let skill_overlap = matched_skills.len() as f64 / required.len().max(1) as f64;
            let (final_score, verdict) = grade(combine(similarity, skill_overlap, weights));

            FusedScore {
                similarity,
                skill_overlap,
                final_score,
                matched_skills,
                missing_skills,
                verdict,
            }
        })
        .collect()
}

/// Skills the reference asks for; falls back to the whole vocabulary when
/// the reference mentions none of them.
pub fn required_skills(reference: &NormalizedText, vocabulary: &SkillVocabulary) -> Vec<String> {
    let required = vocabulary.extract(reference);
    if required.is_empty() {
        vocabulary.entries().to_vec()
    } else {
        required
    }
}

fn combine(similarity: f64, skill_overlap: f64, weights: &ScoringWeights) -> f64 {
    ((weights.similarity * similarity + weights.skill_overlap * skill_overlap) * 100.0)
        .clamp(0.0, 100.0)
}

/// Verdict from the unrounded score; rounding only affects the displayed value.
fn grade(raw_score: f64) -> (f64, Verdict) {
    (round_score(raw_score), Verdict::from_score(raw_score))
}

/// Rounds to 2 decimal places.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
