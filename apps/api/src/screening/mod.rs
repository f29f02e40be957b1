// Resume screening engine
// Normalize → {skill extraction, TF-IDF similarity} → score fusion → verdict.
// Everything below `handlers` is pure and synchronous.

pub mod engine;
pub mod fusion;
pub mod handlers;
pub mod normalizer;
pub mod similarity;
pub mod skills;
