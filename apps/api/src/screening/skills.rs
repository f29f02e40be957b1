//! Skill vocabulary and substring-based skill extraction.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::screening::normalizer::NormalizedText;

/// Built-in vocabulary covering data-science and software-engineering roles.
/// Order is display order for matched/missing skills.
pub const DEFAULT_SKILLS: &[&str] = &[
    // Data / ML
    "python",
    "pandas",
    "numpy",
    "sql",
    "machine learning",
    "deep learning",
    "statistics",
    "probability",
    "data visualization",
    "matplotlib",
    "seaborn",
    "power bi",
    "tableau",
    "scikit-learn",
    "nlp",
    "tensorflow",
    "pytorch",
    // Software engineering / CS
    "data structures",
    "algorithms",
    "object-oriented programming",
    "oop",
    "java",
    "c++",
    "operating systems",
    "os",
    "dbms",
    "system design",
    "git",
    "github",
];

/// Ordered, deduplicated set of lowercase skill phrases. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    entries: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    /// Lowercases and trims each entry; blanks and repeats are dropped
    /// (first occurrence keeps its position).
    pub fn new<S: AsRef<str>>(entries: impl IntoIterator<Item = S>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for entry in entries {
            let skill = entry.as_ref().trim().to_lowercase();
            if !skill.is_empty() && !unique.contains(&skill) {
                unique.push(skill);
            }
        }
        Self { entries: unique }
    }

    /// Loads a newline-separated vocabulary file. Lines starting with `#`
    /// are comments.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skills file '{}'", path.display()))?;
        let vocabulary = Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        if vocabulary.is_empty() {
            bail!("Skills file '{}' contains no skills", path.display());
        }
        Ok(vocabulary)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every vocabulary entry occurring as a substring of `text`,
    /// in vocabulary order.
    ///
    /// Matching is not token-aligned: `os` is found inside `cost`.
    pub fn extract(&self, text: &NormalizedText) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let haystack = text.as_str();
        self.entries
            .iter()
            .filter(|skill| haystack.contains(skill.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::screening::normalizer::TextNormalizer;

    fn text(raw: &str) -> NormalizedText {
        TextNormalizer::default().normalize(raw)
    }

    #[test]
    fn test_default_vocabulary_has_29_entries() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.len(), 29);
        assert_eq!(vocab.entries()[0], "python");
        assert_eq!(vocab.entries()[28], "github");
    }

    #[test]
    fn test_extract_preserves_vocabulary_order() {
        let vocab = SkillVocabulary::default();
        let skills = vocab.extract(&text("SQL then Pandas then Python"));
        assert_eq!(skills, vec!["python", "pandas", "sql"]);
    }

    #[test]
    fn test_multi_word_skill_requires_contiguous_phrase() {
        let vocab = SkillVocabulary::default();
        assert_eq!(
            vocab.extract(&text("Applied machine learning daily")),
            vec!["machine learning"]
        );
        assert!(vocab
            .extract(&text("machine shop, learning fast"))
            .is_empty());
    }

    #[test]
    fn test_stopword_removal_can_join_phrase() {
        // "of" disappears, gluing "data" and "structures" together
        let vocab = SkillVocabulary::default();
        assert_eq!(
            vocab.extract(&text("data of structures")),
            vec!["data structures"]
        );
    }

    #[test]
    fn test_substring_matching_is_permissive() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.extract(&text("reduced cost")), vec!["os"]);
        assert_eq!(vocab.extract(&text("github")), vec!["git", "github"]);
    }

    #[test]
    fn test_non_alphabetic_entries_never_match() {
        let vocab = SkillVocabulary::default();
        let skills = vocab.extract(&text("C++, scikit-learn and object-oriented programming"));
        assert!(!skills.contains(&"c++".to_string()));
        assert!(!skills.contains(&"scikit-learn".to_string()));
        assert!(!skills.contains(&"object-oriented programming".to_string()));
    }

    #[test]
    fn test_empty_text_extracts_nothing() {
        assert!(SkillVocabulary::default()
            .extract(&NormalizedText::default())
            .is_empty());
    }

    #[test]
    fn test_new_normalizes_and_dedups() {
        let vocab = SkillVocabulary::new(["  Rust ", "rust", "", "Kafka", "RUST"]);
        assert_eq!(vocab.entries(), &["rust".to_string(), "kafka".to_string()]);
    }

    #[test]
    fn test_from_file_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# infra skills\nKubernetes\n\nterraform\nkubernetes").unwrap();

        let vocab = SkillVocabulary::from_file(file.path()).unwrap();
        assert_eq!(
            vocab.entries(),
            &["kubernetes".to_string(), "terraform".to_string()]
        );
    }

    #[test]
    fn test_from_file_rejects_empty_vocabulary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();

        let err = SkillVocabulary::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("contains no skills"));
    }

    #[test]
    fn test_from_file_missing_path_errors() {
        let err = SkillVocabulary::from_file(Path::new("/nonexistent/skills.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read skills file"));
    }
}
