//! Document facts — the immutable snapshot handed over by the upstream
//! parser. Every field is optional or defaultable: an absent field is neutral
//! input, never an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub links: Vec<String>,
}

/// One work-history entry. Start/end markers are kept as the raw strings the
/// parser extracted ("Jan 2020", "01/2020", "Present"); date parsing and its
/// failure handling belong to the analysis layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkEntry {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: String,
    /// Explicit duration mention, e.g. "2 years 3 months", when the parser
    /// found one next to the entry.
    pub duration_mention: Option<String>,
}

impl WorkEntry {
    /// Splits the description into achievement lines: bullet markers and
    /// blank lines stripped, one line per achievement.
    pub fn achievement_lines(&self) -> Vec<&str> {
        self.description
            .lines()
            .map(|line| line.trim_start_matches(['-', '*', '•', '·', ' ', '\t']).trim())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
}

/// A named section of the document with its raw text, e.g. "summary",
/// "experience", "skills".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub name: String,
    pub text: String,
}

impl Section {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Layout artifacts the parser detected. These only feed the formatting
/// criterion; all default to "clean".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingArtifacts {
    pub has_tables: bool,
    pub has_text_boxes: bool,
    pub has_headers_footers: bool,
    pub has_images: bool,
    pub non_standard_fonts: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFacts {
    pub contact: ContactInfo,
    pub work_history: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub sections: Vec<Section>,
    pub page_count: u32,
    pub word_count: u32,
    pub artifacts: FormattingArtifacts,
}

impl DocumentFacts {
    /// All searchable text of the document: section texts, declared skills,
    /// and work-history descriptions. Used as the haystack for keyword
    /// matching and free-text extraction.
    pub fn full_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for section in &self.sections {
            parts.push(&section.text);
        }
        for skill in &self.skills {
            parts.push(skill);
        }
        for entry in &self.work_history {
            parts.push(&entry.description);
            if let Some(title) = &entry.title {
                parts.push(title);
            }
        }
        for entry in &self.education {
            if let Some(degree) = &entry.degree {
                parts.push(degree);
            }
            if let Some(institution) = &entry.institution {
                parts.push(institution);
            }
        }
        parts.join("\n")
    }

    /// Achievement lines across all work-history entries, with the owning
    /// entry's index.
    pub fn all_achievement_lines(&self) -> Vec<(usize, &str)> {
        self.work_history
            .iter()
            .enumerate()
            .flat_map(|(idx, entry)| {
                entry
                    .achievement_lines()
                    .into_iter()
                    .map(move |line| (idx, line))
            })
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_lines_strip_bullets() {
        let entry = WorkEntry {
            description: "- Built a pipeline\n• Reduced latency by 40%\n\n  * Led a team".to_string(),
            ..Default::default()
        };
        let lines = entry.achievement_lines();
        assert_eq!(
            lines,
            vec!["Built a pipeline", "Reduced latency by 40%", "Led a team"]
        );
    }

    #[test]
    fn test_empty_facts_deserialize_from_empty_object() {
        let facts: DocumentFacts = serde_json::from_str("{}").unwrap();
        assert!(facts.work_history.is_empty());
        assert!(facts.contact.email.is_none());
        assert_eq!(facts.word_count, 0);
    }

    #[test]
    fn test_full_text_includes_skills_and_sections() {
        let facts = DocumentFacts {
            skills: vec!["Python".to_string()],
            sections: vec![Section {
                name: "summary".to_string(),
                text: "Seasoned engineer".to_string(),
            }],
            ..Default::default()
        };
        let text = facts.full_text();
        assert!(text.contains("Python"));
        assert!(text.contains("Seasoned engineer"));
    }
}
