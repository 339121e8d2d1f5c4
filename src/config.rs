use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{LessonError, Result};
use crate::lessons::{self, Lesson, LESSONS};
use crate::report::RenderStyle;

// =============================================================================
// Course configuration
// =============================================================================

/// Which lessons to run and how to print them.
///
/// ```toml
/// lessons = ["copying", "loops"]
/// color = false
/// verbose = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CourseConfig {
    /// Lesson names; empty runs every lesson.
    pub lessons: Vec<String>,
    pub color: bool,
    pub verbose: bool,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            lessons: Vec::new(),
            color: true,
            verbose: false,
        }
    }
}

impl CourseConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The selected lessons in course order, each at most once.
    pub fn selected(&self) -> Result<Vec<&'static Lesson>> {
        for name in &self.lessons {
            if lessons::find(name).is_none() {
                return Err(LessonError::UnknownLesson {
                    name: name.clone(),
                    suggestion: find_similar_name(name, lessons::names()),
                });
            }
        }
        Ok(LESSONS
            .iter()
            .filter(|lesson| self.lessons.is_empty() || self.lessons.iter().any(|n| n == lesson.name))
            .collect())
    }

    pub fn render_style(&self) -> RenderStyle {
        self.render_style_with(std::env::var_os("NO_COLOR").is_some())
    }

    /// `NO_COLOR` wins over the config file.
    pub fn render_style_with(&self, no_color: bool) -> RenderStyle {
        RenderStyle {
            color: self.color && !no_color,
            verbose: self.verbose,
        }
    }
}

// =============================================================================
// Suggestions for mistyped names
// =============================================================================

pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, &ca) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }
    previous[b_chars.len()]
}

/// Closest candidate within two edits.
pub fn find_similar_name<'a>(typo: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    const MAX_DISTANCE: usize = 2;
    candidates
        .into_iter()
        .map(|candidate| (levenshtein_distance(typo, candidate), candidate))
        .filter(|(distance, _)| *distance <= MAX_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CourseConfig::from_toml_str("").unwrap();
        assert_eq!(config, CourseConfig::default());
        assert!(config.color);
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_valid_toml() {
        let config = CourseConfig::from_toml_str(
            r#"
lessons = ["loops", "copying"]
color = false
verbose = true
"#,
        )
        .unwrap();
        assert_eq!(config.lessons, vec!["loops", "copying"]);
        assert!(!config.color);
        assert!(config.verbose);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            CourseConfig::from_toml_str("lessons = "),
            Err(LessonError::Config(_))
        ));
        assert!(matches!(
            CourseConfig::from_toml_str("colour = true"),
            Err(LessonError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"lessons = [\"strings\"]\n").unwrap();
        let config = CourseConfig::load(file.path()).unwrap();
        assert_eq!(config.lessons, vec!["strings"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CourseConfig::load(dir.path().join("course.toml")),
            Err(LessonError::Io(_))
        ));
    }

    #[test]
    fn test_selected_all_in_course_order() {
        let selected = CourseConfig::default().selected().unwrap();
        assert_eq!(selected.len(), LESSONS.len());
        assert_eq!(selected[0].name, "variables");
        assert_eq!(selected.last().map(|l| l.name), Some("generators"));
    }

    #[test]
    fn test_selected_keeps_course_order_and_dedupes() {
        let config = CourseConfig {
            lessons: vec!["loops".into(), "strings".into(), "loops".into()],
            ..CourseConfig::default()
        };
        let names: Vec<&str> = config.selected().unwrap().iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["strings", "loops"]);
    }

    #[test]
    fn test_selected_unknown_lesson() {
        let config = CourseConfig {
            lessons: vec!["lopps".into()],
            ..CourseConfig::default()
        };
        match config.selected() {
            Err(LessonError::UnknownLesson { name, suggestion }) => {
                assert_eq!(name, "lopps");
                assert_eq!(suggestion.as_deref(), Some("loops"));
            }
            other => panic!("expected UnknownLesson, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_no_color_overrides_config() {
        let config = CourseConfig::default();
        assert!(config.render_style_with(false).color);
        assert!(!config.render_style_with(true).color);

        let plain = CourseConfig {
            color: false,
            ..CourseConfig::default()
        };
        assert!(!plain.render_style_with(false).color);
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("loops", "loops"), 0);
        assert_eq!(levenshtein_distance("lopps", "loops"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_similar_name() {
        assert_eq!(find_similar_name("dict", ["dicts", "lists"]), Some("dicts".to_string()));
        assert_eq!(find_similar_name("zzzzzz", ["dicts", "lists"]), None);
    }
}
