use colored::{ColoredString, Colorize};
use std::fmt::Display;

// =============================================================================
// Console report
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Section(String),
    Note(String),
    Show { label: String, value: String },
    Check { label: String, passed: bool },
}

/// What a lesson walkthrough prints, collected so the runner can decide
/// on colors and verbosity afterwards.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub color: bool,
    pub verbose: bool,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&mut self, title: impl Into<String>) {
        self.entries.push(Entry::Section(title.into()));
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Note(text.into()));
    }

    /// Records a value for verbose output.
    pub fn show(&mut self, label: impl Into<String>, value: impl Display) {
        self.entries.push(Entry::Show {
            label: label.into(),
            value: value.to_string(),
        });
    }

    pub fn check(&mut self, label: impl Into<String>, passed: bool) -> bool {
        self.entries.push(Entry::Check {
            label: label.into(),
            passed,
        });
        passed
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn checks(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Check { .. }))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Check { passed: false, .. }))
            .count()
    }

    pub fn render(&self, style: RenderStyle) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            match entry {
                Entry::Section(title) => {
                    if !output.is_empty() {
                        output.push('\n');
                    }
                    let heading = format!("=== {} ===", title);
                    output.push_str(&paint(&heading, style.color, |s| s.bold()));
                    output.push('\n');
                }
                Entry::Note(text) => {
                    output.push_str(&format!("  {}\n", paint(text, style.color, |s| s.dimmed())));
                }
                Entry::Show { label, value } => {
                    if style.verbose {
                        output.push_str(&format!(
                            "    {} = {}\n",
                            paint(label, style.color, |s| s.blue()),
                            value
                        ));
                    }
                }
                Entry::Check { label, passed } => {
                    let mark = if *passed {
                        paint("✓", style.color, |s| s.green())
                    } else {
                        paint("✗", style.color, |s| s.red())
                    };
                    output.push_str(&format!("  {} {}\n", mark, label));
                }
            }
        }
        output.push_str(&Self::format_summary(self.checks(), self.failures()));
        output
    }

    pub fn format_summary(checks: usize, failures: usize) -> String {
        let plural = if checks == 1 { "" } else { "s" };
        format!("Summary: {checks} check{plural}, {failures} failed\n")
    }
}

/// Applies `style` only when `color` is on.
pub fn paint(text: &str, color: bool, style: impl Fn(ColoredString) -> ColoredString) -> String {
    if color {
        style(text.normal()).to_string()
    } else {
        text.to_string()
    }
}
