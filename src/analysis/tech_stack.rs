use crate::core::{RepoData, TechStack};
use once_cell::sync::Lazy;
use regex::Regex;

/// Technology label and the path patterns that imply it, in table order.
const TECH_PATTERNS: &[(&str, &str)] = &[
    ("Python", r"\.py$"),
    ("JavaScript", r"\.js$|\.jsx$|\.ts$|\.tsx$"),
    ("React", r"\.jsx$|\.tsx$"),
    ("Node.js", r"package\.json$"),
    ("Django", r"settings\.py$|urls\.py$"),
    ("Flask", r"app\.py$|flask_app\.py$"),
    ("Java", r"\.java$"),
    ("C#", r"\.cs$"),
    ("Ruby", r"\.rb$"),
    ("PHP", r"\.php$"),
];

static TECH_MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    TECH_PATTERNS
        .iter()
        .map(|(label, pattern)| (*label, Regex::new(pattern).unwrap()))
        .collect()
});

/// Labels whose patterns match `path`, in table order.
pub fn labels_for_path(path: &str) -> impl Iterator<Item = &'static str> + '_ {
    TECH_MATCHERS
        .iter()
        .filter(move |(_, re)| re.is_match(path))
        .map(|(label, _)| *label)
}

/// Declared primary language plus every label implied by a file path.
pub fn detect(repo: &RepoData) -> TechStack {
    let mut stack = TechStack::new();

    if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
        stack.insert(language);
    }

    for file in repo.files.iter().filter(|f| f.is_file()) {
        for label in labels_for_path(&file.path) {
            stack.insert(label);
        }
    }

    stack
}
