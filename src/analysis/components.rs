use crate::core::FileEntry;

/// Architectural component and the path fragments that indicate it.
const COMPONENT_PATTERNS: &[(&str, &[&str])] = &[
    ("frontend", &["src/", "public/", "components/"]),
    ("backend", &["api/", "server/", "controllers/"]),
    ("database", &["models/", "db/", "migrations/"]),
    ("tests", &["tests/", "spec/", "__tests__/"]),
    ("docs", &["docs/", "documentation/"]),
];

fn components_for_path(path: &str) -> impl Iterator<Item = &'static str> + '_ {
    COMPONENT_PATTERNS
        .iter()
        .filter(move |(_, patterns)| patterns.iter().any(|p| path.contains(p)))
        .map(|(component, _)| *component)
}

/// Component labels in first-seen order, without duplicates.
pub fn identify(files: &[FileEntry]) -> Vec<String> {
    let mut components: Vec<String> = Vec::new();

    for file in files {
        for component in components_for_path(&file.path) {
            if !components.iter().any(|c| c == component) {
                components.push(component.to_string());
            }
        }
    }

    components
}
