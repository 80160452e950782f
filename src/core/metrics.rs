use crate::core::{ComplexityMetrics, FileEntry};
use std::collections::BTreeMap;

pub fn total_size(files: &[FileEntry]) -> u64 {
    files.iter().filter(|f| f.is_file()).map(|f| f.size).sum()
}

pub fn total_functions(metrics: &BTreeMap<String, ComplexityMetrics>) -> usize {
    metrics.values().filter_map(|m| m.function_count).sum()
}

/// Mean cyclomatic complexity per analyzed function.
pub fn calculate_average_complexity(metrics: &BTreeMap<String, ComplexityMetrics>) -> f64 {
    let functions = total_functions(metrics);
    if functions == 0 {
        return 0.0;
    }

    let total: u32 = metrics.values().filter_map(|m| m.cyclomatic_complexity).sum();
    total as f64 / functions as f64
}

/// File with the highest cyclomatic complexity, ties broken by path order.
pub fn find_most_complex_file(
    metrics: &BTreeMap<String, ComplexityMetrics>,
) -> Option<(&str, u32)> {
    metrics
        .iter()
        .filter_map(|(path, m)| m.cyclomatic_complexity.map(|c| (path.as_str(), c)))
        .fold(None, |best, (path, c)| match best {
            Some((_, best_c)) if best_c >= c => best,
            _ => Some((path, c)),
        })
}

pub fn count_unparsed(metrics: &BTreeMap<String, ComplexityMetrics>) -> usize {
    metrics.values().filter(|m| m.is_empty()).count()
}
