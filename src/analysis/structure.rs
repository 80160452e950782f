use crate::complexity::ComplexityEstimator;
use crate::core::{ComplexityMetrics, FileEntry, StructureSummary};
use std::io;

/// Extensions counted as source languages.
pub const LANGUAGE_EXTENSIONS: &[&str] = &[".py", ".js", ".java", ".cpp", ".go", ".rb"];

/// Exact base names treated as program entry points.
pub const ENTRY_POINT_NAMES: &[&str] = &["main.py", "app.py", "index.js", "main.go"];

/// Exact base names treated as dependency manifests.
pub const MANIFEST_NAMES: &[&str] = &["requirements.txt", "package.json", "go.mod", "Gemfile"];

/// Access to file contents for complexity estimation.
///
/// Implemented by local checkouts; remote listings have no contents and are
/// analyzed without it.
pub trait SourceProvider {
    fn read_source(&self, path: &str) -> io::Result<String>;
}

/// Extension of the base name including the leading dot, if any.
///
/// A leading dot alone (`.gitignore`) is a hidden-file marker, not an
/// extension.
pub fn language_extension(base_name: &str) -> Option<&str> {
    match base_name.rfind('.') {
        Some(idx) if idx > 0 => Some(&base_name[idx..]),
        _ => None,
    }
}

/// Recognized language extension of `base_name`, the key of `languages`.
pub fn source_language(base_name: &str) -> Option<&str> {
    language_extension(base_name).filter(|ext| LANGUAGE_EXTENSIONS.contains(ext))
}

pub fn is_entry_point(base_name: &str) -> bool {
    ENTRY_POINT_NAMES.contains(&base_name)
}

pub fn is_dependency_manifest(base_name: &str) -> bool {
    MANIFEST_NAMES.contains(&base_name)
}

/// Pure aggregation over a file listing.
pub fn analyze(files: &[FileEntry]) -> StructureSummary {
    files
        .iter()
        .filter(|f| f.is_file())
        .fold(StructureSummary::default(), |mut summary, file| {
            record_file(&mut summary, file);
            summary
        })
}

/// Aggregation plus per-file complexity for files the estimator understands.
///
/// A file that cannot be read or parsed is recorded with an empty metrics
/// entry; the remaining files are still analyzed.
pub fn analyze_with_sources(
    files: &[FileEntry],
    sources: &dyn SourceProvider,
    estimator: &mut ComplexityEstimator,
) -> StructureSummary {
    let mut summary = analyze(files);

    for file in files
        .iter()
        .filter(|f| f.is_file() && ComplexityEstimator::supports(&f.path))
    {
        let metrics = match sources.read_source(&file.path) {
            Ok(source) => estimator.estimate_file(&file.path, &source),
            Err(e) => {
                tracing::warn!("Skipping complexity for {}: {}", file.path, e);
                ComplexityMetrics::empty()
            }
        };

        if metrics.is_empty() {
            tracing::debug!("No complexity metrics for {}", file.path);
        }
        summary.complexity.insert(file.path.clone(), metrics);
    }

    summary
}

fn record_file(summary: &mut StructureSummary, file: &FileEntry) {
    let base_name = file.base_name();

    summary.total_files += 1;
    summary.total_size += file.size;

    match source_language(base_name) {
        Some(ext) => *summary.languages.entry(ext.to_string()).or_insert(0) += 1,
        None => summary.ignored_files += 1,
    }

    *summary
        .file_types
        .entry(file.file_type().to_string())
        .or_insert(0) += 1;

    if let Some(dir) = file.parent_dir() {
        summary.directories.insert(dir.to_string());
    }

    if is_entry_point(base_name) {
        summary.entry_points.insert(file.path.clone());
    }

    if is_dependency_manifest(base_name) {
        summary.dependency_manifests.insert(file.path.clone());
    }
}
