//! Static analysis over a fetched repository.
//!
//! [`run_static_analysis`] combines the structure analyzer, tech-stack
//! detector and component identifier. [`RepositoryAnalysis`] is the
//! serializable view returned to clients once a project summary exists.

pub mod components;
pub mod structure;
pub mod tech_stack;

use crate::complexity::ComplexityEstimator;
use crate::core::metrics::{calculate_average_complexity, count_unparsed, total_functions};
use crate::core::{ComplexityMetrics, RepoData, StructureSummary, TechStack};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use structure::SourceProvider;

/// Everything derivable from a repository without the summarizer.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticAnalysis {
    pub structure: StructureSummary,
    pub tech_stack: TechStack,
    pub components: Vec<String>,
}

/// Optional file contents for complexity estimation.
pub struct LocalSources<'a> {
    pub provider: &'a dyn SourceProvider,
    pub estimator: &'a mut ComplexityEstimator,
}

pub fn run_static_analysis(repo: &RepoData, sources: Option<LocalSources<'_>>) -> StaticAnalysis {
    let structure = match sources {
        Some(LocalSources {
            provider,
            estimator,
        }) => structure::analyze_with_sources(&repo.files, provider, estimator),
        None => structure::analyze(&repo.files),
    };

    StaticAnalysis {
        structure,
        tech_stack: tech_stack::detect(repo),
        components: components::identify(&repo.files),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CodeAnalysis {
    pub total_files: usize,
    pub file_types: BTreeMap<String, usize>,
    pub main_directories: Vec<String>,
    pub entry_points: Vec<String>,
    pub dependency_manifests: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComplexityReport {
    pub total_files: usize,
    pub total_size: u64,
    pub languages: BTreeMap<String, usize>,
    pub file_types: BTreeMap<String, usize>,
    pub total_functions: usize,
    pub average_complexity: f64,
    pub unparsed_files: usize,
    pub files: BTreeMap<String, ComplexityMetrics>,
}

/// The `analysis` object of an analysis response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RepositoryAnalysis {
    pub project_summary: String,
    pub tech_stack: TechStack,
    pub components: Vec<String>,
    pub code_analysis: CodeAnalysis,
    pub complexity_metrics: ComplexityReport,
}

impl RepositoryAnalysis {
    pub fn new(project_summary: String, analysis: &StaticAnalysis) -> Self {
        let structure = &analysis.structure;

        Self {
            project_summary,
            tech_stack: analysis.tech_stack.clone(),
            components: analysis.components.clone(),
            code_analysis: CodeAnalysis::from(structure),
            complexity_metrics: ComplexityReport::from(structure),
        }
    }
}

impl From<&StructureSummary> for CodeAnalysis {
    fn from(structure: &StructureSummary) -> Self {
        Self {
            total_files: structure.total_files,
            file_types: structure.file_types.clone(),
            main_directories: structure.directories.iter().cloned().collect(),
            entry_points: structure.entry_points.iter().cloned().collect(),
            dependency_manifests: structure.dependency_manifests.iter().cloned().collect(),
        }
    }
}

impl From<&StructureSummary> for ComplexityReport {
    fn from(structure: &StructureSummary) -> Self {
        Self {
            total_files: structure.total_files,
            total_size: structure.total_size,
            languages: structure.languages.clone(),
            file_types: structure.file_types.clone(),
            total_functions: total_functions(&structure.complexity),
            average_complexity: calculate_average_complexity(&structure.complexity),
            unparsed_files: count_unparsed(&structure.complexity),
            files: structure.complexity.clone(),
        }
    }
}
