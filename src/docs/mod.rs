//! Documentation assembly.
//!
//! Turns a repository and its analysis into three artifacts:
//!
//! - a generated README ([`readme`]),
//! - a nested project tree ([`tree`]),
//! - a technical-documentation object aggregating architecture and metrics.
//!
//! Assembly has no hidden inputs: the generation time is passed in.

pub mod readme;
pub mod tree;

use crate::analysis::{CodeAnalysis, ComplexityReport};
use crate::core::{RepoData, StructureSummary, TechStack};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use tree::{build_tree, Node, ProjectStructure};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Architecture {
    pub overview: String,
    pub components: Vec<String>,
    pub dependencies: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TechnicalDocumentation {
    pub architecture: Architecture,
    pub metrics: ComplexityReport,
    pub code_analysis: CodeAnalysis,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Documentation {
    pub readme: String,
    pub project_structure: ProjectStructure,
    pub technical_documentation: TechnicalDocumentation,
}

pub fn assemble(
    repo: &RepoData,
    tech_stack: &TechStack,
    structure: &StructureSummary,
    components: &[String],
    summary_text: &str,
    generated_at: NaiveDateTime,
) -> Documentation {
    Documentation {
        readme: readme::render_readme(repo, tech_stack, structure, summary_text, generated_at),
        project_structure: build_tree(&repo.name, &repo.files),
        technical_documentation: TechnicalDocumentation {
            architecture: Architecture {
                overview: summary_text.to_string(),
                components: components.to_vec(),
                dependencies: tech_stack.to_vec(),
            },
            metrics: ComplexityReport::from(structure),
            code_analysis: CodeAnalysis::from(structure),
        },
    }
}
