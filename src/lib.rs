// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod core;
pub mod docs;
pub mod errors;
pub mod fetch;
pub mod observability;
pub mod pipeline;
pub mod server;
pub mod summarize;

// Re-export commonly used types
pub use crate::core::{
    ComplexityMetrics, EntryType, FileEntry, RepoData, StructureSummary, TechStack,
};

pub use crate::core::metrics::{calculate_average_complexity, find_most_complex_file};

pub use crate::analysis::{
    run_static_analysis, CodeAnalysis, ComplexityReport, RepositoryAnalysis, StaticAnalysis,
};

pub use crate::docs::{assemble, Documentation, Node, ProjectStructure, TechnicalDocumentation};

pub use crate::errors::{Error, Result};

pub use crate::fetch::{GitHubFetcher, LocalCheckout, RepoRef, RepositoryFetcher};

pub use crate::pipeline::{AnalysisReport, AnalysisService};

pub use crate::summarize::{HostedSummarizer, LeadSummarizer, Summarizer};
