//! End-to-end analysis of one repository.
//!
//! [`AnalysisService`] is built once at startup and shared by every request.
//! Each call runs the phases of [`AnalysisPhase`] in order and either returns
//! a complete [`AnalysisReport`] or the first error; there is no partial
//! result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::analysis::{run_static_analysis, LocalSources, RepositoryAnalysis, StaticAnalysis};
use crate::complexity::ComplexityEstimator;
use crate::config::AppConfig;
use crate::core::RepoData;
use crate::docs::{assemble, Documentation};
use crate::errors::Result;
use crate::fetch::{GitHubFetcher, LocalCheckout, RepoRef, RepositoryFetcher};
use crate::observability::AnalysisPhase;
use crate::summarize::{self, project_context, Summarizer};

/// The `data` object of a successful analysis response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub repository_info: RepoData,
    pub analysis: RepositoryAnalysis,
    pub documentation: Documentation,
}

pub struct AnalysisService {
    fetcher: Arc<dyn RepositoryFetcher>,
    summarizer: Arc<dyn Summarizer>,
    local_complexity: bool,
}

impl AnalysisService {
    pub fn new(
        fetcher: Arc<dyn RepositoryFetcher>,
        summarizer: Arc<dyn Summarizer>,
        local_complexity: bool,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            local_complexity,
        }
    }

    /// GitHub fetcher plus the summarizer selected by configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(GitHubFetcher::new(&config.github)?);
        let summarizer = summarize::from_config(&config.summarizer)?;
        Ok(Self::new(
            fetcher,
            summarizer,
            config.analysis.local_complexity,
        ))
    }

    pub fn with_local_complexity(mut self, enabled: bool) -> Self {
        self.local_complexity = enabled;
        self
    }

    /// Fetch, analyze, summarize and document a remote repository.
    ///
    /// # Errors
    ///
    /// Invalid repository URLs, fetch failures, clone failures and
    /// summarizer failures all abort the run.
    pub async fn analyze(&self, repo_url: &str) -> Result<AnalysisReport> {
        let span = tracing::info_span!("analyze", repo = %repo_url);

        async {
            tracing::info!(phase = %AnalysisPhase::Fetching, "Fetching repository data");
            let repo = self.fetcher.fetch(repo_url).await?;

            let analysis = if self.local_complexity {
                let repo_ref = RepoRef::parse(repo_url)?;
                tracing::info!(phase = %AnalysisPhase::Cloning, "Cloning {}", repo_ref);
                analyze_blocking(repo.clone(), move || LocalCheckout::clone_repo(&repo_ref))
                    .await?
            } else {
                tracing::info!(phase = %AnalysisPhase::Analyzing, "Analyzing code structure");
                run_static_analysis(&repo, None)
            };

            self.finish(repo, analysis).await
        }
        .instrument(span)
        .await
    }

    /// Run the same pipeline over a directory on disk.
    ///
    /// Complexity estimation is always enabled since sources are at hand.
    pub async fn analyze_local(&self, path: &Path) -> Result<AnalysisReport> {
        let span = tracing::info_span!("analyze_local", path = %path.display());

        async {
            tracing::info!(phase = %AnalysisPhase::Fetching, "Reading working tree");
            let root: PathBuf = path.to_path_buf();
            let (checkout, repo) = tokio::task::spawn_blocking(move || -> Result<_> {
                let checkout = LocalCheckout::open(&root)?;
                let repo = checkout.repo_data()?;
                Ok((checkout, repo))
            })
            .await??;

            let analysis = analyze_blocking(repo.clone(), move || Ok(checkout)).await?;

            self.finish(repo, analysis).await
        }
        .instrument(span)
        .await
    }

    async fn finish(&self, repo: RepoData, analysis: StaticAnalysis) -> Result<AnalysisReport> {
        tracing::info!(
            phase = %AnalysisPhase::Summarizing,
            "Generating project summary"
        );
        let project_summary = self.summarizer.summarize(&project_context(&repo)).await?;

        tracing::info!(phase = %AnalysisPhase::Assembling, "Generating documentation");
        let documentation = assemble(
            &repo,
            &analysis.tech_stack,
            &analysis.structure,
            &analysis.components,
            &project_summary,
            Local::now().naive_local(),
        );

        tracing::info!(
            files = analysis.structure.total_files,
            technologies = analysis.tech_stack.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            analysis: RepositoryAnalysis::new(project_summary, &analysis),
            repository_info: repo,
            documentation,
        })
    }
}

/// Open a checkout and run static analysis with complexity estimation on
/// the blocking pool. The checkout is dropped (and any clone removed)
/// before this returns.
async fn analyze_blocking<F>(repo: RepoData, open: F) -> Result<StaticAnalysis>
where
    F: FnOnce() -> Result<LocalCheckout> + Send + 'static,
{
    let analysis = tokio::task::spawn_blocking(move || -> Result<StaticAnalysis> {
        let checkout = open()?;
        tracing::info!(phase = %AnalysisPhase::Analyzing, "Analyzing code structure");
        let mut estimator = ComplexityEstimator::new()?;
        Ok(run_static_analysis(
            &repo,
            Some(LocalSources {
                provider: &checkout,
                estimator: &mut estimator,
            }),
        ))
    })
    .await??;

    Ok(analysis)
}
