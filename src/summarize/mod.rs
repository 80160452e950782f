//! Project summary generation.
//!
//! The summarizer is an external capability: [`HostedSummarizer`] calls a
//! hosted sequence-to-sequence model, [`LeadSummarizer`] is the offline
//! fallback. Both receive the text built by [`project_context`].

pub mod hosted;
pub mod lead;

use crate::config::SummarizerConfig;
use crate::core::RepoData;
use crate::errors::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub use hosted::HostedSummarizer;
pub use lead::LeadSummarizer;

/// Boxed future type alias used by [`Summarizer`] to keep the trait dyn-compatible.
pub type SummaryFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Produces an abstractive summary of free text.
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an upstream error if the summarization backend fails.
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a>;
}

/// Text fed to the summarizer for a repository.
pub fn project_context(repo: &RepoData) -> String {
    format!(
        "Project: {}\nDescription: {}\nLanguage: {}\nTopics: {}\n",
        repo.name,
        repo.description.as_deref().unwrap_or(""),
        repo.language.as_deref().unwrap_or(""),
        repo.topics.join(", ")
    )
}

/// Keep at most `max_chars` characters, cutting on a char boundary.
pub fn truncate_input(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Hosted summarizer when a token is configured, otherwise the offline one.
pub fn from_config(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    match config.token.as_deref().filter(|t| !t.is_empty()) {
        Some(_) => {
            tracing::info!("Using hosted summarizer model {}", config.model);
            Ok(Arc::new(HostedSummarizer::new(config)?))
        }
        None => {
            tracing::info!("No summarizer token configured; using offline lead summarizer");
            Ok(Arc::new(LeadSummarizer::new(config.max_summary_chars)))
        }
    }
}

/// Map an empty model answer to an upstream error.
pub(crate) fn non_empty_summary(summary: String) -> Result<String> {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        return Err(Error::upstream("Summarizer", 200, "empty summary"));
    }
    Ok(trimmed.to_string())
}
