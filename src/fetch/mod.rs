//! Repository sources.
//!
//! - [`GitHubFetcher`]: metadata and file listing over the GitHub REST API.
//! - [`LocalCheckout`]: a cloned or existing working tree that can also
//!   serve file contents for complexity estimation.

pub mod github;
pub mod local;

use crate::core::RepoData;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub use github::{ContentsWalker, GitHubFetcher};
pub use local::LocalCheckout;

/// Boxed future type alias used by [`RepositoryFetcher`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<RepoData>> + Send + 'a>>;

/// Produces [`RepoData`] for a repository URL.
pub trait RepositoryFetcher: Send + Sync {
    /// Fetch metadata, file listing and README text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRepoUrl`] when the URL is not a repository reference;
    /// upstream errors when the remote API fails.
    fn fetch<'a>(&'a self, repo_url: &'a str) -> FetchFuture<'a>;
}

static REPO_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)").unwrap());

/// `owner/name` pair extracted from a repository URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Find `github.com/<owner>/<repo>` anywhere in `url`.
    ///
    /// A trailing `.git` on the repository name is dropped.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidRepoUrl {
            url: url.to_string(),
        };

        let captures = REPO_URL.captures(url).ok_or_else(invalid)?;
        let owner = captures[1].to_string();
        let raw_name = &captures[2];
        let name = raw_name.strip_suffix(".git").unwrap_or(raw_name).to_string();

        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self { owner, name })
    }

    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
