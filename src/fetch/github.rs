//! GitHub REST API adapter for the [`RepositoryFetcher`] port.

use std::collections::VecDeque;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{FetchFuture, RepoRef, RepositoryFetcher};
use crate::config::GitHubConfig;
use crate::core::{EntryType, FileEntry, RepoData};
use crate::errors::{Error, Result};

const USER_AGENT: &str = concat!("repodoc/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Live fetcher that reads repositories from the GitHub REST API.
pub struct GitHubFetcher {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

/// Repository metadata returned by `GET /repos/{owner}/{repo}`.
#[derive(Deserialize)]
struct RepoResponse {
    name: String,
    description: Option<String>,
    owner: OwnerResponse,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    language: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Deserialize)]
struct OwnerResponse {
    login: String,
}

/// One item of a directory listing from `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Deserialize)]
struct ContentItem {
    path: String,
    #[serde(default)]
    size: u64,
    #[serde(rename = "type")]
    item_type: String,
}

#[derive(Deserialize)]
struct ReadmeResponse {
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl GitHubFetcher {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| Error::Config(format!("Invalid GitHub API URL {}: {}", config.api_base, e)))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base,
            token: config.token.clone(),
        })
    }

    /// Fresh walk over every file of `repo`.
    pub fn files(&self, repo: &RepoRef) -> ContentsWalker<'_> {
        ContentsWalker::new(self, repo.clone())
    }

    pub async fn fetch_repository(&self, repo_url: &str) -> Result<RepoData> {
        let repo = RepoRef::parse(repo_url)?;
        tracing::info!("Fetching repository {}", repo);

        let meta: RepoResponse = self
            .get_json(&self.api_url(&["repos", &repo.owner, &repo.name])?)
            .await?;
        let files = self.files(&repo).collect_all().await?;
        let readme = self.readme(&repo).await;

        tracing::debug!("Fetched {} files from {}", files.len(), repo);

        Ok(RepoData {
            name: meta.name,
            description: meta.description,
            owner: meta.owner.login,
            stars: meta.stargazers_count,
            forks: meta.forks_count,
            language: meta.language,
            topics: meta.topics,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
            files,
            readme,
        })
    }

    /// Decoded README text, or empty when the repository has none.
    pub async fn readme(&self, repo: &RepoRef) -> String {
        let url = match self.api_url(&["repos", &repo.owner, &repo.name, "readme"]) {
            Ok(url) => url,
            Err(_) => return String::new(),
        };

        match self.get_json::<ReadmeResponse>(&url).await {
            Ok(readme) => decode_content(&readme.content).unwrap_or_else(|| {
                tracing::debug!("README of {} is not valid base64 UTF-8", repo);
                String::new()
            }),
            Err(e) => {
                tracing::debug!("No README for {}: {}", repo, e);
                String::new()
            }
        }
    }

    async fn list_dir(&self, repo: &RepoRef, dir: &str) -> Result<Vec<ContentItem>> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "contents"];
        segments.extend(dir.split('/').filter(|s| !s.is_empty()));
        let mut url = self.api_url(&segments)?;
        if dir.is_empty() {
            // Root listing is `/contents/`
            let root = format!("{}/", url.path());
            url.set_path(&root);
        }
        self.get_json(&url).await
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("GitHub API URL cannot be a base: {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self
            .authorize(self.client.get(url.clone()).header("Accept", ACCEPT))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(Error::upstream("GitHub", status.as_u16(), message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl RepositoryFetcher for GitHubFetcher {
    fn fetch<'a>(&'a self, repo_url: &'a str) -> FetchFuture<'a> {
        Box::pin(self.fetch_repository(repo_url))
    }
}

/// Breadth-first walk over a repository's directory listings.
///
/// Owns its traversal state; directories are listed lazily as the walk
/// reaches them. Ask [`GitHubFetcher::files`] for a new walker to restart.
pub struct ContentsWalker<'a> {
    fetcher: &'a GitHubFetcher,
    repo: RepoRef,
    pending_dirs: VecDeque<String>,
    ready: VecDeque<FileEntry>,
}

impl<'a> ContentsWalker<'a> {
    fn new(fetcher: &'a GitHubFetcher, repo: RepoRef) -> Self {
        Self {
            fetcher,
            repo,
            pending_dirs: VecDeque::from([String::new()]),
            ready: VecDeque::new(),
        }
    }

    /// Next file of the walk, `None` once every directory is exhausted.
    ///
    /// A listing failure is yielded once and ends the walk.
    pub async fn next(&mut self) -> Option<Result<FileEntry>> {
        loop {
            if let Some(entry) = self.ready.pop_front() {
                return Some(Ok(entry));
            }

            let dir = self.pending_dirs.pop_front()?;
            match self.fetcher.list_dir(&self.repo, &dir).await {
                Ok(items) => self.enqueue(items),
                Err(e) => {
                    self.pending_dirs.clear();
                    return Some(Err(e));
                }
            }
        }
    }

    pub async fn collect_all(mut self) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();
        while let Some(entry) = self.next().await {
            files.push(entry?);
        }
        Ok(files)
    }

    fn enqueue(&mut self, items: Vec<ContentItem>) {
        for item in items {
            if item.item_type == "dir" {
                self.pending_dirs.push_back(item.path);
            } else {
                self.ready.push_back(FileEntry {
                    path: item.path,
                    size: item.size,
                    entry_type: EntryType::File,
                });
            }
        }
    }
}

/// Decode GitHub's line-wrapped base64 file content.
fn decode_content(content: &str) -> Option<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(api_base: &str) -> GitHubFetcher {
        GitHubFetcher::new(&GitHubConfig {
            api_base: api_base.to_string(),
            ..GitHubConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_decode_wrapped_base64() {
        assert_eq!(decode_content("IyBXaWRn\nZXQK\n").as_deref(), Some("# Widget\n"));
        assert_eq!(decode_content("!!!"), None);
    }

    #[test]
    fn test_api_url_joins_segments_onto_base() {
        let f = fetcher("https://ghe.example.com/api/v3");
        let url = f.api_url(&["repos", "acme", "widget"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/acme/widget");
    }

    #[test]
    fn test_api_url_encodes_segments() {
        let f = fetcher("https://api.github.com");
        let url = f
            .api_url(&["repos", "acme", "widget", "contents", "my docs"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widget/contents/my%20docs"
        );
    }

    #[test]
    fn test_invalid_api_base_is_config_error() {
        let result = GitHubFetcher::new(&GitHubConfig {
            api_base: "not a url".into(),
            ..GitHubConfig::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
