// Test utility module for repodoc integration tests
#![allow(dead_code)]

use repodoc::fetch::{FetchFuture, RepoRef, RepositoryFetcher};
use repodoc::{Error, FileEntry, RepoData};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fetcher that serves one canned repository for any valid URL.
pub struct StaticFetcher {
    repo: RepoData,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(repo: RepoData) -> Self {
        Self {
            repo,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RepositoryFetcher for StaticFetcher {
    fn fetch<'a>(&'a self, repo_url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            RepoRef::parse(repo_url)?;
            Ok(self.repo.clone())
        })
    }
}

/// Fetcher whose upstream always fails.
pub struct FailingFetcher;

impl RepositoryFetcher for FailingFetcher {
    fn fetch<'a>(&'a self, repo_url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            RepoRef::parse(repo_url)?;
            Err(Error::upstream("GitHub", 404, "Not Found"))
        })
    }
}

pub fn files(entries: &[(&str, u64)]) -> Vec<FileEntry> {
    entries
        .iter()
        .map(|(path, size)| FileEntry::file(*path, *size))
        .collect()
}

/// `acme/widget`: a small Python service with a JavaScript frontend.
pub fn widget_repo() -> RepoData {
    RepoData {
        name: "widget".into(),
        description: Some("Makes widgets".into()),
        owner: "acme".into(),
        stars: 42,
        forks: 3,
        language: None,
        topics: vec!["tools".into()],
        files: files(&[
            ("app.py", 100),
            ("src/index.js", 50),
            ("requirements.txt", 20),
        ]),
        ..RepoData::default()
    }
}
