use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use git2::build::RepoBuilder;
use git2::FetchOptions;
use ignore::WalkBuilder;
use tempfile::TempDir;

use super::RepoRef;
use crate::analysis::SourceProvider;
use crate::core::{FileEntry, RepoData};
use crate::errors::Result;

const README_NAMES: &[&str] = &["README.md", "README.rst", "README.txt", "README", "readme.md"];

/// A working tree on local disk.
///
/// Clones live in a scratch directory that is removed when the checkout is
/// dropped, whichever way the request ends.
pub struct LocalCheckout {
    root: PathBuf,
    _scratch: Option<TempDir>,
}

impl LocalCheckout {
    pub fn clone_repo(repo: &RepoRef) -> Result<Self> {
        Self::clone_from_url(&repo.clone_url())
    }

    pub fn clone_from_url(url: &str) -> Result<Self> {
        Self::clone_into(&std::env::temp_dir(), url)
    }

    /// Clone into a fresh scratch directory under `parent`.
    ///
    /// On failure the scratch directory is removed before returning.
    pub fn clone_into(parent: &Path, url: &str) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("repodoc-")
            .tempdir_in(parent)?;

        let mut fetch = FetchOptions::new();
        if url.starts_with("http://") || url.starts_with("https://") {
            // Only history-free contents are needed
            fetch.depth(1);
        }

        tracing::info!("Cloning {} into {}", url, scratch.path().display());
        RepoBuilder::new()
            .fetch_options(fetch)
            .clone(url, scratch.path())?;

        Ok(Self {
            root: scratch.path().to_path_buf(),
            _scratch: Some(scratch),
        })
    }

    /// Use an existing directory as-is.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Not a directory: {}", path.display()),
            )
            .into());
        }

        Ok(Self {
            root: path.to_path_buf(),
            _scratch: None,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every file under the root except `.git` and gitignored paths, sorted by path.
    pub fn list_files(&self) -> Result<Vec<FileEntry>> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| io::Error::other(e.to_string()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Some(path) = relative_slash_path(&self.root, entry.path()) else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(FileEntry::file(path, size));
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Repository data for a directory that has no remote metadata.
    pub fn repo_data(&self) -> Result<RepoData> {
        let name = self
            .root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "repository".to_string());

        let readme = README_NAMES
            .iter()
            .find_map(|name| fs::read_to_string(self.root.join(name)).ok())
            .unwrap_or_default();

        Ok(RepoData {
            name,
            files: self.list_files()?,
            readme,
            ..RepoData::default()
        })
    }
}

impl SourceProvider for LocalCheckout {
    fn read_source(&self, path: &str) -> io::Result<String> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path escapes checkout: {}", path),
            ));
        }
        fs::read_to_string(self.root.join(relative))
    }
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}
