use crate::core::FileEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directory tree of a repository.
///
/// Serializes as `{"name", "type": "directory", "children": {...}}` or
/// `{"name", "type": "file", "size"}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Directory {
        name: String,
        children: BTreeMap<String, Node>,
    },
    File {
        name: String,
        size: u64,
    },
}

impl Node {
    pub fn directory(name: impl Into<String>) -> Self {
        Node::Directory {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Directory { name, .. } | Node::File { name, .. } => name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Directory { children, .. } => Some(children),
            Node::File { .. } => None,
        }
    }

    /// Follow a slash-separated path from this node.
    pub fn get(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |node, part| node.children()?.get(part))
    }

    /// Insert a file, creating intermediate directories as needed.
    ///
    /// A file standing where a directory is needed is replaced by the
    /// directory.
    pub fn insert_file(&mut self, path: &str, size: u64) {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let Some(file_name) = parts.pop() else {
            return;
        };

        let mut current: &mut Node = self;
        for part in parts {
            current = match current {
                Node::Directory { children, .. } => {
                    let child = children
                        .entry(part.to_string())
                        .or_insert_with(|| Node::directory(part));
                    if child.is_file() {
                        *child = Node::directory(part);
                    }
                    child
                }
                Node::File { .. } => return,
            };
        }

        if let Node::Directory { children, .. } = current {
            children.insert(
                file_name.to_string(),
                Node::File {
                    name: file_name.to_string(),
                    size,
                },
            );
        }
    }
}

/// `{"root": Node}` wrapper returned to clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectStructure {
    pub root: Node,
}

pub fn build_tree(repo_name: &str, files: &[FileEntry]) -> ProjectStructure {
    let mut root = Node::directory(repo_name);
    for file in files.iter().filter(|f| f.is_file()) {
        root.insert_file(&file.path, file.size);
    }
    ProjectStructure { root }
}
