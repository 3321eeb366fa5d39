//! # In-Memory Store
//!
//! Reference `DataStore` holding the whole tree behind one `RwLock`.
//! Creates are atomic with respect to concurrent creates of the same name.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use super::backend::{DataStore, StoreOptions};
use super::errors::{StoreError, StoreResult};

#[derive(Debug, Clone)]
enum Node {
    Entry {
        data: Vec<u8>,
        requestor: Option<String>,
    },
    Dir(BTreeMap<String, Node>),
}

/// In-memory hierarchical store
#[derive(Debug)]
pub struct MemoryStore {
    root: RwLock<Node>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::Dir(BTreeMap::new())),
        }
    }

    /// Requestor recorded by the last write of the entry at `path`
    pub fn requestor_of(&self, path: &[String]) -> Option<String> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        match walk(&root, path) {
            Ok(Node::Entry { requestor, .. }) => requestor.clone(),
            _ => None,
        }
    }
}

fn walk<'a>(root: &'a Node, path: &[String]) -> StoreResult<&'a Node> {
    let mut current = root;
    for segment in path {
        current = match current {
            Node::Dir(children) => children
                .get(segment)
                .ok_or_else(|| StoreError::NotFound(path.to_vec()))?,
            Node::Entry { .. } => return Err(StoreError::NotFound(path.to_vec())),
        };
    }
    Ok(current)
}

fn subtree_mut<'a>(
    root: &'a mut Node,
    path: &[String],
    create_dir: bool,
) -> StoreResult<&'a mut BTreeMap<String, Node>> {
    let mut current = match root {
        Node::Dir(children) => children,
        Node::Entry { .. } => return Err(StoreError::NotFound(path.to_vec())),
    };
    for segment in path {
        if create_dir && !current.contains_key(segment) {
            current.insert(segment.clone(), Node::Dir(BTreeMap::new()));
        }
        current = match current.get_mut(segment) {
            Some(Node::Dir(children)) => children,
            _ => return Err(StoreError::NotFound(path.to_vec())),
        };
    }
    Ok(current)
}

fn child_path(path: &[String], name: &str) -> Vec<String> {
    let mut full = path.to_vec();
    full.push(name.to_string());
    full
}

impl DataStore for MemoryStore {
    fn get(&self, path: &[String]) -> StoreResult<Vec<u8>> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        match walk(&root, path)? {
            Node::Entry { data, .. } => Ok(data.clone()),
            Node::Dir(_) => Err(StoreError::WrongKind {
                operation: "get",
                path: path.to_vec(),
            }),
        }
    }

    fn list(&self, path: &[String]) -> StoreResult<Vec<String>> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        match walk(&root, path)? {
            Node::Dir(children) => Ok(children.keys().cloned().collect()),
            Node::Entry { .. } => Err(StoreError::WrongKind {
                operation: "list",
                path: path.to_vec(),
            }),
        }
    }

    fn delete(&self, path: &[String], _options: &StoreOptions) -> StoreResult<()> {
        let (name, parent_path) = path.split_last().ok_or(StoreError::WrongKind {
            operation: "delete",
            path: Vec::new(),
        })?;

        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let parent = subtree_mut(&mut root, parent_path, false)
            .map_err(|_| StoreError::NotFound(path.to_vec()))?;
        match parent.get(name) {
            None => Err(StoreError::NotFound(path.to_vec())),
            Some(Node::Dir(_)) => Err(StoreError::WrongKind {
                operation: "delete",
                path: path.to_vec(),
            }),
            Some(Node::Entry { .. }) => {
                parent.remove(name);
                Ok(())
            }
        }
    }

    fn delete_dir(&self, path: &[String], options: &StoreOptions) -> StoreResult<()> {
        let (name, parent_path) = path.split_last().ok_or(StoreError::WrongKind {
            operation: "delete_dir",
            path: Vec::new(),
        })?;

        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let parent = subtree_mut(&mut root, parent_path, false)
            .map_err(|_| StoreError::NotFound(path.to_vec()))?;
        match parent.get(name) {
            None => Err(StoreError::NotFound(path.to_vec())),
            Some(Node::Entry { .. }) => Err(StoreError::WrongKind {
                operation: "delete_dir",
                path: path.to_vec(),
            }),
            Some(Node::Dir(children)) if !children.is_empty() && !options.recursive => {
                Err(StoreError::NotEmpty(path.to_vec()))
            }
            Some(Node::Dir(_)) => {
                parent.remove(name);
                Ok(())
            }
        }
    }

    fn set(&self, path: &[String], data: &[u8], options: &StoreOptions) -> StoreResult<()> {
        let (name, parent_path) = path.split_last().ok_or(StoreError::WrongKind {
            operation: "set",
            path: Vec::new(),
        })?;

        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let parent = subtree_mut(&mut root, parent_path, options.create_dir)
            .map_err(|_| StoreError::NotFound(path.to_vec()))?;
        match parent.get(name) {
            Some(Node::Dir(_)) => {
                return Err(StoreError::WrongKind {
                    operation: "set",
                    path: path.to_vec(),
                })
            }
            None if !options.create => return Err(StoreError::NotFound(path.to_vec())),
            _ => {}
        }
        parent.insert(
            name.clone(),
            Node::Entry {
                data: data.to_vec(),
                requestor: options.requestor.clone(),
            },
        );
        Ok(())
    }

    fn create(
        &self,
        path: &[String],
        name: &str,
        data: &[u8],
        options: &StoreOptions,
    ) -> StoreResult<()> {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let parent = subtree_mut(&mut root, path, options.create_dir)?;
        if parent.contains_key(name) {
            return Err(StoreError::AlreadyExists(child_path(path, name)));
        }
        parent.insert(
            name.to_string(),
            Node::Entry {
                data: data.to_vec(),
                requestor: options.requestor.clone(),
            },
        );
        Ok(())
    }

    fn create_dir(&self, path: &[String], name: &str, options: &StoreOptions) -> StoreResult<()> {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let parent = subtree_mut(&mut root, path, options.create_dir)?;
        if parent.contains_key(name) {
            return Err(StoreError::AlreadyExists(child_path(path, name)));
        }
        parent.insert(name.to_string(), Node::Dir(BTreeMap::new()));
        Ok(())
    }

    fn exists(&self, path: &[String]) -> bool {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        matches!(walk(&root, path), Ok(Node::Entry { .. }))
    }

    fn exists_dir(&self, path: &[String]) -> bool {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        matches!(walk(&root, path), Ok(Node::Dir(_)))
    }
}
