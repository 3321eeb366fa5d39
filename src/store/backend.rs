//! # Data Store Trait

use super::errors::StoreResult;

/// Flags passed through to the store on mutating calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Identity recorded against written entries
    pub requestor: Option<String>,

    /// Create missing parent subtrees instead of failing with `NotFound`
    pub create_dir: bool,

    /// Allow `set` to create an entry that does not exist yet
    pub create: bool,

    /// Allow `delete_dir` on a non-empty subtree
    pub recursive: bool,
}

impl StoreOptions {
    /// Options carrying only a requestor
    pub fn for_requestor(requestor: Option<&str>) -> Self {
        Self {
            requestor: requestor.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Hierarchical data store
///
/// Paths are segment sequences. A node is either an entry (opaque bytes) or a
/// subtree (named children). Implementations serialize access per path
/// themselves; callers add no locking.
pub trait DataStore: Send + Sync + std::fmt::Debug {
    /// Read the entry at `path`
    fn get(&self, path: &[String]) -> StoreResult<Vec<u8>>;

    /// Names directly under the subtree at `path`, sorted
    fn list(&self, path: &[String]) -> StoreResult<Vec<String>>;

    /// Remove the entry at `path`
    fn delete(&self, path: &[String], options: &StoreOptions) -> StoreResult<()>;

    /// Remove the subtree at `path`
    fn delete_dir(&self, path: &[String], options: &StoreOptions) -> StoreResult<()>;

    /// Overwrite the entry at `path`
    fn set(&self, path: &[String], data: &[u8], options: &StoreOptions) -> StoreResult<()>;

    /// Create entry `name` under the subtree at `path`
    fn create(
        &self,
        path: &[String],
        name: &str,
        data: &[u8],
        options: &StoreOptions,
    ) -> StoreResult<()>;

    /// Create subtree `name` under the subtree at `path`
    fn create_dir(&self, path: &[String], name: &str, options: &StoreOptions) -> StoreResult<()>;

    /// Whether an entry exists at `path`
    fn exists(&self, path: &[String]) -> bool;

    /// Whether a subtree exists at `path`
    fn exists_dir(&self, path: &[String]) -> bool;
}
