//! Data access facade
//!
//! One call per store primitive. Each maps the store's missing-resource and
//! name-collision signals to 404/409 protocol errors naming the rendered
//! URI, unless the caller passes `FailurePolicy::DataStoreExceptions` to get
//! the raw `StoreError` back.
//!
//! Deletes cascade into the resource's ACL companion. That second delete is
//! lossy: its outcome is logged and discarded.

use serde_json::Value;

use super::base::EndpointBase;
use super::errors::{EndpointError, EndpointResult};
use crate::observability::{log_event_with_fields, Event};
use crate::protocol::{ProtocolError, Request};
use crate::store::{StoreError, StoreOptions};

/// What a facade call does when the store reports missing/existing data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Map to 404/409 protocol errors
    #[default]
    Translate,
    /// Return the store's own error
    DataStoreExceptions,
}

/// Per-call options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessOptions {
    pub failure: FailurePolicy,
    /// Create missing parent subtrees
    pub create_dir: bool,
    /// Let `set` create a missing entry
    pub create: bool,
    /// Let `delete_subtree` remove non-empty subtrees
    pub recursive: bool,
}

impl AccessOptions {
    /// Options that hand store errors back untranslated
    pub fn data_store_exceptions() -> Self {
        Self {
            failure: FailurePolicy::DataStoreExceptions,
            ..Default::default()
        }
    }

    pub fn create_dir(mut self) -> Self {
        self.create_dir = true;
        self
    }

    pub fn create(mut self) -> Self {
        self.create = true;
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    fn store_options(&self, request: &Request) -> StoreOptions {
        StoreOptions {
            requestor: request.requestor().map(str::to_string),
            create_dir: self.create_dir,
            create: self.create,
            recursive: self.recursive,
        }
    }
}

/// Facade over the store, borrowed from an `EndpointBase`
#[derive(Debug, Clone, Copy)]
pub struct DataAccess<'a> {
    base: &'a EndpointBase,
}

impl<'a> DataAccess<'a> {
    pub(super) fn new(base: &'a EndpointBase) -> Self {
        Self { base }
    }

    /// Read the entry at `path` (default: the request path)
    pub fn get(
        &self,
        request: &Request,
        path: Option<&[String]>,
        options: &AccessOptions,
    ) -> EndpointResult<Vec<u8>> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .get(path)
            .map_err(|err| self.missing(err, options, "Object not found", request, path))
    }

    /// Read the entry at `path`, `None` if it does not exist
    pub fn get_opt(&self, request: &Request, path: Option<&[String]>) -> EndpointResult<Option<Vec<u8>>> {
        let path = path.unwrap_or(request.rest_path());
        match self.base.store().get(path) {
            Ok(data) => Ok(Some(data)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Names directly under the subtree at `path`
    pub fn list(
        &self,
        request: &Request,
        path: Option<&[String]>,
        options: &AccessOptions,
    ) -> EndpointResult<Vec<String>> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .list(path)
            .map_err(|err| self.missing(err, options, "Object not found", request, path))
    }

    /// Delete the entry at `path`, then its ACL companion
    pub fn delete(
        &self,
        request: &Request,
        path: Option<&[String]>,
        options: &AccessOptions,
    ) -> EndpointResult<()> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .delete(path, &options.store_options(request))
            .map_err(|err| self.missing(err, options, "Object not found", request, path))?;
        self.delete_companion(path);
        Ok(())
    }

    /// Delete the subtree at `path`, then its ACL companion
    pub fn delete_subtree(
        &self,
        request: &Request,
        path: Option<&[String]>,
        options: &AccessOptions,
    ) -> EndpointResult<()> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .delete_dir(path, &options.store_options(request))
            .map_err(|err| self.missing(err, options, "Object not found", request, path))?;
        self.delete_companion(path);
        Ok(())
    }

    /// Overwrite the entry at `path`, tagged with the requestor
    pub fn set(
        &self,
        request: &Request,
        path: Option<&[String]>,
        data: &[u8],
        options: &AccessOptions,
    ) -> EndpointResult<()> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .set(path, data, &options.store_options(request))
            .map_err(|err| self.missing(err, options, "Object not found", request, path))
    }

    /// Create entry `name` under `path`
    pub fn create_entry(
        &self,
        request: &Request,
        path: Option<&[String]>,
        name: &str,
        data: &[u8],
        options: &AccessOptions,
    ) -> EndpointResult<()> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .create(path, name, data, &options.store_options(request))
            .map_err(|err| self.create_failed(err, options, request, path, name))
    }

    /// Create subtree `name` under `path`
    pub fn create_subtree(
        &self,
        request: &Request,
        path: Option<&[String]>,
        name: &str,
        options: &AccessOptions,
    ) -> EndpointResult<()> {
        let path = path.unwrap_or(request.rest_path());
        self.base
            .store()
            .create_dir(path, name, &options.store_options(request))
            .map_err(|err| self.create_failed(err, options, request, path, name))
    }

    /// Whether an entry exists at `path`
    pub fn exists(&self, request: &Request, path: Option<&[String]>) -> bool {
        self.base.store().exists(path.unwrap_or(request.rest_path()))
    }

    /// Whether a subtree exists at `path`
    pub fn exists_subtree(&self, request: &Request, path: Option<&[String]>) -> bool {
        self.base.store().exists_dir(path.unwrap_or(request.rest_path()))
    }

    /// Decoded JSON at `path`, or `fallback` when there is no entry
    pub fn get_or_default(
        &self,
        request: &Request,
        path: Option<&[String]>,
        fallback: Value,
    ) -> EndpointResult<Value> {
        if !self.exists(request, path) {
            return Ok(fallback);
        }
        let data = self.get(request, path, &AccessOptions::default())?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Names under `path`, or `fallback` when there is no subtree
    pub fn list_or_default(
        &self,
        request: &Request,
        path: Option<&[String]>,
        fallback: Vec<String>,
    ) -> EndpointResult<Vec<String>> {
        if !self.exists_subtree(request, path) {
            return Ok(fallback);
        }
        self.list(request, path, &AccessOptions::default())
    }

    fn delete_companion(&self, path: &[String]) {
        let Some(acl_path) = self.base.acl_paths().companion_path(path) else {
            return;
        };
        if let Err(err) = self.base.store().delete(&acl_path, &StoreOptions::default()) {
            let acl = acl_path.join("/");
            let reason = err.to_string();
            log_event_with_fields(
                Event::CompanionDeleteSkipped,
                &[("acl_path", &acl), ("reason", &reason)],
            );
        }
    }

    fn missing(
        &self,
        err: StoreError,
        options: &AccessOptions,
        what: &str,
        request: &Request,
        path: &[String],
    ) -> EndpointError {
        match (err, options.failure) {
            (StoreError::NotFound(_), FailurePolicy::Translate) => {
                let uri = self.base.build_uri(request.base_uri(), path);
                ProtocolError::not_found(format!("{}: {}", what, uri)).into()
            }
            (err, _) => err.into(),
        }
    }

    fn create_failed(
        &self,
        err: StoreError,
        options: &AccessOptions,
        request: &Request,
        path: &[String],
        name: &str,
    ) -> EndpointError {
        match (err, options.failure) {
            (StoreError::AlreadyExists(_), FailurePolicy::Translate) => {
                let mut child = path.to_vec();
                child.push(name.to_string());
                let uri = self.base.build_uri(request.base_uri(), &child);
                ProtocolError::conflict(format!("Object already exists: {}", uri)).into()
            }
            (err, _) => self.missing(err, options, "Parent not found", request, path),
        }
    }
}
