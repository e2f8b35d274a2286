//! Process-wide resource catalog.
//!
//! The catalog has two phases. During startup a [`CatalogBuilder`] collects
//! built-in and caller-supplied resources; [`CatalogBuilder::build`] freezes
//! them into an immutable [`Catalog`] that is cheap to clone and safe to read
//! from any number of threads. [`install`] publishes one catalog for the whole
//! process. The first call to [`global`] also freezes the global slot, so a
//! late [`install`] fails instead of racing readers.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lr_shared::types::Language;
use once_cell::sync::OnceCell;

use super::builtin;
use super::resource::{LocalizedResource, ResourceSpec};
use super::template::TemplateArgs;
use crate::errors::CatalogError;

static GLOBAL: OnceCell<Catalog> = OnceCell::new();

/// Identifier of a catalog resource, `prefix.id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Cow<'static, str>);

impl ResourceId {
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Identifier of `id` registered under `prefix`
    pub fn scoped(prefix: &str, id: &str) -> Self {
        Self::new(scoped_key(prefix, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ResourceId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn scoped_key(prefix: &str, id: &str) -> String {
    format!("{}.{}", prefix, id)
}

/// Mutable catalog used during startup
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    entries: HashMap<String, Arc<LocalizedResource>>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// A builder seeded with the built-in resources
    pub fn new() -> Self {
        let entries = builtin::resources()
            .into_iter()
            .map(|(id, resource)| (id.as_str().to_string(), Arc::new(resource)))
            .collect();
        Self { entries }
    }

    /// Compile and register `spec` under `prefix.id`
    pub fn register(&mut self, prefix: &str, id: &str, spec: &ResourceSpec) -> Result<&mut Self, CatalogError> {
        let key = scoped_key(prefix, id);
        self.ensure_vacant(&key)?;
        let resource = spec.compile(&key)?;
        self.entries.insert(key, Arc::new(resource));
        Ok(self)
    }

    /// Register an already compiled resource under `prefix.id`
    pub fn register_resource(
        &mut self,
        prefix: &str,
        id: &str,
        resource: LocalizedResource,
    ) -> Result<&mut Self, CatalogError> {
        let key = scoped_key(prefix, id);
        self.ensure_vacant(&key)?;
        self.entries.insert(key, Arc::new(resource));
        Ok(self)
    }

    /// Like [`register`](Self::register) but panics on a configuration error
    pub fn must_register(&mut self, prefix: &str, id: &str, spec: &ResourceSpec) -> &mut Self {
        if let Err(err) = self.register(prefix, id, spec) {
            panic!("resource catalog misconfigured: {}", err);
        }
        self
    }

    /// Register every `(id, spec)` under `prefix`.
    ///
    /// All entries are compiled and checked for collisions, against the
    /// catalog and against each other, before any of them is inserted. On
    /// error the builder is left untouched.
    pub fn register_all<I, K>(&mut self, prefix: &str, specs: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = (K, ResourceSpec)>,
        K: AsRef<str>,
    {
        let mut staged: HashMap<String, Arc<LocalizedResource>> = HashMap::new();
        for (id, spec) in specs {
            let key = scoped_key(prefix, id.as_ref());
            if staged.contains_key(&key) {
                return Err(CatalogError::DuplicateKey { key });
            }
            self.ensure_vacant(&key)?;
            let resource = spec.compile(&key)?;
            staged.insert(key, Arc::new(resource));
        }

        let count = staged.len();
        self.entries.extend(staged);
        tracing::debug!(prefix, resources = count, "registered catalog resources");
        Ok(count)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the builder into a read-only catalog
    pub fn build(self) -> Catalog {
        Catalog {
            entries: Arc::new(self.entries),
        }
    }

    fn ensure_vacant(&self, key: &str) -> Result<(), CatalogError> {
        if self.entries.contains_key(key) {
            return Err(CatalogError::DuplicateKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

/// Frozen, thread-safe resource catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<HashMap<String, Arc<LocalizedResource>>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// A catalog holding only the built-in resources
    pub fn builtin() -> Self {
        CatalogBuilder::new().build()
    }

    pub fn resource(&self, id: &str) -> Option<Arc<LocalizedResource>> {
        self.entries.get(id).cloned()
    }

    /// Look up a resource that must exist.
    ///
    /// # Panics
    ///
    /// Panics when `id` is not registered. Identifiers are fixed when the
    /// catalog is authored; validate them at startup with
    /// [`checked_id`](Self::checked_id).
    pub fn must_resource(&self, id: &str) -> Arc<LocalizedResource> {
        match self.resource(id) {
            Some(resource) => resource,
            None => {
                tracing::error!(resource = id, "unregistered resource requested");
                panic!("resource `{}` is not registered", id)
            }
        }
    }

    /// Validate that `id` is registered
    pub fn checked_id(&self, id: impl Into<ResourceId>) -> Result<ResourceId, CatalogError> {
        let id = id.into();
        if self.contains(id.as_str()) {
            Ok(id)
        } else {
            Err(CatalogError::UnknownResource {
                id: id.as_str().to_string(),
            })
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Resolve `id` for `languages`, `None` when it is not registered
    pub fn string(&self, id: &str, languages: &[Language], args: Option<&TemplateArgs>) -> Option<String> {
        self.entries.get(id).map(|r| r.resolve(languages, args))
    }

    /// Resolve a resource that must exist; panics like [`must_resource`](Self::must_resource)
    pub fn must_string(&self, id: &str, languages: &[Language], args: Option<&TemplateArgs>) -> String {
        self.must_resource(id).resolve(languages, args)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers, unordered
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Publish `catalog` as the process-wide catalog.
///
/// Fails with [`CatalogError::AlreadyInstalled`] once a catalog was installed
/// or [`global`] was read.
pub fn install(catalog: Catalog) -> Result<(), CatalogError> {
    let resources = catalog.len();
    GLOBAL
        .set(catalog)
        .map_err(|_| CatalogError::AlreadyInstalled)?;
    tracing::info!(resources, "resource catalog installed");
    Ok(())
}

/// The process-wide catalog; the built-ins when nothing was installed
pub fn global() -> &'static Catalog {
    GLOBAL.get_or_init(|| {
        tracing::debug!("no resource catalog installed, using built-in resources");
        Catalog::builtin()
    })
}
