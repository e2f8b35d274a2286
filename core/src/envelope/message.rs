//! Message sources stored on an envelope.
//!
//! Both messages are resolved lazily, every time they are read.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use lr_shared::types::Language;

use crate::i18n::{builtin, Catalog, LocalizedResource, ResourceId, TemplateArgs};

/// Shared, type-erased error used as an envelope cause
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

type Producer = Arc<dyn Fn() -> String + Send + Sync>;
type CauseProducer = Arc<dyn Fn(Option<&(dyn StdError + 'static)>) -> String + Send + Sync>;
type LanguageProducer = Arc<dyn Fn(&[Language]) -> String + Send + Sync>;
type Displayable = Arc<dyn fmt::Display + Send + Sync>;

/// Message written to logs
#[derive(Clone, Default)]
pub enum InternalMessage {
    /// Use the cause's message, or `"nil"` without a cause
    #[default]
    Absent,
    Text(Cow<'static, str>),
    Producer(Producer),
    /// Called with the envelope's cause
    FromCause(CauseProducer),
    /// Any displayable value, formatted on demand
    Display(Displayable),
}

impl InternalMessage {
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        InternalMessage::Text(text.into())
    }

    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        InternalMessage::Producer(Arc::new(f))
    }

    pub fn from_cause<F>(f: F) -> Self
    where
        F: Fn(Option<&(dyn StdError + 'static)>) -> String + Send + Sync + 'static,
    {
        InternalMessage::FromCause(Arc::new(f))
    }

    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        InternalMessage::Display(Arc::new(value))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, InternalMessage::Absent)
    }

    /// `None` for [`InternalMessage::Absent`]
    pub(crate) fn resolve(&self, cause: Option<&(dyn StdError + 'static)>) -> Option<String> {
        match self {
            InternalMessage::Absent => None,
            InternalMessage::Text(text) => Some(text.to_string()),
            InternalMessage::Producer(f) => Some(f()),
            InternalMessage::FromCause(f) => Some(f(cause)),
            InternalMessage::Display(value) => Some(value.to_string()),
        }
    }
}

impl fmt::Debug for InternalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalMessage::Absent => f.write_str("Absent"),
            InternalMessage::Text(text) => f.debug_tuple("Text").field(text).finish(),
            InternalMessage::Producer(_) => f.write_str("Producer(..)"),
            InternalMessage::FromCause(_) => f.write_str("FromCause(..)"),
            InternalMessage::Display(value) => write!(f, "Display({})", value),
        }
    }
}

impl From<&'static str> for InternalMessage {
    fn from(text: &'static str) -> Self {
        InternalMessage::text(text)
    }
}

impl From<String> for InternalMessage {
    fn from(text: String) -> Self {
        InternalMessage::text(text)
    }
}

/// Message returned to the client
#[derive(Clone, Default)]
pub enum ResponseMessage {
    /// Resolves to the built-in unknown-error resource
    #[default]
    Absent,
    Text(Cow<'static, str>),
    Producer(Producer),
    /// Called with the client's ranked languages
    ForLanguages(LanguageProducer),
    Resource {
        resource: Arc<LocalizedResource>,
        args: Option<Arc<TemplateArgs>>,
    },
    /// Looked up in the catalog at resolution time
    ResourceId {
        id: ResourceId,
        args: Option<Arc<TemplateArgs>>,
    },
    Display(Displayable),
}

impl ResponseMessage {
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        ResponseMessage::Text(text.into())
    }

    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        ResponseMessage::Producer(Arc::new(f))
    }

    pub fn for_languages<F>(f: F) -> Self
    where
        F: Fn(&[Language]) -> String + Send + Sync + 'static,
    {
        ResponseMessage::ForLanguages(Arc::new(f))
    }

    pub fn resource(resource: impl Into<Arc<LocalizedResource>>) -> Self {
        ResponseMessage::Resource {
            resource: resource.into(),
            args: None,
        }
    }

    pub fn resource_id(id: impl Into<ResourceId>) -> Self {
        ResponseMessage::ResourceId {
            id: id.into(),
            args: None,
        }
    }

    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        ResponseMessage::Display(Arc::new(value))
    }

    /// Attach template arguments; no effect on non-resource messages
    pub fn with_args(self, args: TemplateArgs) -> Self {
        let args = Some(Arc::new(args));
        match self {
            ResponseMessage::Resource { resource, .. } => ResponseMessage::Resource { resource, args },
            ResponseMessage::ResourceId { id, .. } => ResponseMessage::ResourceId { id, args },
            other => other,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ResponseMessage::Absent)
    }

    /// Resolve for `languages` against `catalog`.
    ///
    /// # Panics
    ///
    /// Panics when a [`ResponseMessage::ResourceId`] names a resource that
    /// is not registered in `catalog`.
    pub fn resolve(&self, catalog: &Catalog, languages: &[Language]) -> String {
        match self {
            ResponseMessage::Absent => {
                catalog.must_string(builtin::UNKNOWN_ERROR.as_str(), languages, None)
            }
            ResponseMessage::Text(text) => text.to_string(),
            ResponseMessage::Producer(f) => f(),
            ResponseMessage::ForLanguages(f) => f(languages),
            ResponseMessage::Resource { resource, args } => {
                resource.resolve(languages, args.as_deref())
            }
            ResponseMessage::ResourceId { id, args } => {
                catalog.must_string(id.as_str(), languages, args.as_deref())
            }
            ResponseMessage::Display(value) => value.to_string(),
        }
    }
}

impl fmt::Debug for ResponseMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseMessage::Absent => f.write_str("Absent"),
            ResponseMessage::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ResponseMessage::Producer(_) => f.write_str("Producer(..)"),
            ResponseMessage::ForLanguages(_) => f.write_str("ForLanguages(..)"),
            ResponseMessage::Resource { resource, .. } => f
                .debug_tuple("Resource")
                .field(&resource.default_template().name())
                .finish(),
            ResponseMessage::ResourceId { id, .. } => f.debug_tuple("ResourceId").field(id).finish(),
            ResponseMessage::Display(value) => write!(f, "Display({})", value),
        }
    }
}

impl From<&'static str> for ResponseMessage {
    fn from(text: &'static str) -> Self {
        ResponseMessage::text(text)
    }
}

impl From<String> for ResponseMessage {
    fn from(text: String) -> Self {
        ResponseMessage::text(text)
    }
}

impl From<LocalizedResource> for ResponseMessage {
    fn from(resource: LocalizedResource) -> Self {
        ResponseMessage::resource(resource)
    }
}

impl From<Arc<LocalizedResource>> for ResponseMessage {
    fn from(resource: Arc<LocalizedResource>) -> Self {
        ResponseMessage::resource(resource)
    }
}

impl From<ResourceId> for ResponseMessage {
    fn from(id: ResourceId) -> Self {
        ResponseMessage::resource_id(id)
    }
}
