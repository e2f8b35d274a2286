//! Localized message resources.
//!
//! - `template` - `{{.name}}` placeholder templates
//! - `resource` - default text plus per-language variants, and selection
//! - `catalog` - the builder/frozen catalog pair and the process-wide slot
//! - `builtin` - resources every catalog starts with
//! - `loader` - JSON and TOML catalog files

pub mod builtin;
pub mod catalog;
pub mod loader;
pub mod resource;
pub mod template;

pub use builtin::{UNKNOWN_CODE, UNKNOWN_ERROR};
pub use catalog::{global, install, Catalog, CatalogBuilder, ResourceId};
pub use resource::{resolve, LocalizedResource, ResourceSpec};
pub use template::{Template, TemplateArgs, NO_VALUE};
