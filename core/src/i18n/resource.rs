//! Localized resources: a default template plus per-language variants

use std::collections::HashMap;

use lr_shared::types::Language;
use serde::{Deserialize, Serialize};

use super::template::{Template, TemplateArgs};
use crate::errors::TemplateError;

/// Uncompiled resource as authored in a catalog file.
///
/// ```json
/// { "desc": "shown when login is locked", "default": "Locked", "map": { "zh": "已锁定" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Documentation for translators, never rendered
    #[serde(rename = "desc", default)]
    pub description: String,

    /// Fallback text used when no variant matches
    pub default: String,

    /// Language tag to text
    #[serde(rename = "map", default)]
    pub variants: HashMap<String, String>,
}

impl ResourceSpec {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_variant(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.variants.insert(tag.into(), text.into());
        self
    }

    /// Compile every template; `key` names them in errors (`key`, `key.<tag>`)
    pub fn compile(&self, key: &str) -> Result<LocalizedResource, TemplateError> {
        let mut resource = LocalizedResource::new(Template::parse(key, self.default.as_str())?)
            .with_description(self.description.clone());
        for (tag, text) in &self.variants {
            let template = Template::parse(format!("{}.{}", key, tag), text.as_str())?;
            resource = resource.with_variant(tag.clone(), template);
        }
        Ok(resource)
    }
}

/// One translatable message, compiled and ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedResource {
    description: String,
    default: Template,
    variants: HashMap<String, Template>,
}

impl LocalizedResource {
    pub fn new(default: Template) -> Self {
        Self {
            description: String::new(),
            default,
            variants: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_variant(mut self, tag: impl Into<String>, template: Template) -> Self {
        self.variants.insert(tag.into(), template);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_template(&self) -> &Template {
        &self.default
    }

    pub fn variant(&self, tag: &str) -> Option<&Template> {
        self.variants.get(tag)
    }

    pub fn variants(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.variants.iter().map(|(tag, t)| (tag.as_str(), t))
    }

    /// Template for the first language with an exact variant, else the default
    pub fn select(&self, languages: &[Language]) -> &Template {
        languages
            .iter()
            .find_map(|language| self.variants.get(&language.tag))
            .unwrap_or(&self.default)
    }

    /// Select a template for `languages` and render it with `args`
    pub fn resolve(&self, languages: &[Language], args: Option<&TemplateArgs>) -> String {
        self.select(languages).render(args)
    }
}

/// Resolve `resource` for a ranked preference list
pub fn resolve(resource: &LocalizedResource, languages: &[Language], args: Option<&TemplateArgs>) -> String {
    resource.resolve(languages, args)
}
