//! Placeholder templates for localized messages.
//!
//! A template is plain text with `{{.name}}` placeholders. Nested values are
//! addressed with dotted paths (`{{.user.name}}`) and whitespace inside the
//! braces is ignored. Templates are compiled once, when a resource is
//! registered, so rendering never fails.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::errors::TemplateError;

/// Arguments substituted into template placeholders
pub type TemplateArgs = HashMap<String, Value>;

/// Text rendered for a placeholder with no matching argument
pub const NO_VALUE: &str = "<no value>";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(Vec<String>),
}

/// A compiled message template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `source`; `name` only identifies the template in errors
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, TemplateError> {
        let name = name.into();
        let source = source.into();
        let segments = compile(&name, &source)?;
        Ok(Self {
            name,
            source,
            segments,
        })
    }

    /// A template rendered verbatim, `{{` included
    pub fn literal(name: impl Into<String>, text: impl Into<String>) -> Self {
        let source = text.into();
        let segments = if source.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Literal(source.clone())]
        };
        Self {
            name: name.into(),
            source,
            segments,
        }
    }

    /// Template name, usually the catalog key it was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uncompiled template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the template contains any placeholder
    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(_)))
    }

    /// Render against `args`; missing arguments render as [`NO_VALUE`]
    pub fn render(&self, args: Option<&TemplateArgs>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(path) => match args.and_then(|a| lookup(a, path)) {
                    Some(Value::String(s)) => out.push_str(s),
                    Some(Value::Null) | None => out.push_str(NO_VALUE),
                    Some(other) => out.push_str(&other.to_string()),
                },
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compile(name: &str, source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }

        let after_open = &rest[start + OPEN.len()..];
        let end = after_open.find(CLOSE).ok_or_else(|| TemplateError::Unclosed {
            name: name.to_string(),
            offset: offset + start,
        })?;

        let path = placeholder_path(name, after_open[..end].trim(), offset + start)?;
        segments.push(Segment::Placeholder(path));

        let consumed = start + OPEN.len() + end + CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}

fn placeholder_path(name: &str, inner: &str, offset: usize) -> Result<Vec<String>, TemplateError> {
    let field = match inner.strip_prefix('.') {
        Some(field) if !field.is_empty() => field,
        _ if inner.is_empty() || inner == "." => {
            return Err(TemplateError::EmptyPlaceholder {
                name: name.to_string(),
                offset,
            })
        }
        _ => {
            return Err(TemplateError::InvalidPlaceholder {
                name: name.to_string(),
                placeholder: inner.to_string(),
            })
        }
    };

    let path: Vec<String> = field.split('.').map(str::to_string).collect();
    let valid = path.iter().all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    });
    if !valid {
        return Err(TemplateError::InvalidPlaceholder {
            name: name.to_string(),
            placeholder: inner.to_string(),
        });
    }
    Ok(path)
}

fn lookup<'a>(args: &'a TemplateArgs, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(args.get(first)?, |value, key| value.get(key.as_str()))
}
