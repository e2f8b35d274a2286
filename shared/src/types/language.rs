//! Language preference types and Accept-Language parsing

use serde::{Deserialize, Serialize};

/// Weight assumed for a language listed without a `q=` parameter
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// A single weighted language preference, e.g. `fr;q=0.8`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Language tag exactly as the client sent it (`en`, `zh-CN`, `zh_CN`, ...)
    pub tag: String,

    /// Preference weight, conceptually in `[0, 1]`
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl Language {
    /// Create a preference with the default weight
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Create a preference with an explicit weight
    pub fn weighted(tag: impl Into<String>, weight: f32) -> Self {
        Self {
            tag: tag.into(),
            weight,
        }
    }

    /// Parse an Accept-Language header into a ranked preference list
    pub fn parse_header(header: &str) -> Vec<Language> {
        parse_accept_language(header)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.weight == DEFAULT_WEIGHT {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{};q={}", self.tag, self.weight)
        }
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        Language::new(tag)
    }
}

fn default_weight() -> f32 {
    DEFAULT_WEIGHT
}

/// Parse an Accept-Language header value.
///
/// Entries are sorted by descending weight; entries with equal weight keep
/// the order in which the client listed them. Entries with an empty tag or a
/// weight that is not a finite `q=<float>` are dropped. Never fails: an empty
/// or garbage header yields an empty list.
///
/// ```
/// use lr_shared::types::language::{parse_accept_language, Language};
///
/// let languages = parse_accept_language("en;q=0.9, zh, fr;q= 0.8");
/// assert_eq!(
///     languages,
///     vec![
///         Language::weighted("zh", 1.0),
///         Language::weighted("en", 0.9),
///         Language::weighted("fr", 0.8),
///     ]
/// );
/// ```
pub fn parse_accept_language(header: &str) -> Vec<Language> {
    let mut languages: Vec<Language> = header.split(',').filter_map(parse_segment).collect();

    // `sort_by` is stable, so equal weights keep their listed order
    languages.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    languages
}

fn parse_segment(segment: &str) -> Option<Language> {
    let compact: String = segment.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parts = compact.split(';');

    let tag = parts.next().unwrap_or_default();
    if tag.is_empty() {
        return None;
    }

    let weight = match parts.next() {
        None => DEFAULT_WEIGHT,
        Some(param) => parse_weight(param)?,
    };

    Some(Language::weighted(tag, weight))
}

fn parse_weight(param: &str) -> Option<f32> {
    let value = param.strip_prefix("q=")?;
    value.parse::<f32>().ok().filter(|w| w.is_finite())
}

/// Tags of a preference list in ranked order
pub fn tags(languages: &[Language]) -> impl Iterator<Item = &str> {
    languages.iter().map(|l| l.tag.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranked_header() {
        let languages = parse_accept_language("en;q=0.9, zh, fr;q= 0.8");
        assert_eq!(
            languages,
            vec![
                Language::weighted("zh", 1.0),
                Language::weighted("en", 0.9),
                Language::weighted("fr", 0.8),
            ]
        );
    }

    #[test]
    fn test_unparseable_weight_drops_entry() {
        assert!(parse_accept_language("en;q=se").is_empty());
        assert_eq!(
            parse_accept_language("en;q=se, de;q=0.5"),
            vec![Language::weighted("de", 0.5)]
        );
    }

    #[test]
    fn test_weight_without_q_prefix_is_malformed() {
        assert!(parse_accept_language("en;0.5").is_empty());
    }

    #[test]
    fn test_non_finite_weight_is_dropped() {
        assert!(parse_accept_language("en;q=NaN, fr;q=inf").is_empty());
    }

    #[test]
    fn test_empty_header() {
        assert!(parse_accept_language("").is_empty());
        assert!(parse_accept_language(" , ;q=0.3,").is_empty());
    }

    #[test]
    fn test_equal_weights_keep_listed_order() {
        let languages = parse_accept_language("de, en-US;q=0.7, fr, zh-CN;q=0.7");
        let ranked: Vec<&str> = tags(&languages).collect();
        assert_eq!(ranked, vec!["de", "fr", "en-US", "zh-CN"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::new("en").to_string(), "en");
        assert_eq!(Language::weighted("fr", 0.5).to_string(), "fr;q=0.5");
    }
}
