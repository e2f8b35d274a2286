//! Client language preferences

use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::HttpRequest;
use lr_shared::{parse_accept_language, ErrorConfig, Language};

/// Ranked languages from the request's `Accept-Language` header.
///
/// A missing or non-ASCII header yields no languages.
pub fn extract_languages(req: &HttpRequest) -> Vec<Language> {
    req.headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default()
}

/// [`extract_languages`], falling back to the configured default language
pub fn preferred_languages(req: &HttpRequest, config: &ErrorConfig) -> Vec<Language> {
    with_default(extract_languages(req), config)
}

pub(crate) fn with_default(languages: Vec<Language>, config: &ErrorConfig) -> Vec<Language> {
    if !languages.is_empty() {
        return languages;
    }
    config
        .default_language
        .as_deref()
        .map(|tag| vec![Language::new(tag)])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_languages_ranks_header() {
        let req = TestRequest::default()
            .insert_header(("Accept-Language", "en;q=0.9, zh, fr;q= 0.8"))
            .to_http_request();
        let tags: Vec<_> = extract_languages(&req).into_iter().map(|l| l.tag).collect();
        assert_eq!(tags, vec!["zh", "en", "fr"]);
    }

    #[test]
    fn test_missing_header_yields_nothing() {
        let req = TestRequest::default().to_http_request();
        assert!(extract_languages(&req).is_empty());
    }

    #[test]
    fn test_default_language_only_when_empty() {
        let config = ErrorConfig::production().with_default_language("zh-CN");

        let req = TestRequest::default().to_http_request();
        assert_eq!(preferred_languages(&req, &config), vec![Language::new("zh-CN")]);

        let req = TestRequest::default()
            .insert_header(("Accept-Language", "de"))
            .to_http_request();
        assert_eq!(preferred_languages(&req, &config), vec![Language::new("de")]);

        let req = TestRequest::default()
            .insert_header(("Accept-Language", "de;q=bad"))
            .to_http_request();
        assert_eq!(preferred_languages(&req, &config), vec![Language::new("zh-CN")]);
    }
}
