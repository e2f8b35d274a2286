//! Unit tests for envelope fields and message dispatch

use std::sync::Arc;

use lr_shared::types::{Language, Level};
use serde_json::json;

use super::mocks::Plain;
use crate::envelope::{ErrorEnvelope, InternalMessage, ResponseMessage};
use crate::i18n::{
    builtin, Catalog, CatalogBuilder, LocalizedResource, ResourceId, ResourceSpec, TemplateArgs,
};

fn langs(tags: &[&str]) -> Vec<Language> {
    tags.iter().map(|t| Language::new(*t)).collect()
}

fn numbered() -> LocalizedResource {
    ResourceSpec::new("default")
        .with_variant("1", "2")
        .with_variant("3", "4")
        .compile("numbered")
        .unwrap()
}

#[test]
fn test_message_falls_back_to_cause() {
    let err = ErrorEnvelope::new("code").with_cause(Plain("msg by error"));
    assert_eq!(err.message(), "msg by error");
    assert_eq!(err.to_string(), "msg by error");
}

#[test]
fn test_message_without_cause_is_nil() {
    assert_eq!(ErrorEnvelope::new("code").message(), "nil");
}

#[test]
fn test_message_dispatch() {
    let err = ErrorEnvelope::new("code").with_message(InternalMessage::producer(|| {
        "msg by producer".to_string()
    }));
    assert_eq!(err.message(), "msg by producer");

    let err = ErrorEnvelope::new("code")
        .with_cause(Plain("an error"))
        .with_message(InternalMessage::from_cause(|cause| {
            format!("msg by cause. error: {}", cause.map(|c| c.to_string()).unwrap_or_default())
        }));
    assert_eq!(err.message(), "msg by cause. error: an error");

    let err = ErrorEnvelope::new("code").with_message("a string error");
    assert_eq!(err.message(), "a string error");

    let err = ErrorEnvelope::new("code").with_message(InternalMessage::display(42));
    assert_eq!(err.message(), "42");
}

#[test]
fn test_cause_producer_without_cause() {
    let err = ErrorEnvelope::new("code").with_message(InternalMessage::from_cause(|cause| {
        format!("has cause: {}", cause.is_some())
    }));
    assert_eq!(err.message(), "has cause: false");
}

#[test]
fn test_message_is_not_cached() {
    let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let err = ErrorEnvelope::new("code").with_message(InternalMessage::producer(move || {
        let n = seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("call {}", n)
    }));
    assert_eq!(err.message(), "call 0");
    assert_eq!(err.message(), "call 1");
}

#[test]
fn test_http_status_code_level_and_trace() {
    let err = ErrorEnvelope::new("error-code")
        .with_http_status(400)
        .with_level(Level::Warn)
        .with_trace(true);
    assert_eq!(err.http_status(), 400);
    assert_eq!(err.response_code(), "error-code");
    assert_eq!(err.log_level(), Level::Warn);
    assert!(err.needs_trace());
}

#[test]
fn test_new_envelope_defaults() {
    let err = ErrorEnvelope::new("error-code");
    assert_eq!(err.http_status(), 500);
    assert_eq!(err.log_level(), Level::Error);
    assert!(!err.needs_trace());
    assert!(err.cause().is_none());
}

#[test]
fn test_response_message_dispatch() {
    let catalog = Catalog::builtin();

    let err = ErrorEnvelope::new("c").with_response(ResponseMessage::producer(|| "producer".to_string()));
    assert_eq!(err.response_message_in(&catalog, &[]), "producer");

    let err = ErrorEnvelope::new("c").with_response(ResponseMessage::for_languages(|languages| {
        languages
            .iter()
            .map(|l| l.tag.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }));
    assert_eq!(err.response_message_in(&catalog, &langs(&["1", "2"])), "1,2");

    let err = ErrorEnvelope::new("c").with_response("string error");
    assert_eq!(err.response_message_in(&catalog, &[]), "string error");

    let err = ErrorEnvelope::new("c").with_response(ResponseMessage::display(7.5));
    assert_eq!(err.response_message_in(&catalog, &[]), "7.5");
}

#[test]
fn test_response_message_from_resource_value_and_shared() {
    let catalog = Catalog::builtin();
    let by_value = ErrorEnvelope::new("c").with_response(numbered());
    let by_ref = ErrorEnvelope::new("c").with_response(Arc::new(numbered()));

    for err in [by_value, by_ref] {
        assert_eq!(err.response_message_in(&catalog, &langs(&["1"])), "2");
        assert_eq!(err.response_message_in(&catalog, &langs(&["3", "5"])), "4");
        assert_eq!(err.response_message_in(&catalog, &langs(&["5"])), "default");
    }
}

#[test]
fn test_response_message_from_resource_id_with_args() {
    let mut builder = CatalogBuilder::new();
    builder
        .register(
            "auth",
            "locked",
            &ResourceSpec::new("Locked for {{.minutes}} minutes")
                .with_variant("zh", "已锁定{{.minutes}}分钟"),
        )
        .unwrap();
    let catalog = builder.build();

    let args: TemplateArgs = serde_json::from_value(json!({ "minutes": 15 })).unwrap();
    let err = ErrorEnvelope::new("auth.locked")
        .with_response(ResponseMessage::resource_id(ResourceId::scoped("auth", "locked")).with_args(args));

    assert_eq!(err.response_message_in(&catalog, &langs(&["zh"])), "已锁定15分钟");
    assert_eq!(err.response_message_in(&catalog, &langs(&["de"])), "Locked for 15 minutes");
}

#[test]
#[should_panic(expected = "is not registered")]
fn test_unregistered_resource_id_panics() {
    let err = ErrorEnvelope::new("c").with_response(ResponseMessage::resource_id("missing.resource"));
    err.response_message_in(&Catalog::builtin(), &[]);
}

#[test]
fn test_absent_response_message_uses_unknown_resource() {
    let catalog = Catalog::builtin();
    let err = ErrorEnvelope::new("c");
    assert_eq!(
        err.response_message_in(&catalog, &langs(&["zh"])),
        catalog.must_string(builtin::UNKNOWN_ERROR.as_str(), &langs(&["zh"]), None)
    );
}

#[test]
fn test_unknown_envelope() {
    let catalog = Catalog::builtin();
    let unknown = catalog.must_resource(builtin::UNKNOWN_ERROR.as_str());
    let err = ErrorEnvelope::unknown_from(Plain("unknown error"));

    assert_eq!(err.message(), "unknown error");
    assert_eq!(err.http_status(), 500);
    assert_eq!(err.response_code(), builtin::UNKNOWN_CODE);
    assert_eq!(err.log_level(), Level::Error);
    assert!(err.needs_trace());

    let default = unknown.default_template().render(None);
    assert_eq!(err.response_message_in(&catalog, &[]), default);
    assert_eq!(err.response_message_in(&catalog, &langs(&["unknown"])), default);
    assert_eq!(
        err.response_message_in(&catalog, &langs(&["zh_CN", "unknown"])),
        unknown.variant("zh_CN").unwrap().render(None)
    );
    assert_eq!(
        err.response_message_in(&catalog, &langs(&["en_US", "unknown"])),
        unknown.variant("en_US").unwrap().render(None)
    );
}

#[test]
fn test_global_catalog_has_builtins() {
    let err = ErrorEnvelope::unknown_from(Plain("boom"));
    assert!(!err.response_message(&langs(&["en"])).is_empty());
}

#[test]
fn test_debug_output_names_fields() {
    let err = ErrorEnvelope::new("debug-code").with_message("internal");
    let debug = format!("{:?}", err);
    assert!(debug.contains("debug-code"));
    assert!(debug.contains("internal"));
}
