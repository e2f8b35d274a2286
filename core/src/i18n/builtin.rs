//! Resources every catalog starts with

use super::catalog::ResourceId;
use super::resource::LocalizedResource;
use super::template::Template;

/// Response code of the synthesized unknown-error envelope
pub const UNKNOWN_CODE: &str = "error.data.unknown-error";

/// Generic message for failures that reach the client unclassified
pub const UNKNOWN_ERROR: ResourceId = ResourceId::from_static("builtin.unknown-error");

const UNKNOWN_EN: &str = "System error, please try again later!";
const UNKNOWN_ZH: &str = "系统错误，请稍后重试！";

/// Built-in resources keyed by their full identifier
pub fn resources() -> Vec<(ResourceId, LocalizedResource)> {
    let id = UNKNOWN_ERROR;
    let key = id.as_str();
    let variant = |tag: &str, text: &str| Template::literal(format!("{}.{}", key, tag), text);

    let unknown = LocalizedResource::new(Template::literal(key, UNKNOWN_EN))
        .with_description("Shown for any error that was not classified by the service")
        .with_variant("en", variant("en", UNKNOWN_EN))
        .with_variant("en-US", variant("en-US", UNKNOWN_EN))
        .with_variant("en_US", variant("en_US", UNKNOWN_EN))
        .with_variant("zh", variant("zh", UNKNOWN_ZH))
        .with_variant("zh-CN", variant("zh-CN", UNKNOWN_ZH))
        .with_variant("zh_CN", variant("zh_CN", UNKNOWN_ZH));

    vec![(id, unknown)]
}
