//! Catalog files.
//!
//! A catalog file maps resource identifiers to `{desc, default, map}`
//! records, in JSON or TOML. Every file is registered under a prefix, the
//! file stem unless one is given, and is committed all-or-nothing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use lr_shared::config::CatalogFile;

use super::catalog::CatalogBuilder;
use super::resource::ResourceSpec;
use crate::errors::LoadError;

/// Catalog file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Parse catalog text without registering it
pub fn parse_specs<R: Read>(mut reader: R, format: Format) -> Result<BTreeMap<String, ResourceSpec>, LoadError> {
    match format {
        Format::Json => Ok(serde_json::from_reader(reader)?),
        Format::Toml => {
            let mut text = String::new();
            reader.read_to_string(&mut text).map_err(|source| LoadError::Io {
                path: Default::default(),
                source,
            })?;
            Ok(toml::from_str(&text)?)
        }
    }
}

/// Register every resource read from `reader` under `prefix`
pub fn load_reader<R: Read>(
    builder: &mut CatalogBuilder,
    prefix: &str,
    reader: R,
    format: Format,
) -> Result<usize, LoadError> {
    let specs = parse_specs(reader, format)?;
    Ok(builder.register_all(prefix, specs)?)
}

/// Register a catalog file; `prefix` defaults to the file stem
pub fn load_file(builder: &mut CatalogBuilder, prefix: Option<&str>, path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let prefix = match prefix {
        Some(prefix) => prefix.to_string(),
        None => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| LoadError::InvalidFileName {
                path: path.to_path_buf(),
            })?,
    };

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let count = load_reader(builder, &prefix, BufReader::new(file), format)?;
    tracing::info!(path = %path.display(), prefix = %prefix, resources = count, "loaded catalog file");
    Ok(count)
}

/// Register each configured file in order, stopping at the first failure
pub fn load_files(builder: &mut CatalogBuilder, files: &[CatalogFile]) -> Result<usize, LoadError> {
    files.iter().try_fold(0, |total, file| -> Result<usize, LoadError> {
        Ok(total + load_file(builder, file.prefix.as_deref(), &file.path)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CatalogError;
    use crate::i18n::TemplateArgs;
    use lr_shared::types::Language;
    use std::io::Write;

    const JSON: &str = r#"{
        "locked": { "desc": "account locked", "default": "Locked for {{.minutes}} minutes", "map": { "zh": "锁定{{.minutes}}分钟" } },
        "expired": { "default": "Expired" }
    }"#;

    const TOML: &str = r#"
        [locked]
        desc = "account locked"
        default = "Locked"

        [locked.map]
        zh = "已锁定"
    "#;

    #[test]
    fn test_load_json_reader() {
        let mut builder = CatalogBuilder::new();
        let count = load_reader(&mut builder, "auth", JSON.as_bytes(), Format::Json).unwrap();
        assert_eq!(count, 2);

        let catalog = builder.build();
        let mut args = TemplateArgs::new();
        args.insert("minutes".into(), serde_json::json!(3));
        assert_eq!(
            catalog.string("auth.locked", &[Language::new("zh")], Some(&args)).unwrap(),
            "锁定3分钟"
        );
        assert_eq!(catalog.string("auth.expired", &[], None).unwrap(), "Expired");
    }

    #[test]
    fn test_load_toml_reader() {
        let mut builder = CatalogBuilder::new();
        load_reader(&mut builder, "auth", TOML.as_bytes(), Format::Toml).unwrap();
        let catalog = builder.build();
        assert_eq!(
            catalog.string("auth.locked", &[Language::new("zh")], None).unwrap(),
            "已锁定"
        );
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let mut builder = CatalogBuilder::new();
        let err = load_reader(&mut builder, "auth", "{ not json".as_bytes(), Format::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_file_prefix_defaults_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(JSON.as_bytes())
            .unwrap();

        let mut builder = CatalogBuilder::new();
        load_file(&mut builder, None, &path).unwrap();
        assert!(builder.contains("auth.locked"));

        let err = load_file(&mut builder, None, &path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Catalog(CatalogError::DuplicateKey { .. })
        ));

        load_file(&mut builder, Some("billing"), &path).unwrap();
        assert!(builder.contains("billing.expired"));
    }

    #[test]
    fn test_load_files_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("auth.json");
        let toml = dir.path().join("messages.toml");
        std::fs::write(&json, JSON).unwrap();
        std::fs::write(&toml, TOML).unwrap();

        let files = vec![
            CatalogFile::new(&json),
            CatalogFile::new(&toml).with_prefix("profile"),
        ];
        let mut builder = CatalogBuilder::new();
        assert_eq!(load_files(&mut builder, &files).unwrap(), 3);
        assert!(builder.contains("profile.locked"));
    }

    #[test]
    fn test_unsupported_extension_and_missing_file() {
        let mut builder = CatalogBuilder::new();
        assert!(matches!(
            load_file(&mut builder, None, "catalog.yaml"),
            Err(LoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            load_file(&mut builder, None, "/definitely/missing/auth.json"),
            Err(LoadError::Io { .. })
        ));
    }
}
