//! Package file save/load.
//!
//! # Responsibility
//! - Write one package subtree as a JSON document with a metadata header.
//! - Read such a document back through the process-wide kind registry.
//!
//! # Invariants
//! - Files written by a newer schema are rejected, never half-read.
//! - The root record of a package file is always a `Package`.

use crate::model::codec::{record_kind, JsonObject};
use crate::model::error::{ApiModelError, ApiModelResult};
use crate::model::item::{ApiItem, ApiItemRef, KindTag};
use crate::model::registry;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

/// Schema version stamped into files written by this crate.
pub const PACKAGE_FILE_SCHEMA_VERSION: u32 = 1000;

const METADATA_FIELD: &str = "metadata";

/// Header identifying the tool and schema that produced a package file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub tool_package: String,
    pub tool_version: String,
    pub schema_version: u32,
}

/// Knobs for writing package files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFileOptions {
    pub tool_package: String,
    pub tool_version: String,
    /// Indent output for human review.
    pub pretty: bool,
}

impl Default for PackageFileOptions {
    fn default() -> Self {
        Self {
            tool_package: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            pretty: true,
        }
    }
}

/// Serializes `package` and its subtree into a JSON file at `path`.
///
/// # Side effects
/// - Overwrites `path`.
/// - Emits `package_save` logging events with duration and status.
pub fn save_package(
    package: &dyn ApiItem,
    path: impl AsRef<Path>,
    options: &PackageFileOptions,
) -> ApiModelResult<()> {
    let started_at = Instant::now();
    info!("event=package_save module=persistence status=start");

    let result = write_package(package, path.as_ref(), options);
    match &result {
        Ok(()) => info!(
            "event=package_save module=persistence status=ok package={} duration_ms={}",
            package.name(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=package_save module=persistence status=error duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
    result
}

/// Reads a package file and rebuilds its tree.
///
/// # Errors
/// - `Io` / `Json` when the file cannot be read or parsed.
/// - `InvalidRecord` when metadata is missing or the root is not a package.
/// - `UnsupportedSchemaVersion` when the file is newer than this crate.
/// - Any deserialization error for the tree itself.
pub fn load_package(path: impl AsRef<Path>) -> ApiModelResult<ApiItemRef> {
    let started_at = Instant::now();
    info!("event=package_load module=persistence status=start");

    let result = read_package(path.as_ref());
    match &result {
        Ok(package) => info!(
            "event=package_load module=persistence status=ok package={} duration_ms={}",
            package.name(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=package_load module=persistence status=error duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
    result
}

/// Loads a package file and attaches the package to `model`.
pub fn load_package_into_model(
    model: &ApiItemRef,
    path: impl AsRef<Path>,
) -> ApiModelResult<ApiItemRef> {
    if model.kind() != KindTag::MODEL {
        return Err(ApiModelError::InvalidOperation(format!(
            "packages can only be loaded into a Model, not {}",
            model.kind()
        )));
    }
    let package = load_package(path)?;
    model.add_member(Rc::clone(&package))?;
    Ok(package)
}

/// Parses a package document that is already in memory.
pub fn parse_package_document(text: &str) -> ApiModelResult<ApiItemRef> {
    let record: JsonObject = serde_json::from_str(text)?;
    let metadata = read_metadata(&record)?;
    if metadata.schema_version > PACKAGE_FILE_SCHEMA_VERSION {
        return Err(ApiModelError::UnsupportedSchemaVersion {
            file_version: metadata.schema_version,
            latest_supported: PACKAGE_FILE_SCHEMA_VERSION,
        });
    }
    match record_kind(&record) {
        Some(kind) if kind == KindTag::PACKAGE.as_str() => registry::deserialize(&record),
        other => Err(ApiModelError::invalid_record(
            "kind",
            format!(
                "package file root must be a Package, found {}",
                other.unwrap_or("nothing")
            ),
        )),
    }
}

fn write_package(
    package: &dyn ApiItem,
    path: &Path,
    options: &PackageFileOptions,
) -> ApiModelResult<()> {
    if package.kind() != KindTag::PACKAGE {
        return Err(ApiModelError::InvalidOperation(format!(
            "only Package items can be saved as package files, not {}",
            package.kind()
        )));
    }

    let metadata = PackageMetadata {
        tool_package: options.tool_package.clone(),
        tool_version: options.tool_version.clone(),
        schema_version: PACKAGE_FILE_SCHEMA_VERSION,
    };
    let mut document = JsonObject::new();
    document.insert(METADATA_FIELD.to_string(), serde_json::to_value(metadata)?);
    package.serialize_into(&mut document);

    let text = if options.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    std::fs::write(path, text)?;
    Ok(())
}

fn read_package(path: &Path) -> ApiModelResult<ApiItemRef> {
    let text = std::fs::read_to_string(path)?;
    parse_package_document(&text)
}

fn read_metadata(record: &JsonObject) -> ApiModelResult<PackageMetadata> {
    let value = record
        .get(METADATA_FIELD)
        .ok_or_else(|| ApiModelError::invalid_record(METADATA_FIELD, "field is missing"))?;
    PackageMetadata::deserialize(value)
        .map_err(|err| ApiModelError::invalid_record(METADATA_FIELD, err.to_string()))
}

fn error_code(err: &ApiModelError) -> &'static str {
    match err {
        ApiModelError::Io(_) => "io_failed",
        ApiModelError::Json(_) => "json_invalid",
        ApiModelError::UnsupportedSchemaVersion { .. } => "schema_unsupported",
        ApiModelError::InvalidRecord { .. } => "record_invalid",
        ApiModelError::UnknownKind(_) => "kind_unknown",
        ApiModelError::DeserializationFailed { .. } => "member_failed",
        _ => "invalid_operation",
    }
}
