//! File persistence for API item trees.
//!
//! # Responsibility
//! - Save and load package documents on disk.
//! - Keep file format metadata (tool, schema version) out of the model layer.
//!
//! # See also
//! - `model::registry` for how records become items.

pub mod package_file;

pub use package_file::{
    load_package, load_package_into_model, parse_package_document, save_package,
    PackageFileOptions, PackageMetadata, PACKAGE_FILE_SCHEMA_VERSION,
};
