//! Core model for extracted API surfaces.
//! This crate owns the item tree, its capabilities and its persisted form.

pub mod logging;
pub mod model;
pub mod persistence;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::items::{
    try_get_package_by_name, ApiClass, ApiEntryPoint, ApiInterface, ApiMethod,
    ApiMethodSignature, ApiModel, ApiNamespace, ApiPackage, ApiPackageOptions, ApiParameter,
    ApiProperty, ApiPropertySignature, DeclarationOptions, MethodOptions,
    MethodSignatureOptions, ParameterOptions, PropertyOptions, PropertySignatureOptions,
};
pub use model::mixins::{
    Container, Documented, DocumentedOptions, MemberList, ReleaseTag, ReleaseTagOptions,
    ReleaseTagged,
};
pub use model::{
    deserialize, deserialize_kind, is_kind_registered, record_kind, register_kind, serialize_item,
    ApiItem, ApiItemBase, ApiItemOptions, ApiItemRef, ApiModelError, ApiModelResult, ItemKind,
    JsonObject, KindFactory, KindRegistry, KindTag, RecordOptions,
};
pub use persistence::{
    load_package, load_package_into_model, parse_package_document, save_package,
    PackageFileOptions, PackageMetadata, PACKAGE_FILE_SCHEMA_VERSION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
