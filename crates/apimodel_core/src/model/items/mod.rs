//! Built-in node kinds and their registry wiring.

pub mod declarations;
pub mod functions;
pub mod packages;
pub mod properties;

use super::item::KindTag;
use super::registry::{deserialize_kind, ItemKind, KindFactory};

pub use declarations::{ApiClass, ApiInterface, ApiNamespace, DeclarationOptions};
pub use functions::{
    ApiMethod, ApiMethodSignature, ApiParameter, MethodOptions, MethodSignatureOptions,
    ParameterOptions,
};
pub use packages::{
    try_get_package_by_name, ApiEntryPoint, ApiModel, ApiPackage, ApiPackageOptions,
};
pub use properties::{
    ApiProperty, ApiPropertySignature, PropertyOptions, PropertySignatureOptions,
};

fn entry<K: ItemKind>() -> (KindTag, KindFactory) {
    let factory: KindFactory = deserialize_kind::<K>;
    (K::KIND, factory)
}

/// Factories for every kind this crate defines.
pub(crate) fn builtin_factories() -> Vec<(KindTag, KindFactory)> {
    vec![
        entry::<ApiModel>(),
        entry::<ApiPackage>(),
        entry::<ApiEntryPoint>(),
        entry::<ApiNamespace>(),
        entry::<ApiClass>(),
        entry::<ApiInterface>(),
        entry::<ApiMethod>(),
        entry::<ApiMethodSignature>(),
        entry::<ApiProperty>(),
        entry::<ApiPropertySignature>(),
        entry::<ApiParameter>(),
    ]
}
