//! Root-level kinds: model, package and entry point.

use crate::model::codec::{JsonObject, RecordOptions};
use crate::model::error::ApiModelResult;
use crate::model::item::{ApiItem, ApiItemBase, ApiItemOptions, ApiItemRef, KindTag};
use crate::model::mixins::{Container, Documented, DocumentedOptions};
use crate::model::registry::ItemKind;

/// Root of a loaded set of packages.
pub struct ModelItem {
    base: ApiItemBase,
}

impl ApiItem for ModelItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::MODEL
    }

    fn canonical_reference(&self) -> String {
        "(model)".to_string()
    }
}

pub type ApiModel = Container<ModelItem>;

impl ApiModel {
    pub fn new(options: ApiItemOptions) -> Self {
        Container::wrap(ModelItem {
            base: ApiItemBase::new(options),
        })
    }
}

impl Default for ApiModel {
    fn default() -> Self {
        Self::new(ApiItemOptions::default())
    }
}

impl ItemKind for ApiModel {
    const KIND: KindTag = KindTag::MODEL;
    type Options = ApiItemOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

/// Finds a package directly under `model` by name.
pub fn try_get_package_by_name(model: &dyn ApiItem, name: &str) -> Option<ApiItemRef> {
    model
        .members()
        .into_iter()
        .find(|member| member.kind() == KindTag::PACKAGE && member.name() == name)
}

pub struct PackageItem {
    base: ApiItemBase,
}

impl ApiItem for PackageItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::PACKAGE
    }

    fn canonical_reference(&self) -> String {
        self.name().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiPackageOptions {
    pub item: ApiItemOptions,
    pub documented: DocumentedOptions,
}

impl RecordOptions for ApiPackageOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

pub type ApiPackage = Documented<Container<PackageItem>>;

impl ApiPackage {
    pub fn new(options: ApiPackageOptions) -> Self {
        let package = PackageItem {
            base: ApiItemBase::new(options.item),
        };
        Documented::wrap(Container::wrap(package), options.documented)
    }
}

impl ItemKind for ApiPackage {
    const KIND: KindTag = KindTag::PACKAGE;
    type Options = ApiPackageOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

/// Import path of a package; the unnamed entry point is the package root.
pub struct EntryPointItem {
    base: ApiItemBase,
}

impl ApiItem for EntryPointItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::ENTRY_POINT
    }

    fn canonical_reference(&self) -> String {
        format!("({}:entryPoint)", self.name())
    }
}

pub type ApiEntryPoint = Container<EntryPointItem>;

impl ApiEntryPoint {
    pub fn new(options: ApiItemOptions) -> Self {
        Container::wrap(EntryPointItem {
            base: ApiItemBase::new(options),
        })
    }
}

impl ItemKind for ApiEntryPoint {
    const KIND: KindTag = KindTag::ENTRY_POINT;
    type Options = ApiItemOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}
