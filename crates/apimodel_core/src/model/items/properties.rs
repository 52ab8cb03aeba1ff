//! Property kinds for classes and interfaces.

use crate::model::codec::{
    read_bool_or_default, JsonObject, RecordOptions, IS_OPTIONAL_FIELD, IS_STATIC_FIELD,
};
use crate::model::error::ApiModelResult;
use crate::model::item::{ApiItem, ApiItemBase, ApiItemOptions, KindTag};
use crate::model::mixins::{Documented, DocumentedOptions, ReleaseTagOptions, ReleaseTagged};
use crate::model::registry::ItemKind;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyOptions {
    pub item: ApiItemOptions,
    pub is_static: bool,
    pub release_tag: ReleaseTagOptions,
    pub documented: DocumentedOptions,
}

impl RecordOptions for PropertyOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.is_static = read_bool_or_default(record, IS_STATIC_FIELD)?;
        self.release_tag.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

pub struct PropertyItem {
    base: ApiItemBase,
    is_static: bool,
}

impl ApiItem for PropertyItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::PROPERTY
    }

    fn canonical_reference(&self) -> String {
        let scope = if self.is_static { "static" } else { "instance" };
        format!("({}:{scope})", self.name())
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.base
            .serialize_into(self.kind(), &self.canonical_reference(), record);
        record.insert(IS_STATIC_FIELD.to_string(), Value::from(self.is_static));
    }
}

pub type ApiProperty = Documented<ReleaseTagged<PropertyItem>>;

impl ApiProperty {
    pub fn new(options: PropertyOptions) -> Self {
        let core = PropertyItem {
            base: ApiItemBase::new(options.item),
            is_static: options.is_static,
        };
        Documented::wrap(
            ReleaseTagged::wrap(core, options.release_tag),
            options.documented,
        )
    }
}

impl ItemKind for ApiProperty {
    const KIND: KindTag = KindTag::PROPERTY;
    type Options = PropertyOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySignatureOptions {
    pub item: ApiItemOptions,
    pub is_optional: bool,
    pub release_tag: ReleaseTagOptions,
    pub documented: DocumentedOptions,
}

impl RecordOptions for PropertySignatureOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.is_optional = read_bool_or_default(record, IS_OPTIONAL_FIELD)?;
        self.release_tag.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

/// Property declared on an interface.
pub struct PropertySignatureItem {
    base: ApiItemBase,
    is_optional: bool,
}

impl ApiItem for PropertySignatureItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::PROPERTY_SIGNATURE
    }

    fn canonical_reference(&self) -> String {
        self.name().to_string()
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.base
            .serialize_into(self.kind(), &self.canonical_reference(), record);
        record.insert(IS_OPTIONAL_FIELD.to_string(), Value::from(self.is_optional));
    }
}

pub type ApiPropertySignature = Documented<ReleaseTagged<PropertySignatureItem>>;

impl ApiPropertySignature {
    pub fn new(options: PropertySignatureOptions) -> Self {
        let core = PropertySignatureItem {
            base: ApiItemBase::new(options.item),
            is_optional: options.is_optional,
        };
        Documented::wrap(
            ReleaseTagged::wrap(core, options.release_tag),
            options.documented,
        )
    }
}

impl ItemKind for ApiPropertySignature {
    const KIND: KindTag = KindTag::PROPERTY_SIGNATURE;
    type Options = PropertySignatureOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}
