//! Function-like kinds and their parameters.
//!
//! Methods and method signatures are containers whose members are
//! `Parameter` items, so a parameter's parent is the function it belongs to.
//! Overloads share a name and are told apart by `overloadIndex`.

use crate::model::codec::{
    read_bool_or_default, read_u32_or_default, JsonObject, RecordOptions, IS_OPTIONAL_FIELD,
    IS_STATIC_FIELD, OVERLOAD_INDEX_FIELD,
};
use crate::model::error::ApiModelResult;
use crate::model::item::{ApiItem, ApiItemBase, ApiItemOptions, KindTag};
use crate::model::mixins::{
    Container, Documented, DocumentedOptions, ReleaseTagOptions, ReleaseTagged,
};
use crate::model::registry::ItemKind;
use serde_json::Value;

/// Orders overloads numerically; canonical references would put 10 before 2.
fn overload_sort_key(name: &str, scope: &str, overload_index: u32) -> String {
    format!("{name}|{scope}|{overload_index:010}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodOptions {
    pub item: ApiItemOptions,
    pub is_static: bool,
    pub overload_index: u32,
    pub release_tag: ReleaseTagOptions,
    pub documented: DocumentedOptions,
}

impl RecordOptions for MethodOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.is_static = read_bool_or_default(record, IS_STATIC_FIELD)?;
        self.overload_index = read_u32_or_default(record, OVERLOAD_INDEX_FIELD)?;
        self.release_tag.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

pub struct MethodItem {
    base: ApiItemBase,
    is_static: bool,
    overload_index: u32,
}

impl MethodItem {
    fn scope(&self) -> &'static str {
        if self.is_static {
            "static"
        } else {
            "instance"
        }
    }
}

impl ApiItem for MethodItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::METHOD
    }

    fn canonical_reference(&self) -> String {
        format!("({}:{},{})", self.name(), self.scope(), self.overload_index)
    }

    fn sort_key(&self) -> String {
        overload_sort_key(self.name(), self.scope(), self.overload_index)
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.base
            .serialize_into(self.kind(), &self.canonical_reference(), record);
        record.insert(IS_STATIC_FIELD.to_string(), Value::from(self.is_static));
        record.insert(
            OVERLOAD_INDEX_FIELD.to_string(),
            Value::from(self.overload_index),
        );
    }
}

pub type ApiMethod = Documented<ReleaseTagged<Container<MethodItem>>>;

impl ApiMethod {
    pub fn new(options: MethodOptions) -> Self {
        let core = MethodItem {
            base: ApiItemBase::new(options.item),
            is_static: options.is_static,
            overload_index: options.overload_index,
        };
        Documented::wrap(
            ReleaseTagged::wrap(Container::wrap(core), options.release_tag),
            options.documented,
        )
    }
}

impl ItemKind for ApiMethod {
    const KIND: KindTag = KindTag::METHOD;
    type Options = MethodOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSignatureOptions {
    pub item: ApiItemOptions,
    pub overload_index: u32,
    pub release_tag: ReleaseTagOptions,
    pub documented: DocumentedOptions,
}

impl RecordOptions for MethodSignatureOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.overload_index = read_u32_or_default(record, OVERLOAD_INDEX_FIELD)?;
        self.release_tag.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

/// Method declared on an interface.
pub struct MethodSignatureItem {
    base: ApiItemBase,
    overload_index: u32,
}

impl ApiItem for MethodSignatureItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::METHOD_SIGNATURE
    }

    fn canonical_reference(&self) -> String {
        format!("({}:{})", self.name(), self.overload_index)
    }

    fn sort_key(&self) -> String {
        overload_sort_key(self.name(), "signature", self.overload_index)
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.base
            .serialize_into(self.kind(), &self.canonical_reference(), record);
        record.insert(
            OVERLOAD_INDEX_FIELD.to_string(),
            Value::from(self.overload_index),
        );
    }
}

pub type ApiMethodSignature = Documented<ReleaseTagged<Container<MethodSignatureItem>>>;

impl ApiMethodSignature {
    pub fn new(options: MethodSignatureOptions) -> Self {
        let core = MethodSignatureItem {
            base: ApiItemBase::new(options.item),
            overload_index: options.overload_index,
        };
        Documented::wrap(
            ReleaseTagged::wrap(Container::wrap(core), options.release_tag),
            options.documented,
        )
    }
}

impl ItemKind for ApiMethodSignature {
    const KIND: KindTag = KindTag::METHOD_SIGNATURE;
    type Options = MethodSignatureOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterOptions {
    pub item: ApiItemOptions,
    pub is_optional: bool,
}

impl RecordOptions for ParameterOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.is_optional = read_bool_or_default(record, IS_OPTIONAL_FIELD)?;
        Ok(())
    }
}

pub struct ApiParameter {
    base: ApiItemBase,
    is_optional: bool,
}

impl ApiParameter {
    pub fn new(options: ParameterOptions) -> Self {
        Self {
            base: ApiItemBase::new(options.item),
            is_optional: options.is_optional,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }
}

impl ApiItem for ApiParameter {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::PARAMETER
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

impl ItemKind for ApiParameter {
    const KIND: KindTag = KindTag::PARAMETER;
    type Options = ParameterOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiMethod, ApiParameter, MethodOptions, ParameterOptions};
    use crate::model::codec::serialize_item;
    use crate::model::item::{ApiItemOptions, ApiItemRef};
    use std::rc::Rc;

    fn method(name: &str, is_static: bool, overload_index: u32) -> ApiItemRef {
        Rc::new(ApiMethod::new(MethodOptions {
            item: ApiItemOptions::new(name),
            is_static,
            overload_index,
            ..MethodOptions::default()
        }))
    }

    #[test]
    fn canonical_reference_distinguishes_scope_and_overload() {
        assert_eq!(method("draw", false, 0).canonical_reference(), "(draw:instance,0)");
        assert_eq!(method("draw", true, 1).canonical_reference(), "(draw:static,1)");
    }

    #[test]
    fn sort_key_orders_overloads_numerically() {
        let second = method("draw", false, 2);
        let tenth = method("draw", false, 10);
        assert!(second.canonical_reference() > tenth.canonical_reference());
        assert!(second.sort_key() < tenth.sort_key());
    }

    #[test]
    fn parameters_attach_to_their_method() {
        let draw = method("draw", false, 0);
        let canvas: ApiItemRef = Rc::new(ApiParameter::new(ParameterOptions {
            item: ApiItemOptions::new("canvas"),
            is_optional: true,
        }));
        draw.add_member(Rc::clone(&canvas)).expect("attach parameter");

        let owner = canvas.parent().expect("parameter parent");
        assert_eq!(owner.canonical_reference(), "(draw:instance,0)");

        let record = serialize_item(draw.as_ref());
        assert_eq!(record["isStatic"], false);
        assert_eq!(record["overloadIndex"], 0);
        assert_eq!(record["members"][0]["isOptional"], true);
    }
}
