use apimodel_core::{
    deserialize, deserialize_kind, is_kind_registered, register_kind, serialize_item, ApiClass,
    ApiItem, ApiItemBase, ApiItemOptions, ApiItemRef, ApiModelError, ApiModelResult, Container,
    DeclarationOptions, Documented, DocumentedOptions, ItemKind, JsonObject, KindFactory,
    KindRegistry, KindTag, RecordOptions,
};
use serde_json::{json, Value};
use std::rc::Rc;

const ENUM: KindTag = KindTag::new("Enum");
const ENUM_MEMBER: KindTag = KindTag::new("EnumMember");

/// Downstream enum kind: documented container of `EnumMember` items.
struct EnumItem {
    base: ApiItemBase,
}

impl ApiItem for EnumItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        ENUM
    }

    fn canonical_reference(&self) -> String {
        format!("({}:enum)", self.name())
    }
}

#[derive(Default)]
struct EnumOptions {
    item: ApiItemOptions,
    documented: DocumentedOptions,
}

impl RecordOptions for EnumOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

impl ItemKind for EnumItem {
    const KIND: KindTag = ENUM;
    type Options = EnumOptions;
    type Item = Documented<Container<EnumItem>>;

    fn from_options(options: Self::Options) -> Self::Item {
        Documented::wrap(
            Container::wrap(EnumItem {
                base: ApiItemBase::new(options.item),
            }),
            options.documented,
        )
    }
}

/// Registered as `Enum` but builds an item tagged `EnumMember`.
struct MislabeledItem;

impl ItemKind for MislabeledItem {
    const KIND: KindTag = ENUM;
    type Options = ApiItemOptions;
    type Item = EnumMember;

    fn from_options(options: Self::Options) -> Self::Item {
        EnumMember {
            base: ApiItemBase::new(options),
            value: String::new(),
        }
    }
}

/// Leaf with a hand-written factory instead of `ItemKind`.
struct EnumMember {
    base: ApiItemBase,
    value: String,
}

impl ApiItem for EnumMember {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        ENUM_MEMBER
    }

    fn canonical_reference(&self) -> String {
        self.name().to_string()
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.base
            .serialize_into(self.kind(), &self.canonical_reference(), record);
        record.insert("value".to_string(), Value::from(self.value.as_str()));
    }
}

fn enum_member_factory(
    record: &JsonObject,
    _registry: &KindRegistry,
) -> ApiModelResult<ApiItemRef> {
    let mut options = ApiItemOptions::default();
    options.on_deserialize_into(record)?;
    let value = record
        .get("value")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(Rc::new(EnumMember {
        base: ApiItemBase::new(options),
        value,
    }))
}

fn enum_record() -> JsonObject {
    let value = json!({
        "kind": "Enum",
        "name": "Color",
        "canonicalReference": "(Color:enum)",
        "docComment": "Palette entries.",
        "members": [
            { "kind": "EnumMember", "name": "Red", "canonicalReference": "Red", "value": "0" },
            { "kind": "EnumMember", "name": "Green", "canonicalReference": "Green", "value": "1" }
        ]
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    }
}

#[test]
fn local_registry_accepts_downstream_kinds() {
    let mut registry = KindRegistry::with_builtin_kinds();
    registry
        .register_item_kind::<EnumItem>()
        .expect("register enum");
    let member_factory: KindFactory = enum_member_factory;
    registry
        .register(ENUM_MEMBER, member_factory)
        .expect("register enum member");
    assert_eq!(registry.len(), 13);

    let color = registry.deserialize(&enum_record()).expect("deserialize enum");
    assert_eq!(color.kind(), ENUM);
    assert_eq!(color.doc_comment(), Some("Palette entries."));
    let names: Vec<String> = color
        .members()
        .iter()
        .map(|member| member.name().to_string())
        .collect();
    assert_eq!(names, vec!["Red", "Green"]);

    let record = serialize_item(color.as_ref());
    assert_eq!(record, enum_record());
}

#[test]
fn builtin_registry_without_downstream_kind_reports_unknown() {
    let registry = KindRegistry::with_builtin_kinds();
    let err = registry
        .deserialize(&enum_record())
        .expect_err("Enum is not built in");
    assert!(matches!(err, ApiModelError::UnknownKind(kind) if kind == "Enum"));
}

#[test]
fn global_registry_extension_is_visible_to_deserialize() {
    register_kind(ENUM, deserialize_kind::<EnumItem>).expect("register enum globally");
    register_kind(ENUM_MEMBER, enum_member_factory).expect("register member globally");
    assert!(is_kind_registered("Enum"));
    assert!(is_kind_registered("EnumMember"));

    let err = register_kind(ENUM, deserialize_kind::<EnumItem>).expect_err("second registration");
    assert!(matches!(err, ApiModelError::DuplicateKind(kind) if kind == "Enum"));

    let color = deserialize(&enum_record()).expect("deserialize through global registry");
    let red = color.try_get_member_by_key("Red").expect("member indexed");
    assert_eq!(red.parent().expect("linked").canonical_reference(), "(Color:enum)");
}

#[test]
fn builtin_kinds_cannot_be_replaced() {
    let err = register_kind(KindTag::CLASS, deserialize_kind::<ApiClass>)
        .expect_err("Class is built in");
    assert!(matches!(err, ApiModelError::DuplicateKind(kind) if kind == "Class"));

    let record = serialize_item(&ApiClass::new(DeclarationOptions::named("Still")));
    let class = deserialize(&record).expect("builtin factory still in place");
    assert_eq!(class.canonical_reference(), "(Still:class)");
}

#[test]
fn item_kind_must_build_its_registered_tag() {
    let mut registry = KindRegistry::new();
    registry
        .register_item_kind::<MislabeledItem>()
        .expect("registration only checks the tag");

    let record = json!({ "kind": "Enum", "name": "Color", "canonicalReference": "Color" });
    let err = registry
        .deserialize(record.as_object().expect("object"))
        .expect_err("built item reports EnumMember");
    assert!(matches!(err, ApiModelError::InvalidOperation(_)));
}

#[test]
fn nested_factories_recurse_through_the_handed_registry() {
    fn wrapper_factory(
        record: &JsonObject,
        registry: &KindRegistry,
    ) -> ApiModelResult<ApiItemRef> {
        let inner = record
            .get("inner")
            .and_then(Value::as_object)
            .ok_or_else(|| ApiModelError::InvalidOperation("inner record missing".to_string()))?;
        registry.deserialize(inner)
    }

    register_kind(KindTag::new("Wrapper"), wrapper_factory).expect("register wrapper");
    let record = json!({
        "kind": "Wrapper",
        "inner": { "kind": "Class", "name": "Inner", "canonicalReference": "(Inner:class)" }
    });
    let class = deserialize(record.as_object().expect("object"))
        .expect("factory runs while the global registry is read-locked");
    assert_eq!(class.canonical_reference(), "(Inner:class)");
}
