//! Named scope kinds: namespaces, classes and interfaces.
//!
//! All three share one composition (`Documented ∘ ReleaseTagged ∘ Container`)
//! and one options type; only kind tag and canonical reference differ.

use crate::model::codec::{JsonObject, RecordOptions};
use crate::model::error::ApiModelResult;
use crate::model::item::{ApiItem, ApiItemBase, ApiItemOptions, KindTag};
use crate::model::mixins::{
    Container, Documented, DocumentedOptions, ReleaseTagOptions, ReleaseTagged,
};
use crate::model::registry::ItemKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationOptions {
    pub item: ApiItemOptions,
    pub release_tag: ReleaseTagOptions,
    pub documented: DocumentedOptions,
}

impl DeclarationOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            item: ApiItemOptions::new(name),
            ..Self::default()
        }
    }
}

impl RecordOptions for DeclarationOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.item.on_deserialize_into(record)?;
        self.release_tag.on_deserialize_into(record)?;
        self.documented.on_deserialize_into(record)
    }
}

fn compose<I: ApiItem>(
    core: I,
    release_tag: ReleaseTagOptions,
    documented: DocumentedOptions,
) -> Documented<ReleaseTagged<Container<I>>> {
    Documented::wrap(
        ReleaseTagged::wrap(Container::wrap(core), release_tag),
        documented,
    )
}

pub struct NamespaceItem {
    base: ApiItemBase,
}

impl ApiItem for NamespaceItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::NAMESPACE
    }

    fn canonical_reference(&self) -> String {
        format!("({}:namespace)", self.name())
    }
}

pub type ApiNamespace = Documented<ReleaseTagged<Container<NamespaceItem>>>;

impl ApiNamespace {
    pub fn new(options: DeclarationOptions) -> Self {
        let DeclarationOptions {
            item,
            release_tag,
            documented,
        } = options;
        let core = NamespaceItem {
            base: ApiItemBase::new(item),
        };
        compose(core, release_tag, documented)
    }
}

impl ItemKind for ApiNamespace {
    const KIND: KindTag = KindTag::NAMESPACE;
    type Options = DeclarationOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

pub struct ClassItem {
    base: ApiItemBase,
}

impl ApiItem for ClassItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::CLASS
    }

    fn canonical_reference(&self) -> String {
        format!("({}:class)", self.name())
    }
}

pub type ApiClass = Documented<ReleaseTagged<Container<ClassItem>>>;

impl ApiClass {
    pub fn new(options: DeclarationOptions) -> Self {
        let DeclarationOptions {
            item,
            release_tag,
            documented,
        } = options;
        let core = ClassItem {
            base: ApiItemBase::new(item),
        };
        compose(core, release_tag, documented)
    }
}

impl ItemKind for ApiClass {
    const KIND: KindTag = KindTag::CLASS;
    type Options = DeclarationOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}

pub struct InterfaceItem {
    base: ApiItemBase,
}

impl ApiItem for InterfaceItem {
    fn base(&self) -> &ApiItemBase {
        &self.base
    }

    fn kind(&self) -> KindTag {
        KindTag::INTERFACE
    }

    fn canonical_reference(&self) -> String {
        format!("({}:interface)", self.name())
    }
}

pub type ApiInterface = Documented<ReleaseTagged<Container<InterfaceItem>>>;

impl ApiInterface {
    pub fn new(options: DeclarationOptions) -> Self {
        let DeclarationOptions {
            item,
            release_tag,
            documented,
        } = options;
        let core = InterfaceItem {
            base: ApiItemBase::new(item),
        };
        compose(core, release_tag, documented)
    }
}

impl ItemKind for ApiInterface {
    const KIND: KindTag = KindTag::INTERFACE;
    type Options = DeclarationOptions;
    type Item = Self;

    fn from_options(options: Self::Options) -> Self::Item {
        Self::new(options)
    }
}
