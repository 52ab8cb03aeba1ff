//! Node identity core for the API item tree.
//!
//! # Responsibility
//! - Define the `ApiItem` contract every node kind satisfies.
//! - Hold the per-node identity state (`ApiItemBase`): name and parent link.
//! - Provide hierarchy navigation over shared item handles.
//!
//! # Invariants
//! - `name` never changes after construction.
//! - `kind` and `canonical_reference` are required methods; there is no
//!   instantiable abstract item.
//! - The parent link is written at most once, and only with a
//!   `ParentGrant`, which only the container capability can mint.

use super::codec::{
    JsonObject, RecordOptions, CANONICAL_REFERENCE_FIELD, KIND_FIELD, NAME_FIELD,
};
use super::error::ApiModelResult;
use super::mixins::container::{MemberList, ParentGrant};
use super::mixins::release_tag::ReleaseTag;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::fmt::{Debug, Display, Formatter};
use std::rc::{Rc, Weak};

/// Shared handle to a node of any kind.
pub type ApiItemRef = Rc<dyn ApiItem>;

/// Discriminant identifying a node's concrete kind.
///
/// The set is open: downstream modules mint their own tags with
/// [`KindTag::new`] and register a factory for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindTag(&'static str);

impl KindTag {
    pub const MODEL: KindTag = KindTag("Model");
    pub const PACKAGE: KindTag = KindTag("Package");
    pub const ENTRY_POINT: KindTag = KindTag("EntryPoint");
    pub const NAMESPACE: KindTag = KindTag("Namespace");
    pub const CLASS: KindTag = KindTag("Class");
    pub const INTERFACE: KindTag = KindTag("Interface");
    pub const METHOD: KindTag = KindTag("Method");
    pub const METHOD_SIGNATURE: KindTag = KindTag("MethodSignature");
    pub const PROPERTY: KindTag = KindTag("Property");
    pub const PROPERTY_SIGNATURE: KindTag = KindTag("PropertySignature");
    pub const PARAMETER: KindTag = KindTag("Parameter");

    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for KindTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Options shared by every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiItemOptions {
    pub name: String,
}

impl ApiItemOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RecordOptions for ApiItemOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.name = super::codec::read_required_str(record, NAME_FIELD)?.to_string();
        Ok(())
    }
}

/// Identity state embedded in every concrete kind.
pub struct ApiItemBase {
    name: String,
    parent: OnceCell<Weak<dyn ApiItem>>,
}

impl ApiItemBase {
    pub fn new(options: ApiItemOptions) -> Self {
        Self {
            name: options.name,
            parent: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent while it is still alive.
    pub fn parent(&self) -> Option<ApiItemRef> {
        self.parent.get().and_then(Weak::upgrade)
    }

    pub(crate) fn has_parent(&self) -> bool {
        self.parent.get().is_some()
    }

    /// Records the parent link. Returns `false` if a link already exists.
    pub(crate) fn attach_parent(&self, parent: Weak<dyn ApiItem>, _grant: ParentGrant) -> bool {
        self.parent.set(parent).is_ok()
    }

    /// Writes the identity fields every record carries.
    pub fn serialize_into(&self, kind: KindTag, canonical_reference: &str, record: &mut JsonObject) {
        record.insert(KIND_FIELD.to_string(), Value::from(kind.as_str()));
        record.insert(NAME_FIELD.to_string(), Value::from(self.name.as_str()));
        record.insert(
            CANONICAL_REFERENCE_FIELD.to_string(),
            Value::from(canonical_reference),
        );
    }
}

impl Debug for ApiItemBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiItemBase")
            .field("name", &self.name)
            .field("attached", &self.has_parent())
            .finish()
    }
}

/// Contract satisfied by every node kind and every capability wrapper.
///
/// Capability wrappers forward each method to the item they wrap and override
/// only what they add.
pub trait ApiItem {
    fn base(&self) -> &ApiItemBase;

    fn kind(&self) -> KindTag;

    /// Stable identity string, unique within one document.
    fn canonical_reference(&self) -> String;

    fn name(&self) -> &str {
        self.base().name()
    }

    /// Container this item was added to, if any.
    fn parent(&self) -> Option<ApiItemRef> {
        self.base().parent()
    }

    /// Direct children in insertion order. Empty unless the kind is a container.
    fn members(&self) -> Vec<ApiItemRef> {
        Vec::new()
    }

    fn member_list(&self) -> Option<&MemberList> {
        None
    }

    fn doc_comment(&self) -> Option<&str> {
        None
    }

    fn release_tag(&self) -> Option<ReleaseTag> {
        None
    }

    fn sort_key(&self) -> String {
        self.canonical_reference()
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.base()
            .serialize_into(self.kind(), &self.canonical_reference(), record);
    }
}

impl dyn ApiItem {
    /// Chain of items from the tree root down to and including `self`.
    pub fn hierarchy(self: &Rc<Self>) -> Vec<ApiItemRef> {
        let mut hierarchy = vec![Rc::clone(self)];
        let mut current = self.parent();
        while let Some(item) = current {
            current = item.parent();
            hierarchy.push(item);
        }
        hierarchy.reverse();
        hierarchy
    }

    /// Nearest enclosing package, or the item itself if it is a package.
    pub fn associated_package(self: &Rc<Self>) -> Option<ApiItemRef> {
        self.hierarchy()
            .into_iter()
            .rev()
            .find(|item| item.kind() == KindTag::PACKAGE)
    }

    pub fn is_container(&self) -> bool {
        self.member_list().is_some()
    }
}

impl Debug for dyn ApiItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiItem")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("canonical_reference", &self.canonical_reference())
            .field("members", &self.members().len())
            .finish()
    }
}

/// Identity of the item behind a handle, independent of the vtable.
pub(crate) fn same_item(left: &ApiItemRef, right: &ApiItemRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(left), Rc::as_ptr(right))
}
