//! Container capability: an owned, ordered list of child items.
//!
//! # Responsibility
//! - Own child items and keep them in insertion order.
//! - Be the only code path that links a child to its parent.
//! - Rebuild nested member records during deserialization.
//!
//! # Invariants
//! - A child is attached at most once and never reparented.
//! - A container never gains itself or one of its ancestors as a child.
//! - Canonical references are unique among the members of one container.

use crate::model::codec::{record_kind, serialize_item, JsonObject, MEMBERS_FIELD};
use crate::model::error::{ApiModelError, ApiModelResult};
use crate::model::item::{same_item, ApiItem, ApiItemBase, ApiItemRef, KindTag};
use crate::model::mixins::release_tag::ReleaseTag;
use crate::model::registry::KindRegistry;
use log::debug;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Capability token required to write an item's parent link.
///
/// The field is private, so values only exist inside this module.
pub(crate) struct ParentGrant {
    _private: (),
}

/// Ordered child storage with a canonical-reference index.
#[derive(Default)]
pub struct MemberList {
    members: RefCell<Vec<ApiItemRef>>,
    by_key: RefCell<HashMap<String, ApiItemRef>>,
}

impl MemberList {
    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    pub fn to_vec(&self) -> Vec<ApiItemRef> {
        self.members.borrow().clone()
    }

    pub fn try_get_by_key(&self, canonical_reference: &str) -> Option<ApiItemRef> {
        self.by_key.borrow().get(canonical_reference).cloned()
    }

    fn contains_key(&self, canonical_reference: &str) -> bool {
        self.by_key.borrow().contains_key(canonical_reference)
    }

    fn push(&self, canonical_reference: String, member: ApiItemRef) {
        self.by_key
            .borrow_mut()
            .insert(canonical_reference, Rc::clone(&member));
        self.members.borrow_mut().push(member);
    }
}

/// Wraps `I` with an owned child list.
pub struct Container<I> {
    inner: I,
    members: MemberList,
}

impl<I: ApiItem> Container<I> {
    pub fn wrap(inner: I) -> Self {
        Self {
            inner,
            members: MemberList::default(),
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: ApiItem> ApiItem for Container<I> {
    fn base(&self) -> &ApiItemBase {
        self.inner.base()
    }

    fn kind(&self) -> KindTag {
        self.inner.kind()
    }

    fn canonical_reference(&self) -> String {
        self.inner.canonical_reference()
    }

    fn members(&self) -> Vec<ApiItemRef> {
        self.members.to_vec()
    }

    fn member_list(&self) -> Option<&MemberList> {
        Some(&self.members)
    }

    fn doc_comment(&self) -> Option<&str> {
        self.inner.doc_comment()
    }

    fn release_tag(&self) -> Option<ReleaseTag> {
        self.inner.release_tag()
    }

    fn sort_key(&self) -> String {
        self.inner.sort_key()
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.inner.serialize_into(record);
        let members = self
            .members
            .members
            .borrow()
            .iter()
            .map(|member| Value::Object(serialize_item(member.as_ref())))
            .collect();
        record.insert(MEMBERS_FIELD.to_string(), Value::Array(members));
    }
}

impl dyn ApiItem {
    /// Appends `member` and links its parent to this container.
    ///
    /// # Errors
    /// - `InvalidOperation` when this item is not a container.
    /// - `InvalidOperation` when `member` already has a parent.
    /// - `InvalidOperation` when `member` is this item or one of its ancestors.
    /// - `InvalidOperation` when a member with the same canonical reference
    ///   was already added.
    ///
    /// Both trees are left unchanged on error.
    pub fn add_member(self: &Rc<Self>, member: ApiItemRef) -> ApiModelResult<()> {
        let container_ref = self.canonical_reference();
        let member_ref = member.canonical_reference();

        let Some(list) = self.member_list() else {
            return Err(reject(format!(
                "{} `{container_ref}` cannot contain members",
                self.kind()
            )));
        };
        if member.base().has_parent() {
            return Err(reject(format!(
                "`{member_ref}` already has a parent and cannot be added to `{container_ref}`"
            )));
        }
        if self
            .hierarchy()
            .iter()
            .any(|ancestor| same_item(ancestor, &member))
        {
            return Err(reject(format!(
                "adding `{member_ref}` to `{container_ref}` would create a cycle"
            )));
        }
        if list.contains_key(&member_ref) {
            return Err(reject(format!(
                "`{container_ref}` already has a member with canonical reference `{member_ref}`"
            )));
        }

        let grant = ParentGrant { _private: () };
        if !member.base().attach_parent(Rc::downgrade(self), grant) {
            return Err(reject(format!("`{member_ref}` already has a parent")));
        }
        list.push(member_ref, member);
        Ok(())
    }

    /// Looks up a direct member by canonical reference.
    pub fn try_get_member_by_key(&self, canonical_reference: &str) -> Option<ApiItemRef> {
        self.member_list()?.try_get_by_key(canonical_reference)
    }
}

/// Rebuilds the `members` of a freshly constructed container in document order.
///
/// Stops at the first failing member; the caller drops the partially filled
/// container with the error.
pub(crate) fn deserialize_members(
    container: &ApiItemRef,
    record: &JsonObject,
    registry: &KindRegistry,
) -> ApiModelResult<()> {
    let entries = match record.get(MEMBERS_FIELD) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(ApiModelError::invalid_record(
                MEMBERS_FIELD,
                "expected array of member records",
            ))
        }
    };

    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(member_record) = entry else {
            return Err(ApiModelError::invalid_record(
                MEMBERS_FIELD,
                format!("member {index} is not an object"),
            )
            .within_member(index, "<unknown>"));
        };
        let kind = record_kind(member_record).unwrap_or("<unknown>");
        let member = registry
            .deserialize(member_record)
            .map_err(|err| err.within_member(index, kind))?;
        container
            .add_member(member)
            .map_err(|err| err.within_member(index, kind))?;
    }
    Ok(())
}

fn reject(message: String) -> ApiModelError {
    debug!("event=add_member module=model status=rejected reason={message}");
    ApiModelError::InvalidOperation(message)
}

#[cfg(test)]
mod tests {
    use super::Container;
    use crate::model::error::ApiModelError;
    use crate::model::item::{ApiItem, ApiItemBase, ApiItemOptions, ApiItemRef, KindTag};
    use std::rc::Rc;

    struct Group {
        base: ApiItemBase,
    }

    impl ApiItem for Group {
        fn base(&self) -> &ApiItemBase {
            &self.base
        }

        fn kind(&self) -> KindTag {
            KindTag::new("Group")
        }

        fn canonical_reference(&self) -> String {
            format!("({}:group)", self.name())
        }
    }

    fn group(name: &str) -> ApiItemRef {
        Rc::new(Container::wrap(Group {
            base: ApiItemBase::new(ApiItemOptions::new(name)),
        }))
    }

    fn plain(name: &str) -> ApiItemRef {
        Rc::new(Group {
            base: ApiItemBase::new(ApiItemOptions::new(name)),
        })
    }

    #[test]
    fn add_member_links_parent_and_indexes_key() {
        let root = group("root");
        let child = group("child");
        root.add_member(Rc::clone(&child)).expect("attach child");

        let parent = child.parent().expect("parent linked");
        assert_eq!(parent.canonical_reference(), "(root:group)");
        let found = root
            .try_get_member_by_key("(child:group)")
            .expect("indexed member");
        assert_eq!(found.name(), "child");
        assert!(root.try_get_member_by_key("(missing:group)").is_none());
    }

    #[test]
    fn rejects_non_container_parent() {
        let leaf = plain("leaf");
        let err = leaf
            .add_member(plain("other"))
            .expect_err("plain items cannot contain members");
        assert!(matches!(err, ApiModelError::InvalidOperation(_)));
    }

    #[test]
    fn rejects_ancestor_as_member() {
        let root = group("root");
        let child = group("child");
        root.add_member(Rc::clone(&child)).expect("attach child");

        let err = child
            .add_member(Rc::clone(&root))
            .expect_err("root is an ancestor of child");
        assert!(matches!(err, ApiModelError::InvalidOperation(_)));
        assert!(root.parent().is_none());
        assert!(child.members().is_empty());

        let err = root
            .add_member(Rc::clone(&root))
            .expect_err("an item cannot contain itself");
        assert!(matches!(err, ApiModelError::InvalidOperation(_)));
    }

    #[test]
    fn rejects_duplicate_canonical_reference() {
        let root = group("root");
        root.add_member(plain("same")).expect("first member");
        let err = root
            .add_member(plain("same"))
            .expect_err("duplicate canonical reference");
        assert!(matches!(err, ApiModelError::InvalidOperation(_)));
        assert_eq!(root.members().len(), 1);
    }
}
