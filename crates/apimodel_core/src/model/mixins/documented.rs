//! Documented capability: a raw documentation comment attached to an item.

use crate::model::codec::{read_optional_str, JsonObject, RecordOptions, DOC_COMMENT_FIELD};
use crate::model::error::ApiModelResult;
use crate::model::item::{ApiItem, ApiItemBase, ApiItemRef, KindTag};
use crate::model::mixins::container::MemberList;
use crate::model::mixins::release_tag::ReleaseTag;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentedOptions {
    pub doc_comment: String,
}

impl DocumentedOptions {
    pub fn new(doc_comment: impl Into<String>) -> Self {
        Self {
            doc_comment: doc_comment.into(),
        }
    }
}

impl RecordOptions for DocumentedOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.doc_comment = read_optional_str(record, DOC_COMMENT_FIELD)?
            .unwrap_or_default()
            .to_string();
        Ok(())
    }
}

/// Wraps `I` with a documentation comment.
pub struct Documented<I> {
    inner: I,
    doc_comment: String,
}

impl<I: ApiItem> Documented<I> {
    pub fn wrap(inner: I, options: DocumentedOptions) -> Self {
        Self {
            inner,
            doc_comment: options.doc_comment,
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: ApiItem> ApiItem for Documented<I> {
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
        self.inner.members()
    }

    fn member_list(&self) -> Option<&MemberList> {
        self.inner.member_list()
    }

    fn doc_comment(&self) -> Option<&str> {
        Some(&self.doc_comment)
    }

    fn release_tag(&self) -> Option<ReleaseTag> {
        self.inner.release_tag()
    }

    fn sort_key(&self) -> String {
        self.inner.sort_key()
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.inner.serialize_into(record);
        record.insert(
            DOC_COMMENT_FIELD.to_string(),
            Value::from(self.doc_comment.as_str()),
        );
    }
}
