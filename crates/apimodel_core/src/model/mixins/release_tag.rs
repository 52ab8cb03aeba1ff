//! Release tag capability: the maturity level an item is published at.

use crate::model::codec::{JsonObject, RecordOptions, RELEASE_TAG_FIELD};
use crate::model::error::{ApiModelError, ApiModelResult};
use crate::model::item::{ApiItem, ApiItemBase, ApiItemRef, KindTag};
use crate::model::mixins::container::MemberList;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Published maturity of an item, from least to most visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReleaseTag {
    /// No tag was declared.
    #[default]
    None,
    Internal,
    Alpha,
    Beta,
    Public,
}

impl ReleaseTag {
    /// Stable string id used in persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Internal => "Internal",
            Self::Alpha => "Alpha",
            Self::Beta => "Beta",
            Self::Public => "Public",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseTagOptions {
    pub release_tag: ReleaseTag,
}

impl ReleaseTagOptions {
    pub fn new(release_tag: ReleaseTag) -> Self {
        Self { release_tag }
    }
}

impl RecordOptions for ReleaseTagOptions {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()> {
        self.release_tag = match record.get(RELEASE_TAG_FIELD) {
            None | Some(Value::Null) => ReleaseTag::None,
            Some(value) => ReleaseTag::deserialize(value)
                .map_err(|err| ApiModelError::invalid_record(RELEASE_TAG_FIELD, err.to_string()))?,
        };
        Ok(())
    }
}

/// Wraps `I` with a release tag.
pub struct ReleaseTagged<I> {
    inner: I,
    release_tag: ReleaseTag,
}

impl<I: ApiItem> ReleaseTagged<I> {
    pub fn wrap(inner: I, options: ReleaseTagOptions) -> Self {
        Self {
            inner,
            release_tag: options.release_tag,
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: ApiItem> ApiItem for ReleaseTagged<I> {
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
        self.inner.doc_comment()
    }

    fn release_tag(&self) -> Option<ReleaseTag> {
        Some(self.release_tag)
    }

    fn sort_key(&self) -> String {
        self.inner.sort_key()
    }

    fn serialize_into(&self, record: &mut JsonObject) {
        self.inner.serialize_into(record);
        record.insert(
            RELEASE_TAG_FIELD.to_string(),
            Value::from(self.release_tag.as_str()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ReleaseTag, ReleaseTagOptions};
    use crate::model::codec::RecordOptions;
    use crate::model::error::ApiModelError;
    use serde_json::json;

    #[test]
    fn reads_release_tag_from_record() {
        let record = json!({ "releaseTag": "Beta" });
        let mut options = ReleaseTagOptions::default();
        options
            .on_deserialize_into(record.as_object().expect("object"))
            .expect("valid tag");
        assert_eq!(options.release_tag, ReleaseTag::Beta);
    }

    #[test]
    fn missing_release_tag_defaults_to_none() {
        let record = json!({});
        let mut options = ReleaseTagOptions::new(ReleaseTag::Public);
        options
            .on_deserialize_into(record.as_object().expect("object"))
            .expect("absent tag");
        assert_eq!(options.release_tag, ReleaseTag::None);
    }

    #[test]
    fn rejects_unknown_release_tag() {
        let record = json!({ "releaseTag": "public" });
        let err = ReleaseTagOptions::default()
            .on_deserialize_into(record.as_object().expect("object"))
            .expect_err("tags are case-sensitive");
        assert!(matches!(
            err,
            ApiModelError::InvalidRecord {
                field: "releaseTag",
                ..
            }
        ));
    }

    #[test]
    fn serde_and_record_ids_agree() {
        for tag in [
            ReleaseTag::None,
            ReleaseTag::Internal,
            ReleaseTag::Alpha,
            ReleaseTag::Beta,
            ReleaseTag::Public,
        ] {
            assert_eq!(
                serde_json::to_value(tag).expect("serialize tag"),
                json!(tag.as_str())
            );
        }
    }
}
