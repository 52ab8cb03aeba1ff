//! Kind registry and tree deserializer.
//!
//! # Responsibility
//! - Map kind tags to reconstruction factories.
//! - Dispatch persisted records to their factory and rebuild whole subtrees.
//! - Hold the process-wide registry that downstream kinds extend.
//!
//! # Invariants
//! - A kind is registered at most once per registry.
//! - Registration completes before deserialization starts; the global
//!   registry is read-only in practice after startup.
//! - A failed deserialization never returns a partial tree.

use super::codec::{read_required_str, JsonObject, RecordOptions, KIND_FIELD, MEMBERS_FIELD};
use super::error::{ApiModelError, ApiModelResult};
use super::item::{ApiItem, ApiItemRef, KindTag};
use super::items::builtin_factories;
use super::mixins::container::deserialize_members;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::{PoisonError, RwLock};
use std::time::Instant;

/// Rebuilds one item (and its subtree) from a persisted record.
pub type KindFactory = fn(&JsonObject, &KindRegistry) -> ApiModelResult<ApiItemRef>;

static KIND_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid kind tag regex"));

static GLOBAL_REGISTRY: Lazy<RwLock<KindRegistry>> =
    Lazy::new(|| RwLock::new(KindRegistry::with_builtin_kinds()));

/// A kind that can be rebuilt from its own options type.
///
/// `Item` is the composed node, usually the core type wrapped in its
/// capabilities. Downstream crates implement this on their local core type.
/// Implementors get a ready-made factory through [`deserialize_kind`].
///
/// `Item::kind()` must return `KIND`; the generic factory rejects items
/// whose tag differs from the one they were registered under.
pub trait ItemKind {
    const KIND: KindTag;
    type Options: RecordOptions;
    type Item: ApiItem + 'static;

    fn from_options(options: Self::Options) -> Self::Item;
}

/// Generic factory: read options, construct, then attach nested members.
///
/// # Errors
/// - `InvalidOperation` when the built item reports a kind other than `K::KIND`.
/// - `InvalidRecord` on `members` when a non-container kind carries members.
pub fn deserialize_kind<K: ItemKind>(
    record: &JsonObject,
    registry: &KindRegistry,
) -> ApiModelResult<ApiItemRef> {
    let mut options = K::Options::default();
    options.on_deserialize_into(record)?;
    let item: ApiItemRef = Rc::new(K::from_options(options));
    if item.kind() != K::KIND {
        return Err(ApiModelError::InvalidOperation(format!(
            "factory registered for {} built a {} item",
            K::KIND,
            item.kind()
        )));
    }
    if item.is_container() {
        deserialize_members(&item, record, registry)?;
    } else if !matches!(record.get(MEMBERS_FIELD), None | Some(Value::Null)) {
        return Err(ApiModelError::invalid_record(
            MEMBERS_FIELD,
            format!("{} cannot contain members", K::KIND),
        ));
    }
    Ok(item)
}

/// Kind tag → factory mapping.
#[derive(Default, Clone)]
pub struct KindRegistry {
    factories: BTreeMap<String, KindFactory>,
}

impl KindRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in kind.
    pub fn with_builtin_kinds() -> Self {
        let factories = builtin_factories()
            .into_iter()
            .map(|(kind, factory)| (kind.as_str().to_string(), factory))
            .collect();
        Self { factories }
    }

    /// Associates `kind` with `factory`.
    ///
    /// # Errors
    /// - `InvalidKindTag` when the tag is not an upper-camel identifier.
    /// - `DuplicateKind` when the tag already has a factory.
    pub fn register(&mut self, kind: KindTag, factory: KindFactory) -> ApiModelResult<()> {
        let tag = kind.as_str();
        if !KIND_TAG_RE.is_match(tag) {
            return Err(ApiModelError::InvalidKindTag(tag.to_string()));
        }
        if self.factories.contains_key(tag) {
            return Err(ApiModelError::DuplicateKind(tag.to_string()));
        }
        self.factories.insert(tag.to_string(), factory);
        info!("event=kind_register module=registry status=ok kind={tag}");
        Ok(())
    }

    /// Registers a kind using the generic options-driven factory.
    pub fn register_item_kind<K: ItemKind>(&mut self) -> ApiModelResult<()> {
        self.register(K::KIND, deserialize_kind::<K>)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Returns registered kind tags in sorted order.
    pub fn kinds(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Rebuilds the item described by `record`, including all members.
    ///
    /// # Errors
    /// - `InvalidRecord` when `kind` is missing or not a string.
    /// - `UnknownKind` when no factory is registered for `kind`.
    /// - Whatever the factory reports; member failures arrive wrapped in
    ///   `DeserializationFailed`.
    pub fn deserialize(&self, record: &JsonObject) -> ApiModelResult<ApiItemRef> {
        let kind = read_required_str(record, KIND_FIELD)?;
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ApiModelError::UnknownKind(kind.to_string()))?;
        factory(record, self)
    }
}

/// Registers a downstream kind in the process-wide registry.
///
/// Must run before the first [`deserialize`] that needs it.
pub fn register_kind(kind: KindTag, factory: KindFactory) -> ApiModelResult<()> {
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(kind, factory)
}

/// Returns whether the process-wide registry knows `kind`.
pub fn is_kind_registered(kind: &str) -> bool {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(kind)
}

/// Rebuilds a tree using the process-wide registry.
///
/// The registry stays read-locked while factories run. Factories must recurse
/// through the `&KindRegistry` they are handed and never call
/// [`register_kind`] or this function, or the lock is re-entered.
///
/// # Side effects
/// - Emits `deserialize` logging events with duration and status.
pub fn deserialize(record: &JsonObject) -> ApiModelResult<ApiItemRef> {
    let started_at = Instant::now();
    let registry = GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    match registry.deserialize(record) {
        Ok(item) => {
            info!(
                "event=deserialize module=registry status=ok kind={} duration_ms={}",
                item.kind(),
                started_at.elapsed().as_millis()
            );
            Ok(item)
        }
        Err(err) => {
            error!(
                "event=deserialize module=registry status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
