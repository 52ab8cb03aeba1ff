//! API item tree: identity core, capabilities, kinds and their codec.
//!
//! # Responsibility
//! - Model the public surface of a library as a tree of typed items.
//! - Compose orthogonal capabilities onto kinds by wrapping.
//! - Flatten trees into records and rebuild them through the kind registry.
//!
//! # Invariants
//! - Parent links form a forest and are only written by `Container`.
//! - Member order survives a serialize/deserialize round-trip.
//! - Canonical references are unique among siblings.

pub mod codec;
pub mod error;
pub mod item;
pub mod items;
pub mod mixins;
pub mod registry;

pub use codec::{record_kind, serialize_item, JsonObject, RecordOptions};
pub use error::{ApiModelError, ApiModelResult};
pub use item::{ApiItem, ApiItemBase, ApiItemOptions, ApiItemRef, KindTag};
pub use registry::{
    deserialize, deserialize_kind, is_kind_registered, register_kind, ItemKind, KindFactory,
    KindRegistry,
};
