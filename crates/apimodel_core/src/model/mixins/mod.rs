//! Capability wrappers composed onto node kinds.
//!
//! # Responsibility
//! - Layer orthogonal state onto any `ApiItem` without inheritance.
//!
//! # Invariants
//! - A wrapper forwards every `ApiItem` method it does not own to the item it
//!   wraps.
//! - `serialize_into` calls the wrapped item first, then adds the wrapper's
//!   own fields, so records accumulate regardless of nesting order.

pub mod container;
pub mod documented;
pub mod release_tag;

pub use container::{Container, MemberList};
pub use documented::{Documented, DocumentedOptions};
pub use release_tag::{ReleaseTag, ReleaseTagOptions, ReleaseTagged};
