//! Runtime support for structural equality.
//!
//! Woven types implement three traits:
//! - `StructuralEq`: typed, field-by-field equality.
//! - `Object`: untyped equality behind `&dyn Object`, gated by a `TypeCheck` policy.
//! - `HashCode`: a deterministic 32-bit hash consistent with both.
//!
//! The free functions are the building blocks generated code calls into.

pub mod eq;
pub mod hash;
pub mod object;
pub mod operator;
pub mod type_check;

pub use eq::StructuralEq;
pub use hash::{HASH_MULTIPLIER, HashCode};
pub use object::{Object, equals};
pub use operator::operator;
pub use type_check::{ParseTypeCheckError, TypeCheck};

/// Helpers referenced by generated code.
/// Not a stable API; intended for woven impls only.
#[doc(hidden)]
pub mod __internal {
    pub use crate::{
        eq::{nullable_sequence_equal, object_equals, sequence_equal},
        hash::{collection_hash, combine, nullable_hash},
        object::{admit, downcast_subtype, same_instance},
    };
    pub use std::any::Any;
}
