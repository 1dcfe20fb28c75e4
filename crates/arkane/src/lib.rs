//! ## Crate layout
//! - `core`: runtime traits and the helpers woven code calls into.
//! - `weaver`: the synthesis library behind both entry points.
//! - `build`: build-script helpers for weaving whole files.
//!
//! Types opt in with `#[structural_equality]` inside a `#[arkane::weave]`
//! module, or inside a file woven by `arkane::build!` and pulled in with
//! `arkane::include_woven!`.

pub use arkane_build as build;
pub use arkane_core as core;
pub use arkane_weaver as weaver;

// export so woven code inside this crate resolves `::arkane`
extern crate self as arkane;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use arkane_build::build;
pub use arkane_core::operator;
pub use arkane_macros::weave;

/// Include a file woven by `arkane::build!` (placed in `OUT_DIR`).
#[macro_export]
macro_rules! include_woven {
    ($file:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $file));
    };
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        HashCode as _, Object as _, StructuralEq as _, TypeCheck, equals,
    };
}
