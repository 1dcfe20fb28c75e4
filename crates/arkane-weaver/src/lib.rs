//! Structural equality synthesis over Rust items.
//!
//! A weave pass takes the items of a module or source file, finds the structs
//! marked `#[structural_equality]`, and emits `StructuralEq`, `Object` and
//! `HashCode` impls for them. `PartialEq` stubs whose body is the
//! `arkane::operator()` marker are rewritten to call the generated equality.
//!
//! Passes are deterministic: the same items always produce the same output.

pub mod attr;
pub mod classify;
pub mod context;
pub mod diagnostic;
pub mod discover;
pub mod equality;
pub mod error;
pub mod hash;
pub mod model;
pub mod object;
pub mod operator;
pub mod paths;
pub mod sort;
pub mod trace;
pub mod util;
pub mod weaver;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use error::WeaveError;
pub use paths::CratePaths;
pub use trace::{RecordingSink, WeavePhase, WeaveTraceEvent, WeaveTraceSink};
pub use weaver::{WeaveOptions, WeaveOutput, Weaver, WovenType, strip_all_markers, weave};
