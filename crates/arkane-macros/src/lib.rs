use proc_macro::TokenStream;

mod weave;

/// Weave every `#[structural_equality]` struct declared in an inline module.
///
/// ```ignore
/// #[arkane::weave]
/// mod model {
///     #[structural_equality]
///     pub struct Point { pub x: i32, pub y: i32 }
///
///     impl PartialEq for Point {
///         fn eq(&self, other: &Self) -> bool { arkane::operator() }
///     }
/// }
/// ```
///
/// `#[weave(crate = "path")]` names the runtime crate when it is not
/// reachable as `arkane::core`.
#[proc_macro_attribute]
pub fn weave(attr: TokenStream, item: TokenStream) -> TokenStream {
    weave::expand(attr.into(), item.into()).into()
}
