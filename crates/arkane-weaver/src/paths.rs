use proc_macro2::TokenStream;
use quote::quote;
use std::env;
use syn::Path;

const INTERNAL_CRATES: &[&str] = &["arkane-build", "arkane-core", "arkane-macros", "arkane-weaver"];

///
/// CratePaths
///
/// Resolves the runtime crate root used by generated code. Internal arkane
/// crates name `arkane_core` directly; everything else goes through the
/// `arkane::core` facade. `ARKANE_CORE_CRATE` overrides both.
///

#[derive(Clone, Debug)]
pub struct CratePaths {
    pub core: TokenStream,
}

impl CratePaths {
    #[must_use]
    pub fn new() -> Self {
        let pkg = env::var("CARGO_PKG_NAME").unwrap_or_default();
        let override_path = env::var("ARKANE_CORE_CRATE").ok();

        Self::resolve(&pkg, override_path.as_deref())
    }

    /// Use an explicit runtime path instead of resolving one.
    #[must_use]
    pub fn with_core(core: TokenStream) -> Self {
        Self { core }
    }

    // an override that does not parse as a path is ignored
    fn resolve(pkg: &str, override_path: Option<&str>) -> Self {
        let core = override_path
            .and_then(|value| syn::parse_str::<Path>(value.trim()).ok())
            .map_or_else(
                || {
                    if INTERNAL_CRATES.contains(&pkg) {
                        quote!(::arkane_core)
                    } else {
                        quote!(::arkane::core)
                    }
                },
                |path| quote!(#path),
            );

        Self { core }
    }
}

impl Default for CratePaths {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
