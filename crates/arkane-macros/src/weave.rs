use arkane_weaver::{CratePaths, WeaveOptions, Weaver, strip_all_markers};
use darling::{FromMeta, ast::NestedMeta};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{ItemMod, Path};

///
/// WeaveArgs
///

#[derive(Debug, Default, FromMeta)]
struct WeaveArgs {
    #[darling(default, rename = "crate")]
    crate_path: Option<Path>,
}

impl WeaveArgs {
    fn parse(attr: TokenStream) -> Result<Self, darling::Error> {
        if attr.is_empty() {
            return Ok(Self::default());
        }
        let items = NestedMeta::parse_meta_list(attr)?;

        Self::from_list(&items)
    }

    fn paths(&self) -> CratePaths {
        self.crate_path.as_ref().map_or_else(CratePaths::new, |path| {
            CratePaths::with_core(path.to_token_stream())
        })
    }
}

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match WeaveArgs::parse(attr) {
        Ok(args) => args,
        Err(err) => return err.write_errors(),
    };
    let module = match syn::parse2::<ItemMod>(item) {
        Ok(module) => module,
        Err(err) => return err.to_compile_error(),
    };

    let ItemMod {
        attrs,
        vis,
        unsafety,
        mod_token,
        ident,
        content,
        ..
    } = module;

    let Some((_, items)) = content else {
        return syn::Error::new_spanned(
            &ident,
            "#[weave] needs an inline module body; use arkane::build! to weave a whole file",
        )
        .to_compile_error();
    };

    let options = WeaveOptions {
        paths: args.paths(),
        strip_markers: true,
    };

    let body = match Weaver::new(options).weave(items.clone()) {
        Ok(output) => output.to_token_stream(),
        Err(err) => {
            // keep the module visible so the errors are the only ones reported
            let mut items = items;
            strip_all_markers(&mut items);
            let errors = err.to_compile_error();

            quote!(#(#items)* #errors)
        }
    };

    quote! {
        #(#attrs)*
        #vis #unsafety #mod_token #ident {
            #body
        }
    }
}

///
/// TESTS
///
