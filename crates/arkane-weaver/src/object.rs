//! Boxing/type-check adapter: the untyped `Object` impl.

use crate::context::SynthContext;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

/// Generate the `Object` impl for one woven type.
///
/// `equals_object` admits `other` through the type's `TypeCheck` policy and
/// delegates to the typed `StructuralEq::equals`.
#[must_use]
pub fn object_impl(cx: &SynthContext<'_>) -> TokenStream {
    let core = cx.core;
    let policy = Ident::new(cx.ty.config.type_check.pascal_name(), Span::call_site());

    let mut bounds = Vec::new();
    if !cx.params.is_empty() {
        let self_ty = cx.self_ty();
        bounds.push(quote!(#self_ty: #core::StructuralEq));
        bounds.extend(cx.params.iter().map(|param| {
            let param = Ident::new(param, Span::call_site());
            quote!(#param: 'static)
        }));
    }

    let base_object = cx.ty.base.as_ref().map(|base| {
        let member = &base.member;
        let base_ty = &base.ty;
        if cx.params.mentioned_by(base_ty) {
            bounds.push(quote!(#base_ty: #core::Object));
        }
        quote! {
            fn base_object(&self) -> ::core::option::Option<&dyn #core::Object> {
                ::core::option::Option::Some(&self.#member)
            }
        }
    });

    let identity = (!cx.ty.is_value_type).then(|| {
        quote! {
            if #core::__internal::same_instance(self, other) {
                return true;
            }
        }
    });

    let header = cx.impl_header(&quote!(#core::Object), &bounds);

    quote! {
        #header {
            fn as_any(&self) -> &dyn #core::__internal::Any {
                self
            }

            #base_object

            fn equals_object(&self, other: &dyn #core::Object) -> bool {
                #identity
                match #core::__internal::admit::<Self>(#core::TypeCheck::#policy, self, other) {
                    ::core::option::Option::Some(other) => #core::StructuralEq::equals(self, other),
                    ::core::option::Option::None => false,
                }
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::discover;
    use syn::{Item, parse_quote};

    fn generate(file: syn::File, name: &str) -> String {
        let items: Vec<Item> = file.items;
        let discovery = discover(&items).unwrap();
        let core = quote!(::arkane_core);
        let ty = discovery.get_type(name).unwrap();
        let cx = SynthContext::new(ty, &discovery.ignored, &core);

        object_impl(&cx).to_string()
    }

    #[test]
    fn default_policy_compares_runtime_types() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Point { x: i32 }
            },
            "Point",
        );

        assert!(out.contains("TypeCheck :: ExactlyTheSameTypeAsThis"), "{out}");
        assert!(out.contains("same_instance (self , other)"), "{out}");
        assert!(!out.contains("base_object"), "{out}");
    }

    #[test]
    fn configured_policy_and_base_are_emitted() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Shape { sides: u8 }

                #[derive(Clone, Copy)]
                #[structural_equality(type_check = "exactly_of_type", ignore_base_class)]
                struct Square { #[base] shape: Shape, side: u32 }
            },
            "Square",
        );

        assert!(out.contains("TypeCheck :: ExactlyOfType"), "{out}");
        // ignore_base_class affects comparison only; the base chain stays visible
        assert!(out.contains("Some (& self . shape)"), "{out}");
        assert!(!out.contains("same_instance"), "{out}");
    }

    #[test]
    fn generic_types_are_bounded() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Boxed<T> { value: T }
            },
            "Boxed",
        );

        assert!(
            out.contains("where Boxed < T > : :: arkane_core :: StructuralEq , T : 'static"),
            "{out}"
        );
    }
}
