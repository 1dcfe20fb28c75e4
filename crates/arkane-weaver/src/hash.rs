//! Hash Combiner: synthesizes `HashCode::hash_code` for a woven type.
//!
//! The accumulator starts at `0`. The base hash is added first, then every
//! comparable field and additional hash method is folded with `acc * 397 ^ term`.
//! With a zero accumulator that fold is a plain XOR, so the first term is
//! emitted as `hash ^= term`. A nullable collection always counts as a term
//! position: when absent it leaves the accumulator untouched, and
//! `combine(0, t) == t` keeps a later first term equal to a plain XOR.

use crate::{
    classify::is_i32,
    context::SynthContext,
    diagnostic::{Diagnostic, DiagnosticCode},
    model::{AuxiliaryKind, AuxiliaryMethod, EnumDescriptor, FieldDescriptor, FieldKind},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{FnArg, ReturnType, Signature};

/// Generate the `HashCode` impl for one woven type.
pub fn hash_impl(cx: &SynthContext<'_>) -> TokenStream {
    let core = cx.core;
    let mut bounds = Vec::new();
    let mut stmts = Vec::new();
    let mut started = false;

    if let Some(base) = cx.ty.compared_base(cx.ignored) {
        let member = &base.member;
        let base_ty = &base.ty;
        if cx.params.mentioned_by(base_ty) {
            bounds.push(quote!(#base_ty: #core::HashCode));
        }
        stmts.push(quote! {
            hash = hash.wrapping_add(#core::HashCode::hash_code(&self.#member));
        });
        started = true;
    }

    for field in cx.ty.comparable_fields(cx.ignored) {
        if let Some(bound) = field_bound(cx, field) {
            bounds.push(bound);
        }
        let member = &field.member;

        if field.kind == (FieldKind::Collection { nullable: true }) {
            // an absent collection contributes no term at all
            stmts.push(quote! {
                if let ::core::option::Option::Some(items) = &self.#member {
                    hash = #core::__internal::combine(
                        hash,
                        #core::__internal::collection_hash(items.iter()),
                    );
                }
            });
            started = true;
            continue;
        }

        let term = field_term(cx, field);
        stmts.push(fold(core, started, &term));
        started = true;
    }

    for method in cx.ty.auxiliary_methods(AuxiliaryKind::Hash) {
        let ident = method.ident();
        stmts.push(fold(core, started, &quote!(self.#ident())));
        started = true;
    }

    let header = cx.impl_header(&quote!(#core::HashCode), &bounds);
    let body = if stmts.is_empty() {
        quote!(0)
    } else {
        quote! {
            let mut hash: i32 = 0;
            #(#stmts)*
            hash
        }
    };

    quote! {
        #header {
            #[allow(clippy::unnecessary_cast)]
            fn hash_code(&self) -> i32 {
                #body
            }
        }
    }
}

// Fold one term into the running `hash`.
fn fold(core: &TokenStream, started: bool, term: &TokenStream) -> TokenStream {
    if started {
        quote!(hash = #core::__internal::combine(hash, #term);)
    } else {
        quote!(hash ^= #term;)
    }
}

// The contribution of a field that always produces a term.
fn field_term(cx: &SynthContext<'_>, field: &FieldDescriptor) -> TokenStream {
    let core = cx.core;
    let member = &field.member;

    match field.kind {
        FieldKind::Primitive if is_i32(&field.ty) => quote!(self.#member),
        FieldKind::Primitive | FieldKind::Enum | FieldKind::Normal => {
            quote!(#core::HashCode::hash_code(&self.#member))
        }
        FieldKind::Nullable => quote!(#core::__internal::nullable_hash(self.#member.as_ref())),
        FieldKind::Collection { .. } => {
            quote!(#core::__internal::collection_hash(self.#member.iter()))
        }
    }
}

// `HashCode` bound for a field whose type mentions a generic parameter.
fn field_bound(cx: &SynthContext<'_>, field: &FieldDescriptor) -> Option<TokenStream> {
    if !cx.params.mentioned_by(&field.ty) {
        return None;
    }
    let core = cx.core;

    let hashed = match field.kind {
        FieldKind::Nullable | FieldKind::Collection { .. } => field.inner.as_ref()?.to_token_stream(),
        _ => field.ty.to_token_stream(),
    };

    Some(quote!(#hashed: #core::HashCode))
}

/// Check an `#[additional_hash]` method is `fn name(&self) -> i32`.
pub fn validate_auxiliary_hash(owner: &str, method: &AuxiliaryMethod) -> Result<(), Diagnostic> {
    let sig = &method.sig;
    let receiver_ok = matches!(
        sig.inputs.first(),
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.mutability.is_none()
    );
    let returns_i32 = matches!(&sig.output, ReturnType::Type(_, ty) if is_i32(ty));

    if receiver_ok && sig.inputs.len() == 1 && returns_i32 && is_plain(sig) {
        return Ok(());
    }

    let name = &sig.ident;
    Err(Diagnostic::spanned(
        DiagnosticCode::AdditionalHashSignature,
        sig,
        format!(
            "#[additional_hash] method '{name}' on '{owner}' must have the signature \
             `fn {name}(&self) -> i32`, for example:\n\n\
             impl {owner} {{\n    #[additional_hash]\n    fn {name}(&self) -> i32 {{\n        \
             self.currency.len() as i32\n    }}\n}}"
        ),
    ))
}

// No generics, no async, no unsafe, no variadics.
pub(crate) fn is_plain(sig: &Signature) -> bool {
    sig.generics.params.is_empty()
        && sig.asyncness.is_none()
        && sig.unsafety.is_none()
        && sig.variadic.is_none()
        && sig.constness.is_none()
}

/// `HashCode` for a fieldless enum, hashing each variant's discriminant as `i32`.
#[must_use]
pub fn enum_hash_impl(item: &EnumDescriptor, core: &TokenStream) -> TokenStream {
    let ident = &item.ident;
    let mut arms = Vec::new();
    let mut last: Option<(&syn::Expr, i32)> = None;

    for (index, (variant, discriminant)) in item.variants.iter().enumerate() {
        let value = match (discriminant, last) {
            (Some(expr), _) => {
                last = Some((expr, 0));
                cast_i32(expr)
            }
            (None, Some((expr, step))) => {
                let step = step + 1;
                last = Some((expr, step));
                let base = cast_i32(expr);
                quote!((#base).wrapping_add(#step))
            }
            (None, None) => {
                let index = i32::try_from(index).unwrap_or(i32::MAX);
                quote!(#index)
            }
        };
        arms.push(quote!(Self::#variant => #value,));
    }

    quote! {
        #[automatically_derived]
        impl #core::HashCode for #ident {
            #[allow(clippy::unnecessary_cast)]
            fn hash_code(&self) -> i32 {
                match *self {
                    #(#arms)*
                }
            }
        }
    }
}

// `expr as i32`, parenthesized unless the expression is atomic.
fn cast_i32(expr: &syn::Expr) -> TokenStream {
    match expr {
        syn::Expr::Lit(_) | syn::Expr::Path(_) => quote!(#expr as i32),
        _ => quote!((#expr) as i32),
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

        hash_impl(&cx).to_string()
    }

    #[test]
    fn first_field_is_xored_and_later_fields_are_combined() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Point { x: i32, y: u8 }
            },
            "Point",
        );

        let first = quote!(hash ^= self.x;).to_string();
        let second = quote! {
            hash = ::arkane_core::__internal::combine(hash, ::arkane_core::HashCode::hash_code(&self.y));
        }
        .to_string();

        assert!(out.contains(&first), "{out}");
        assert!(out.contains(&second), "{out}");
    }

    #[test]
    fn base_is_added_before_fields() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Shape { sides: u8 }

                #[structural_equality]
                struct Square { #[base] shape: Shape, side: i32 }
            },
            "Square",
        );

        let base = quote! {
            hash = hash.wrapping_add(::arkane_core::HashCode::hash_code(&self.shape));
        }
        .to_string();
        let side = quote!(hash = ::arkane_core::__internal::combine(hash, self.side);).to_string();

        assert!(out.find(&base).unwrap() < out.find(&side).unwrap(), "{out}");
    }

    #[test]
    fn ignored_base_and_fields_contribute_nothing() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Shape { sides: u8 }

                #[structural_equality(ignore_base_class)]
                struct Square {
                    #[base] shape: Shape,
                    #[ignore_during_equals] cache: u64,
                }
            },
            "Square",
        );

        assert!(!out.contains("shape"), "{out}");
        assert!(!out.contains("cache"), "{out}");
        assert!(out.contains("fn hash_code (& self) -> i32 { 0 }"), "{out}");
    }

    #[test]
    fn nullable_collections_are_skipped_when_absent() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Basket { items: Option<Vec<u32>>, label: Option<String> }
            },
            "Basket",
        );

        assert!(out.contains("if let :: core :: option :: Option :: Some (items) = & self . items"));
        assert!(out.contains("nullable_hash (self . label . as_ref ())"));
    }

    #[test]
    fn generic_fields_get_bounds() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Wrapper<T> { value: T, items: Vec<T>, count: u32 }
            },
            "Wrapper",
        );

        assert!(out.contains("where T : :: arkane_core :: HashCode , T : :: arkane_core :: HashCode"), "{out}");
    }

    #[test]
    fn auxiliary_hash_is_folded_last() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Money { cents: i64 }

                impl Money {
                    #[additional_hash]
                    fn currency_hash(&self) -> i32 { 7 }
                }
            },
            "Money",
        );

        assert!(out.contains("combine (hash , self . currency_hash ())"), "{out}");
    }

    #[test]
    fn nullable_collection_leading_field_still_starts_the_fold() {
        let out = generate(
            parse_quote! {
                #[structural_equality]
                struct Lead { tags: Option<Vec<i32>>, x: i32 }
            },
            "Lead",
        );

        let x = quote!(hash = ::arkane_core::__internal::combine(hash, self.x);).to_string();
        assert!(out.contains(&x), "{out}");
        assert!(!out.contains("hash ^="), "{out}");
    }

    #[test]
    fn wrong_auxiliary_hash_signature_is_rejected() {
        let file: syn::File = parse_quote! {
            #[structural_equality(do_not_add_get_hash_code)]
            struct Money { cents: i64 }

            impl Money {
                #[additional_hash]
                fn currency_hash(&self, salt: i32) -> u64 { 7 }
            }
        };
        let errors = discover(&file.items).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::AdditionalHashSignature);
        assert!(errors[0].message.contains("fn currency_hash(&self) -> i32"));
    }

    #[test]
    fn enum_discriminants_continue_from_explicit_values() {
        let item = EnumDescriptor {
            ident: parse_quote!(Status),
            variants: vec![
                (parse_quote!(Active), None),
                (parse_quote!(Paused), Some(parse_quote!(10))),
                (parse_quote!(Retired), None),
                (parse_quote!(Lost), Some(parse_quote!(-1))),
            ],
        };
        let out = enum_hash_impl(&item, &quote!(::arkane_core)).to_string();

        assert!(out.contains("Self :: Active => 0i32"), "{out}");
        assert!(out.contains("Self :: Paused => 10 as i32"), "{out}");
        assert!(out.contains("Self :: Retired => (10 as i32) . wrapping_add (1i32)"), "{out}");
        assert!(out.contains("Self :: Lost => (- 1) as i32"), "{out}");
    }
}
