//! Equality Synthesizer: the typed `StructuralEq::equals` body.

use crate::{
    context::SynthContext,
    diagnostic::{Diagnostic, DiagnosticCode},
    hash::is_plain,
    model::{AuxiliaryKind, AuxiliaryMethod, FieldDescriptor, FieldKind, type_ident},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{FnArg, ReturnType, Type};

/// Generate the `StructuralEq` impl for one woven type.
///
/// Comparisons run in a fixed order and return `false` at the first mismatch:
/// identity, base, fields in declaration order, then additional equality methods.
pub fn equality_impl(cx: &SynthContext<'_>) -> TokenStream {
    let core = cx.core;
    let mut bounds = Vec::new();
    let mut checks = Vec::new();

    // value types have no identity to short-circuit on
    if !cx.ty.is_value_type {
        checks.push(quote! {
            if ::core::ptr::eq(self, other) {
                return true;
            }
        });
    }

    if let Some(base) = cx.ty.compared_base(cx.ignored) {
        let member = &base.member;
        let base_ty = &base.ty;
        if cx.params.mentioned_by(base_ty) {
            bounds.push(quote!(#base_ty: #core::StructuralEq));
        }
        checks.push(quote! {
            if !#core::StructuralEq::equals(&self.#member, &other.#member) {
                return false;
            }
        });
    }

    for field in cx.ty.comparable_fields(cx.ignored) {
        if let Some(bound) = field_bound(cx, field) {
            bounds.push(bound);
        }
        let differs = field_differs(core, field);
        checks.push(quote! {
            if #differs {
                return false;
            }
        });
    }

    for method in cx.ty.auxiliary_methods(AuxiliaryKind::Equality) {
        let ident = method.ident();
        checks.push(quote! {
            if !self.#ident(other) {
                return false;
            }
        });
    }

    let header = cx.impl_header(&quote!(#core::StructuralEq), &bounds);
    let other = if checks.is_empty() {
        quote!(_other)
    } else {
        quote!(other)
    };

    quote! {
        #header {
            fn equals(&self, #other: &Self) -> bool {
                #(#checks)*
                true
            }
        }
    }
}

// Expression that is true when the field differs between `self` and `other`.
fn field_differs(core: &TokenStream, field: &FieldDescriptor) -> TokenStream {
    let member = &field.member;

    match field.kind {
        FieldKind::Primitive => quote!(self.#member != other.#member),
        FieldKind::Enum => quote! {
            ::core::mem::discriminant(&self.#member) != ::core::mem::discriminant(&other.#member)
        },
        FieldKind::Collection { nullable: false } => quote! {
            !#core::__internal::sequence_equal(self.#member.iter(), other.#member.iter())
        },
        FieldKind::Collection { nullable: true } => quote! {
            !#core::__internal::nullable_sequence_equal(
                self.#member.as_ref().map(|items| items.iter()),
                other.#member.as_ref().map(|items| items.iter()),
            )
        },
        FieldKind::Nullable | FieldKind::Normal => quote! {
            !#core::__internal::object_equals(&self.#member, &other.#member)
        },
    }
}

// `PartialEq` bound for a field whose type mentions a generic parameter.
fn field_bound(cx: &SynthContext<'_>, field: &FieldDescriptor) -> Option<TokenStream> {
    if !cx.params.mentioned_by(&field.ty) {
        return None;
    }

    let compared = match field.kind {
        FieldKind::Collection { .. } => field.inner.as_ref()?.to_token_stream(),
        _ => field.ty.to_token_stream(),
    };

    Some(quote!(#compared: ::core::cmp::PartialEq))
}

/// Check an `#[additional_equality]` method is `fn name(&self, other: &Self) -> bool`.
pub fn validate_auxiliary_equality(
    owner: &syn::Ident,
    method: &AuxiliaryMethod,
) -> Result<(), Diagnostic> {
    let sig = &method.sig;
    let mut inputs = sig.inputs.iter();

    let receiver_ok = matches!(
        inputs.next(),
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.mutability.is_none()
    );
    let other_ok = matches!(
        inputs.next(),
        Some(FnArg::Typed(arg)) if is_self_reference(&arg.ty, owner)
    );
    let returns_bool = matches!(
        &sig.output,
        ReturnType::Type(_, ty) if matches!(&**ty, Type::Path(path) if path.path.is_ident("bool"))
    );

    if receiver_ok && other_ok && inputs.next().is_none() && returns_bool && is_plain(sig) {
        return Ok(());
    }

    let name = &sig.ident;
    Err(Diagnostic::spanned(
        DiagnosticCode::AdditionalEqualitySignature,
        sig,
        format!(
            "#[additional_equality] method '{name}' on '{owner}' must have the signature \
             `fn {name}(&self, other: &Self) -> bool`, for example:\n\n\
             impl {owner} {{\n    #[additional_equality]\n    fn {name}(&self, other: &Self) -> bool {{\n        \
             self.currency.eq_ignore_ascii_case(&other.currency)\n    }}\n}}"
        ),
    ))
}

// `&Self` or `&Owner<..>`, shared and without an explicit mutable borrow.
fn is_self_reference(ty: &Type, owner: &syn::Ident) -> bool {
    let Type::Reference(reference) = ty else {
        return false;
    };
    if reference.mutability.is_some() {
        return false;
    }

    type_ident(&reference.elem).is_some_and(|ident| ident == "Self" || ident == owner)
}

///
/// TESTS
///
