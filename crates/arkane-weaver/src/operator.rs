//! Operator Rewriter: replaces `PartialEq` stub bodies with calls into the
//! static object-equality helper.

use crate::{
    diagnostic::{Diagnostic, DiagnosticCode},
    model::{TypeDescriptor, type_ident},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Expr, FnArg, GenericArgument, ImplItem, ImplItemFn, ItemImpl, Pat, PathArguments, Stmt,
    parse_quote,
};

const EQ: &str = "eq";
const NE: &str = "ne";
const MARKER: &str = "operator";

/// Rewrite the `eq` stub (and the optional `ne` stub) of a woven type.
///
/// `impls` are the `impl PartialEq for T` items found for the type.
pub fn rewrite_operators(
    ty: &TypeDescriptor,
    impls: Vec<&mut ItemImpl>,
    core: &TokenStream,
) -> Result<(), Diagnostic> {
    let owner = ty.ident.to_string();
    let Some(item) = impls.into_iter().find(|item| compares_with_self(item, &owner)) else {
        return Err(missing_stub(ty, &ty.ident, "no `impl PartialEq` item"));
    };

    let mut found_eq = false;
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let negate = if method.sig.ident == EQ {
            found_eq = true;
            false
        } else if method.sig.ident == NE {
            true
        } else {
            continue;
        };

        check_stub(&owner, method)?;
        let other = normalize_other(method);
        method.block = if negate {
            parse_quote!({ !#core::equals(self, #other) })
        } else {
            parse_quote!({ #core::equals(self, #other) })
        };
    }

    if found_eq {
        Ok(())
    } else {
        Err(missing_stub(ty, &item.self_ty, "an `impl PartialEq` without an `eq` stub"))
    }
}

/// Warnings for stubs left in place on a type whose operators are suppressed.
#[must_use]
pub fn suppressed_stubs(ty: &TypeDescriptor, impls: &[&ItemImpl]) -> Vec<Diagnostic> {
    let owner = ty.ident.to_string();

    impls
        .iter()
        .filter(|item| compares_with_self(item, &owner))
        .flat_map(|item| &item.items)
        .filter_map(|impl_item| match impl_item {
            ImplItem::Fn(method) if check_stub(&owner, method).is_ok() => Some(method),
            _ => None,
        })
        .map(|method| {
            Diagnostic::spanned(
                DiagnosticCode::SuppressedOperatorStub,
                &method.sig,
                format!(
                    "'{owner}' sets do_not_add_equality_operators, so its `{}` stub was left \
                     untouched and will panic when called; write the body by hand, e.g. \
                     `fn eq(&self, other: &Self) -> bool {{ arkane::core::equals(self, other) }}`",
                    method.sig.ident
                ),
            )
        })
        .collect()
}

// `PartialEq` or `PartialEq<Self>` / `PartialEq<Owner<..>>`.
fn compares_with_self(item: &ItemImpl, owner: &str) -> bool {
    let Some((_, path, _)) = &item.trait_ else {
        return false;
    };
    let Some(segment) = path.segments.last() else {
        return false;
    };

    match &segment.arguments {
        PathArguments::None => true,
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(rhs)) if args.args.len() == 1 => {
                type_ident(rhs).is_some_and(|ident| ident == "Self" || ident == owner)
            }
            _ => false,
        },
        PathArguments::Parenthesized(_) => false,
    }
}

// The body must be exactly one expression: a call to the marker.
fn check_stub(owner: &str, method: &ImplItemFn) -> Result<(), Diagnostic> {
    let name = &method.sig.ident;

    let [Stmt::Expr(expr, None)] = method.block.stmts.as_slice() else {
        return Err(Diagnostic::spanned(
            DiagnosticCode::MalformedOperatorStub,
            &method.block,
            format!(
                "the `{name}` stub of '{owner}' must consist of a single marker call and nothing \
                 else, e.g. `fn {name}(&self, other: &Self) -> bool {{ arkane::operator() }}`"
            ),
        ));
    };

    if is_marker_call(expr) {
        return Ok(());
    }

    Err(Diagnostic::spanned(
        DiagnosticCode::MissingOperatorMarker,
        expr,
        format!(
            "the `{name}` stub of '{owner}' must call `arkane::operator()`, found `{}`; \
             set do_not_add_equality_operators to keep a hand-written operator",
            expr.to_token_stream()
        ),
    ))
}

fn is_marker_call(expr: &Expr) -> bool {
    match expr {
        Expr::Paren(paren) => is_marker_call(&paren.expr),
        Expr::Group(group) => is_marker_call(&group.expr),
        Expr::Call(call) if call.args.is_empty() => match &*call.func {
            Expr::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == MARKER),
            _ => false,
        },
        _ => false,
    }
}

// Name of the right-hand parameter; `_` and other patterns become `other`.
fn normalize_other(method: &mut ImplItemFn) -> TokenStream {
    let Some(FnArg::Typed(arg)) = method.sig.inputs.iter_mut().nth(1) else {
        return quote!(other);
    };

    match &*arg.pat {
        Pat::Ident(pat) if pat.by_ref.is_none() && pat.subpat.is_none() => {
            pat.ident.to_token_stream()
        }
        _ => {
            *arg.pat = parse_quote!(other);
            quote!(other)
        }
    }
}

fn missing_stub<T: ToTokens>(ty: &TypeDescriptor, at: T, found: &str) -> Diagnostic {
    let owner = &ty.ident;

    Diagnostic::spanned(
        DiagnosticCode::MissingOperatorStub,
        at,
        format!(
            "'{owner}' has {found}; declare the operator stub next to the type, or set \
             do_not_add_equality_operators:\n\n\
             impl PartialEq for {owner} {{\n    fn eq(&self, other: &Self) -> bool {{\n        \
             arkane::operator()\n    }}\n}}"
        ),
    )
}

///
/// TESTS
///
