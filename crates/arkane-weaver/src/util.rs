use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use std::collections::BTreeSet;
use syn::{GenericParam, Generics, WhereClause};

/// Merge extra predicates into an existing where clause.
pub fn where_clause_with_bounds(
    where_clause: Option<&WhereClause>,
    bounds: &[TokenStream],
) -> TokenStream {
    if bounds.is_empty() {
        return where_clause
            .as_ref()
            .map_or_else(|| quote!(), |wc| quote!(#wc));
    }

    if let Some(wc) = where_clause {
        let preds = &wc.predicates;
        if preds.is_empty() {
            quote!(where #(#bounds),*)
        } else {
            quote!(where #preds, #(#bounds),*)
        }
    } else {
        quote!(where #(#bounds),*)
    }
}

///
/// TypeParams
///
/// Names of a type's generic type parameters. Bounds are only emitted for
/// field types that mention one of them, so recursive types such as
/// `struct Node { next: Option<Box<Node>> }` never produce cyclic bounds.
///

#[derive(Clone, Debug, Default)]
pub struct TypeParams {
    names: BTreeSet<String>,
}

impl TypeParams {
    #[must_use]
    pub fn new(generics: &Generics) -> Self {
        let names = generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(ty) => Some(ty.ident.to_string()),
                _ => None,
            })
            .collect();

        Self { names }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// True when any identifier inside `tokens` names a type parameter.
    #[must_use]
    pub fn mentioned_by<T: ToTokens>(&self, tokens: &T) -> bool {
        !self.is_empty() && mentions_any(tokens.to_token_stream(), &self.names)
    }
}

/// True when any identifier inside `tokens`, at any depth, is one of `names`.
#[must_use]
pub fn mentions_any(tokens: TokenStream, names: &BTreeSet<String>) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => names.contains(&ident.to_string()),
        TokenTree::Group(group) => mentions_any(group.stream(), names),
        _ => false,
    })
}

///
/// TESTS
///
