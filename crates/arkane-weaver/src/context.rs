use crate::{
    model::{IgnoredFieldSet, TypeDescriptor},
    util::{TypeParams, where_clause_with_bounds},
};
use proc_macro2::TokenStream;
use quote::quote;

///
/// SynthContext
///
/// What every synthesizer needs for one woven type.
///

pub struct SynthContext<'a> {
    pub ty: &'a TypeDescriptor,
    pub ignored: &'a IgnoredFieldSet,
    pub core: &'a TokenStream,
    pub params: TypeParams,
}

impl<'a> SynthContext<'a> {
    #[must_use]
    pub fn new(ty: &'a TypeDescriptor, ignored: &'a IgnoredFieldSet, core: &'a TokenStream) -> Self {
        Self {
            ty,
            ignored,
            core,
            params: TypeParams::new(&ty.generics),
        }
    }

    /// `impl<..> Trait for Type<..> where ..` with extra predicates merged in.
    #[must_use]
    pub fn impl_header(&self, trait_path: &TokenStream, bounds: &[TokenStream]) -> TokenStream {
        let ident = &self.ty.ident;
        let (impl_generics, ty_generics, where_clause) = self.ty.generics.split_for_impl();
        let where_tokens = where_clause_with_bounds(where_clause, bounds);

        quote! {
            #[automatically_derived]
            impl #impl_generics #trait_path for #ident #ty_generics #where_tokens
        }
    }

    /// The woven type with its generic arguments, usable in bounds.
    #[must_use]
    pub fn self_ty(&self) -> TokenStream {
        let ident = &self.ty.ident;
        let (_, ty_generics, _) = self.ty.generics.split_for_impl();

        quote!(#ident #ty_generics)
    }
}
