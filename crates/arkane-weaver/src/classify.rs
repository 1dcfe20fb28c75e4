use crate::model::{FieldKind, type_ident};
use std::collections::BTreeSet;
use syn::{GenericArgument, PathArguments, Type, TypePath};

const PRIMITIVES: [&str; 16] = [
    "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32",
    "u64", "u128", "usize",
];

const COLLECTIONS: [&str; 4] = ["BTreeSet", "LinkedList", "Vec", "VecDeque"];

///
/// Classification
///

#[derive(Clone, Debug)]
pub struct Classification {
    pub kind: FieldKind,
    pub inner: Option<Type>,
}

///
/// Classifier
///
/// Pure mapping from a field's declared type to its comparison strategy.
/// Enum names are those of the fieldless enums declared in the woven items.
///

#[derive(Clone, Debug, Default)]
pub struct Classifier {
    enums: BTreeSet<String>,
}

impl Classifier {
    #[must_use]
    pub fn new<I, S>(enums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            enums: enums.into_iter().map(|s| s.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn classify(&self, ty: &Type) -> Classification {
        let ty = strip_groups(ty);

        // nullable first, so Option<Vec<_>> is a nullable collection
        if let Some(inner) = single_generic_arg(ty, "Option") {
            if let Some(element) = collection_element(inner) {
                return Classification {
                    kind: FieldKind::Collection { nullable: true },
                    inner: Some(element.clone()),
                };
            }
            return Classification {
                kind: FieldKind::Nullable,
                inner: Some(inner.clone()),
            };
        }

        if is_primitive(ty) {
            return Classification {
                kind: FieldKind::Primitive,
                inner: None,
            };
        }

        if is_plain_path(ty)
            && type_ident(ty).is_some_and(|ident| self.enums.contains(&ident.to_string()))
        {
            return Classification {
                kind: FieldKind::Enum,
                inner: None,
            };
        }

        if let Some(element) = collection_element(ty) {
            return Classification {
                kind: FieldKind::Collection { nullable: false },
                inner: Some(element.clone()),
            };
        }

        // generic parameters and everything unrecognised
        Classification {
            kind: FieldKind::Normal,
            inner: None,
        }
    }
}

/// True for `i32` itself, whose value is its own hash contribution.
#[must_use]
pub fn is_i32(ty: &Type) -> bool {
    matches!(strip_groups(ty), Type::Path(path) if path.qself.is_none() && path.path.is_ident("i32"))
}

fn is_primitive(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .get_ident()
            .is_some_and(|ident| PRIMITIVES.contains(&ident.to_string().as_str())),
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        _ => false,
    }
}

// only idents without generic arguments can name a fieldless enum
fn is_plain_path(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { qself: None, path }) if path.segments.iter().all(|s| s.arguments.is_none()))
}

fn strip_groups(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => strip_groups(&group.elem),
        Type::Paren(paren) => strip_groups(&paren.elem),
        _ => ty,
    }
}

/// Element type of a recognised collection shape.
fn collection_element(ty: &Type) -> Option<&Type> {
    match strip_groups(ty) {
        Type::Array(array) => Some(&array.elem),
        Type::Slice(slice) => Some(&slice.elem),
        Type::Reference(reference) => match strip_groups(&reference.elem) {
            Type::Slice(slice) => Some(&slice.elem),
            _ => None,
        },
        ty @ Type::Path(_) => {
            if let Some(inner) = single_generic_arg(ty, "Box") {
                return match strip_groups(inner) {
                    Type::Slice(slice) => Some(&slice.elem),
                    _ => None,
                };
            }

            COLLECTIONS
                .iter()
                .find_map(|name| single_generic_arg(ty, name))
        }
        _ => None,
    }
}

/// `Name<T>` → `T`, matching on the last path segment.
fn single_generic_arg<'a>(ty: &'a Type, name: &str) -> Option<&'a Type> {
    let Type::Path(path) = strip_groups(ty) else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segment = path.path.segments.last()?;
    if segment.ident != name {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });

    types.next()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;
    use syn::parse_quote;

    fn kind(ty: Type) -> FieldKind {
        Classifier::new(["Status"]).classify(&ty).kind
    }

    fn inner(ty: Type) -> Option<String> {
        Classifier::default()
            .classify(&ty)
            .inner
            .map(|ty| ty.to_token_stream().to_string())
    }

    #[test]
    fn option_wins_over_everything() {
        assert_eq!(kind(parse_quote!(Option<i32>)), FieldKind::Nullable);
        assert_eq!(kind(parse_quote!(Option<String>)), FieldKind::Nullable);
        assert_eq!(
            kind(parse_quote!(Option<Vec<u8>>)),
            FieldKind::Collection { nullable: true }
        );
        assert_eq!(inner(parse_quote!(Option<String>)).as_deref(), Some("String"));
    }

    #[test]
    fn scalars_are_primitive() {
        for ty in [
            parse_quote!(i32),
            parse_quote!(u64),
            parse_quote!(f64),
            parse_quote!(bool),
            parse_quote!(char),
        ] {
            assert_eq!(kind(ty), FieldKind::Primitive);
        }
    }

    #[test]
    fn strings_are_normal() {
        assert_eq!(kind(parse_quote!(String)), FieldKind::Normal);
        assert_eq!(kind(parse_quote!(&'static str)), FieldKind::Normal);
    }

    #[test]
    fn known_fieldless_enums_are_enums() {
        assert_eq!(kind(parse_quote!(Status)), FieldKind::Enum);
        assert_eq!(kind(parse_quote!(Other)), FieldKind::Normal);
    }

    #[test]
    fn collection_shapes() {
        for ty in [
            parse_quote!(Vec<String>),
            parse_quote!(std::collections::VecDeque<u8>),
            parse_quote!(BTreeSet<i64>),
            parse_quote!([u8; 4]),
            parse_quote!(&'static [u8]),
            parse_quote!(Box<[u8]>),
        ] {
            assert_eq!(kind(ty), FieldKind::Collection { nullable: false });
        }
        assert_eq!(inner(parse_quote!(Vec<String>)).as_deref(), Some("String"));
        assert_eq!(inner(parse_quote!([u8; 4])).as_deref(), Some("u8"));
    }

    #[test]
    fn unordered_collections_are_normal() {
        assert_eq!(kind(parse_quote!(HashSet<u8>)), FieldKind::Normal);
        assert_eq!(kind(parse_quote!(Box<String>)), FieldKind::Normal);
    }

    #[test]
    fn generic_parameters_are_normal() {
        assert_eq!(kind(parse_quote!(T)), FieldKind::Normal);
    }

    #[test]
    fn only_i32_passes_through() {
        assert!(is_i32(&parse_quote!(i32)));
        assert!(!is_i32(&parse_quote!(i64)));
    }
}
