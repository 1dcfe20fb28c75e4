use crate::{
    attr::{
        self, ADDITIONAL_EQUALITY, ADDITIONAL_HASH, BASE, IGNORE_DURING_EQUALS,
        STRUCTURAL_EQUALITY,
    },
    classify::Classifier,
    diagnostic::{Diagnostic, DiagnosticCode},
    equality::validate_auxiliary_equality,
    hash::validate_auxiliary_hash,
    model::{
        AuxiliaryKind, AuxiliaryMethod, BaseDescriptor, EnumDescriptor, FieldDescriptor,
        FieldKind, IgnoredFieldSet, TypeDescriptor, type_ident,
    },
};
use std::collections::{BTreeMap, BTreeSet};
use syn::{Fields, GenericParam, ImplItem, Item, ItemImpl, ItemStruct, Member};

///
/// Discovery
///
/// Everything the weaver learns from one item set before generating code.
///

#[derive(Debug, Default)]
pub struct Discovery {
    /// Marked structs, in declaration order.
    pub types: Vec<TypeDescriptor>,
    pub ignored: IgnoredFieldSet,
    pub enums: Vec<EnumDescriptor>,

    /// `impl PartialEq for X` items, keyed by `X`, as indexes into the item list.
    pub operator_impls: BTreeMap<String, Vec<usize>>,

    /// Types that already carry a hand-written `HashCode` impl.
    pub hash_impls: BTreeSet<String>,
}

impl Discovery {
    #[must_use]
    pub fn get_type(&self, ident: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|ty| ty.ident == ident)
    }
}

/// Collect every marked struct and the surrounding facts synthesis needs.
///
/// All problems found are reported together.
pub fn discover(items: &[Item]) -> Result<Discovery, Vec<Diagnostic>> {
    let mut discovery = Discovery::default();
    let mut errors = Vec::new();

    // fieldless enums classify as Enum, so collect them first
    for item in items {
        match item {
            Item::Enum(item_enum) => {
                if let Some(marker) = attr::find_marker(&item_enum.attrs, STRUCTURAL_EQUALITY) {
                    errors.push(not_a_struct(marker, &item_enum.ident, "an enum"));
                }
                let fieldless = item_enum
                    .variants
                    .iter()
                    .all(|variant| matches!(variant.fields, Fields::Unit));
                if fieldless {
                    discovery.enums.push(EnumDescriptor {
                        ident: item_enum.ident.clone(),
                        variants: item_enum
                            .variants
                            .iter()
                            .map(|v| (v.ident.clone(), v.discriminant.as_ref().map(|(_, e)| e.clone())))
                            .collect(),
                    });
                }
            }
            Item::Union(item_union) => {
                if let Some(marker) = attr::find_marker(&item_union.attrs, STRUCTURAL_EQUALITY) {
                    errors.push(not_a_struct(marker, &item_union.ident, "a union"));
                }
            }
            _ => {}
        }
    }

    let classifier = Classifier::new(discovery.enums.iter().map(|e| &e.ident));

    for item in items {
        let Item::Struct(item_struct) = item else {
            continue;
        };

        collect_ignored(item_struct, &mut discovery.ignored);

        let Some(marker) = attr::find_marker(&item_struct.attrs, STRUCTURAL_EQUALITY) else {
            continue;
        };

        match describe_struct(item_struct, marker, &classifier) {
            Ok(descriptor) => discovery.types.push(descriptor),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    for (index, item) in items.iter().enumerate() {
        let Item::Impl(item_impl) = item else {
            continue;
        };
        let Some(self_ident) = type_ident(&item_impl.self_ty).map(ToString::to_string) else {
            continue;
        };

        match trait_name(item_impl).as_deref() {
            None => {
                if let Some(descriptor) = discovery
                    .types
                    .iter_mut()
                    .find(|ty| ty.ident == self_ident)
                {
                    descriptor.auxiliary.extend(auxiliary_methods(item_impl));
                }
            }
            Some("PartialEq") => {
                discovery
                    .operator_impls
                    .entry(self_ident)
                    .or_default()
                    .push(index);
            }
            Some("HashCode") => {
                discovery.hash_impls.insert(self_ident);
            }
            Some(_) => {}
        }
    }

    // signatures are checked even when the member using them is suppressed
    for ty in &discovery.types {
        for method in &ty.auxiliary {
            let checked = match method.kind {
                AuxiliaryKind::Equality => validate_auxiliary_equality(&ty.ident, method),
                AuxiliaryKind::Hash => validate_auxiliary_hash(&ty.ident.to_string(), method),
            };
            if let Err(err) = checked {
                errors.push(err);
            }
        }
    }

    if errors.is_empty() {
        Ok(discovery)
    } else {
        Err(errors)
    }
}

// Build the descriptor for one marked struct.
fn describe_struct(
    item: &ItemStruct,
    marker: &syn::Attribute,
    classifier: &Classifier,
) -> Result<TypeDescriptor, Vec<Diagnostic>> {
    let mut errors = Vec::new();

    let config = attr::parse_configuration(marker).unwrap_or_else(|err| {
        errors.push(err);
        crate::model::Configuration::default()
    });

    if let Some(lifetime) = item.generics.params.iter().find_map(|param| match param {
        GenericParam::Lifetime(lifetime) => Some(lifetime),
        _ => None,
    }) {
        errors.push(Diagnostic::spanned(
            DiagnosticCode::LifetimeParameters,
            lifetime,
            format!(
                "type '{}' declares lifetime parameter {}; woven types must be 'static \
                 so they can be compared through &dyn Object",
                item.ident, lifetime.lifetime
            ),
        ));
    }

    let mut fields = Vec::new();
    let mut base: Option<BaseDescriptor> = None;

    for (index, field) in item.fields.iter().enumerate() {
        let member = field
            .ident
            .clone()
            .map_or_else(|| Member::Unnamed(syn::Index::from(index)), Member::Named);

        if attr::has_marker(&field.attrs, BASE) {
            if let Some(previous) = &base {
                errors.push(Diagnostic::spanned(
                    DiagnosticCode::InvalidBase,
                    field,
                    format!(
                        "type '{}' marks both '{}' and '{}' as #[base]; a type extends at most one base",
                        item.ident,
                        crate::model::member_name(&previous.member),
                        crate::model::member_name(&member),
                    ),
                ));
                continue;
            }
            if classifier.classify(&field.ty).kind != FieldKind::Normal
                || type_ident(&field.ty).is_none()
            {
                errors.push(Diagnostic::spanned(
                    DiagnosticCode::InvalidBase,
                    &field.ty,
                    format!(
                        "#[base] field '{}' of '{}' must hold a struct by value, not a \
                         primitive, option, collection or reference",
                        crate::model::member_name(&member),
                        item.ident
                    ),
                ));
                continue;
            }
            base = Some(BaseDescriptor {
                member,
                ty: field.ty.clone(),
            });
            continue;
        }

        let classification = classifier.classify(&field.ty);
        fields.push(FieldDescriptor {
            member,
            ty: field.ty.clone(),
            kind: classification.kind,
            inner: classification.inner,
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TypeDescriptor {
        ident: item.ident.clone(),
        generics: item.generics.clone(),
        fields,
        base,
        is_value_type: attr::derives(&item.attrs, "Copy"),
        config,
        auxiliary: Vec::new(),
    })
}

// Ignored fields are recorded for every struct, marked or not.
fn collect_ignored(item: &ItemStruct, ignored: &mut IgnoredFieldSet) {
    for (index, field) in item.fields.iter().enumerate() {
        if !attr::has_marker(&field.attrs, IGNORE_DURING_EQUALS) {
            continue;
        }
        let member = field
            .ident
            .clone()
            .map_or_else(|| Member::Unnamed(syn::Index::from(index)), Member::Named);

        ignored.insert(&item.ident, &member);
    }
}

fn auxiliary_methods(item: &ItemImpl) -> Vec<AuxiliaryMethod> {
    item.items
        .iter()
        .filter_map(|impl_item| match impl_item {
            ImplItem::Fn(method) => Some(method),
            _ => None,
        })
        .filter_map(|method| {
            let kind = if attr::has_marker(&method.attrs, ADDITIONAL_EQUALITY) {
                AuxiliaryKind::Equality
            } else if attr::has_marker(&method.attrs, ADDITIONAL_HASH) {
                AuxiliaryKind::Hash
            } else {
                return None;
            };

            Some(AuxiliaryMethod {
                kind,
                sig: method.sig.clone(),
            })
        })
        .collect()
}

/// Last segment of the implemented trait, if any.
#[must_use]
pub fn trait_name(item: &ItemImpl) -> Option<String> {
    item.trait_
        .as_ref()
        .and_then(|(_, path, _)| path.segments.last())
        .map(|segment| segment.ident.to_string())
}

fn not_a_struct(marker: &syn::Attribute, ident: &syn::Ident, what: &str) -> Diagnostic {
    Diagnostic::spanned(
        DiagnosticCode::NotAStruct,
        marker,
        format!("#[structural_equality] applies to structs, but '{ident}' is {what}"),
    )
}

///
/// TESTS
///
