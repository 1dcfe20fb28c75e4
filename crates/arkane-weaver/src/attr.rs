use crate::{
    diagnostic::{Diagnostic, DiagnosticCode},
    model::Configuration,
};
use arkane_core::TypeCheck;
use darling::{FromMeta, ast::NestedMeta};
use syn::{Attribute, Meta};

/// Type marker: `#[structural_equality]` or `#[structural_equality(...)]`.
pub const STRUCTURAL_EQUALITY: &str = "structural_equality";

/// Field marker excluding the field from equality and hashing.
pub const IGNORE_DURING_EQUALS: &str = "ignore_during_equals";

/// Field marker naming the embedded base instance.
pub const BASE: &str = "base";

/// Method marker for an additional `fn(&self, &Self) -> bool` predicate.
pub const ADDITIONAL_EQUALITY: &str = "additional_equality";

/// Method marker for an additional `fn(&self) -> i32` hash term.
pub const ADDITIONAL_HASH: &str = "additional_hash";

const MARKERS: [&str; 5] = [
    ADDITIONAL_EQUALITY,
    ADDITIONAL_HASH,
    BASE,
    IGNORE_DURING_EQUALS,
    STRUCTURAL_EQUALITY,
];

///
/// StructuralEqualityArgs
///

#[derive(Debug, Default, FromMeta)]
struct StructuralEqualityArgs {
    #[darling(default)]
    do_not_add_equals: bool,

    #[darling(default)]
    do_not_add_get_hash_code: bool,

    #[darling(default)]
    do_not_add_equality_operators: bool,

    #[darling(default)]
    ignore_base_class: bool,

    #[darling(default)]
    type_check: Option<String>,
}

/// True when the attribute's last path segment is `name`.
#[must_use]
pub fn is_marker(attr: &Attribute, name: &str) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == name)
}

#[must_use]
pub fn has_marker(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| is_marker(attr, name))
}

#[must_use]
pub fn find_marker<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| is_marker(attr, name))
}

/// Remove every weaver marker, leaving other attributes in place.
pub fn strip_markers(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !MARKERS.iter().any(|name| is_marker(attr, name)));
}

/// True when a `#[derive(...)]` list on the item names `trait_name`.
#[must_use]
pub fn derives(attrs: &[Attribute], trait_name: &str) -> bool {
    attrs.iter().filter(|attr| attr.path().is_ident("derive")).any(|attr| {
        let mut found = false;
        // malformed derive lists are the compiler's to report
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.segments.last().is_some_and(|s| s.ident == trait_name) {
                found = true;
            }
            Ok(())
        });
        found
    })
}

/// Parse the `#[structural_equality]` marker into a `Configuration`.
pub fn parse_configuration(attr: &Attribute) -> Result<Configuration, Diagnostic> {
    let args = match &attr.meta {
        Meta::Path(_) => StructuralEqualityArgs::default(),
        Meta::List(list) => {
            let items = NestedMeta::parse_meta_list(list.tokens.clone()).map_err(|err| {
                Diagnostic::new(
                    DiagnosticCode::InvalidConfiguration,
                    err.span(),
                    format!("invalid #[structural_equality] attribute: {err}"),
                )
            })?;
            StructuralEqualityArgs::from_list(&items)?
        }
        Meta::NameValue(_) => {
            return Err(Diagnostic::spanned(
                DiagnosticCode::InvalidConfiguration,
                attr,
                "expected #[structural_equality] or #[structural_equality(option, ...)]",
            ));
        }
    };

    let type_check = match &args.type_check {
        Some(policy) => policy.parse::<TypeCheck>().map_err(|err| {
            let known = TypeCheck::ALL
                .iter()
                .map(|policy| format!("\"{policy}\""))
                .collect::<Vec<_>>()
                .join(", ");

            Diagnostic::spanned(
                DiagnosticCode::InvalidConfiguration,
                attr,
                format!("{err}; expected one of {known}"),
            )
        })?,
        None => TypeCheck::default(),
    };

    Ok(Configuration {
        do_not_add_equals: args.do_not_add_equals,
        do_not_add_get_hash_code: args.do_not_add_get_hash_code,
        do_not_add_equality_operators: args.do_not_add_equality_operators,
        ignore_base_class: args.ignore_base_class,
        type_check,
    })
}

///
/// TESTS
///
