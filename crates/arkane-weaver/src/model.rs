use arkane_core::TypeCheck;
use std::collections::BTreeSet;
use syn::{Generics, Ident, Member, Signature, Type};

///
/// Configuration
///
/// Per-type options read from `#[structural_equality(...)]`.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Configuration {
    pub do_not_add_equals: bool,
    pub do_not_add_get_hash_code: bool,
    pub do_not_add_equality_operators: bool,
    pub ignore_base_class: bool,
    pub type_check: TypeCheck,
}

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Intrinsic scalar: integers, floats, `bool`, `char`.
    Primitive,

    /// Fieldless enum declared alongside the woven types.
    Enum,

    /// `Option<T>` around anything but a collection.
    Nullable,

    /// Sequence compared element by element; `nullable` when wrapped in `Option`.
    Collection { nullable: bool },

    /// Everything else, compared through `PartialEq` and hashed through `HashCode`.
    Normal,
}

///
/// FieldDescriptor
///

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub member: Member,
    pub ty: Type,
    pub kind: FieldKind,

    /// Element type for collections, wrapped type for nullable fields.
    pub inner: Option<Type>,
}

impl FieldDescriptor {
    /// Human-readable field name (`name` or the tuple index).
    #[must_use]
    pub fn name(&self) -> String {
        member_name(&self.member)
    }
}

///
/// BaseDescriptor
///
/// The field a type extends through composition, marked `#[base]`.
///

#[derive(Clone, Debug)]
pub struct BaseDescriptor {
    pub member: Member,
    pub ty: Type,
}

///
/// AuxiliaryKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuxiliaryKind {
    Equality,
    Hash,
}

///
/// AuxiliaryMethod
///
/// A user method folded into the generated equality or hash. The signature is
/// kept verbatim so the synthesizers can validate it.
///

#[derive(Clone, Debug)]
pub struct AuxiliaryMethod {
    pub kind: AuxiliaryKind,
    pub sig: Signature,
}

impl AuxiliaryMethod {
    #[must_use]
    pub const fn ident(&self) -> &Ident {
        &self.sig.ident
    }
}

///
/// TypeDescriptor
///

#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<FieldDescriptor>,
    pub base: Option<BaseDescriptor>,
    pub is_value_type: bool,
    pub config: Configuration,
    pub auxiliary: Vec<AuxiliaryMethod>,
}

impl TypeDescriptor {
    /// Fields taking part in equality and hashing, in declaration order.
    pub fn comparable_fields<'a>(
        &'a self,
        ignored: &'a IgnoredFieldSet,
    ) -> impl Iterator<Item = &'a FieldDescriptor> + 'a {
        self.fields
            .iter()
            .filter(|field| !ignored.contains(&self.ident, &field.member))
    }

    /// The base to compare and hash, unless base folding is disabled.
    #[must_use]
    pub fn compared_base(&self, ignored: &IgnoredFieldSet) -> Option<&BaseDescriptor> {
        if self.config.ignore_base_class {
            return None;
        }

        self.base
            .as_ref()
            .filter(|base| !ignored.contains(&self.ident, &base.member))
    }

    pub fn auxiliary_methods(&self, kind: AuxiliaryKind) -> impl Iterator<Item = &AuxiliaryMethod> {
        self.auxiliary.iter().filter(move |method| method.kind == kind)
    }

    /// Ident of the base type, when it is a plain path.
    #[must_use]
    pub fn base_ident(&self) -> Option<&Ident> {
        self.base.as_ref().and_then(|base| type_ident(&base.ty))
    }
}

///
/// IgnoredFieldSet
///
/// Fields marked `#[ignore_during_equals]`, keyed by owning type and member.
/// Built once per pass; both the hash and equality synthesizers consult it.
///

#[derive(Clone, Debug, Default)]
pub struct IgnoredFieldSet {
    fields: BTreeSet<(String, String)>,
}

impl IgnoredFieldSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, owner: &Ident, member: &Member) {
        self.fields.insert((owner.to_string(), member_name(member)));
    }

    #[must_use]
    pub fn contains(&self, owner: &Ident, member: &Member) -> bool {
        self.fields
            .contains(&(owner.to_string(), member_name(member)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// EnumDescriptor
///
/// A fieldless enum declared among the woven items, hashed by discriminant.
///

#[derive(Clone, Debug)]
pub struct EnumDescriptor {
    pub ident: Ident,
    pub variants: Vec<(Ident, Option<syn::Expr>)>,
}

#[must_use]
pub fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

/// Last path segment of a type, if it is a path type.
#[must_use]
pub fn type_ident(ty: &Type) -> Option<&Ident> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last().map(|s| &s.ident),
        Type::Group(group) => type_ident(&group.elem),
        Type::Paren(paren) => type_ident(&paren.elem),
        _ => None,
    }
}

///
/// TESTS
///
