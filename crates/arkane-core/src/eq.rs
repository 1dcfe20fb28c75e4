///
/// StructuralEq
///
/// Typed field-by-field equality. Woven types get a generated impl that
/// compares their base (if any), every non-ignored field and any additional
/// equality methods.
///

pub trait StructuralEq {
    fn equals(&self, other: &Self) -> bool;
}

/// General equality for fields without a specialised strategy.
///
/// `Option` operands follow the usual rules: two `None` values are equal,
/// `None` never equals `Some`, and two `Some` values compare their contents.
pub fn object_equals<T: PartialEq + ?Sized>(left: &T, right: &T) -> bool {
    left == right
}

/// Element-wise sequence equality: same length and pairwise equal elements, in order.
pub fn sequence_equal<A, B>(left: A, right: B) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: PartialEq<B::Item>,
{
    left.into_iter().eq(right)
}

/// Sequence equality for a collection field that may be absent.
///
/// Two absent collections are equal; an absent collection never equals a
/// present one, even when the present one is empty.
pub fn nullable_sequence_equal<A, B>(left: Option<A>, right: Option<B>) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: PartialEq<B::Item>,
{
    match (left, right) {
        (Some(left), Some(right)) => sequence_equal(left, right),
        (None, None) => true,
        _ => false,
    }
}

///
/// TESTS
///
