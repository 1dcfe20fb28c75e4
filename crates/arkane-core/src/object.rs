use crate::type_check::TypeCheck;
use std::any::{Any, TypeId};

///
/// Object
///
/// Untyped equality surface. Woven types implement it so that values of
/// different concrete types can be compared behind `&dyn Object`, with the
/// type's `TypeCheck` policy deciding which arguments are eligible.
///

pub trait Object: Any {
    fn as_any(&self) -> &dyn Any;

    /// Runtime type used by `TypeCheck::ExactlyTheSameTypeAsThis`.
    fn runtime_type(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// The embedded base instance, for types that extend another type.
    fn base_object(&self) -> Option<&dyn Object> {
        None
    }

    fn equals_object(&self, other: &dyn Object) -> bool;
}

/// Static object-equality helper: identity short-circuit, then `equals_object`.
///
/// This is what rewritten `==` and `!=` operators call.
pub fn equals<T: Object>(left: &T, right: &T) -> bool {
    std::ptr::eq(left, right) || left.equals_object(right)
}

/// True when both references denote the same instance.
///
/// The runtime type takes part because a type and the base embedded as its
/// first field may share an address.
#[must_use]
pub fn same_instance(this: &dyn Object, other: &dyn Object) -> bool {
    std::ptr::addr_eq(this, other) && this.runtime_type() == other.runtime_type()
}

/// Find a `T` in `other` or along its base chain.
#[must_use]
pub fn downcast_subtype<T: Object>(other: &dyn Object) -> Option<&T> {
    let mut current = Some(other);

    while let Some(object) = current {
        if let Some(found) = object.as_any().downcast_ref::<T>() {
            return Some(found);
        }
        current = object.base_object();
    }

    None
}

/// Apply a `TypeCheck` policy and view `other` as `T` when it is admitted.
#[must_use]
pub fn admit<'a, T: Object>(policy: TypeCheck, this: &T, other: &'a dyn Object) -> Option<&'a T> {
    match policy {
        TypeCheck::ExactlyOfType => {
            if other.runtime_type() != TypeId::of::<T>() {
                return None;
            }
            other.as_any().downcast_ref::<T>()
        }
        TypeCheck::ExactlyTheSameTypeAsThis => {
            if other.runtime_type() != this.runtime_type() {
                return None;
            }
            other.as_any().downcast_ref::<T>()
        }
        TypeCheck::SameTypeOrSubtype => downcast_subtype::<T>(other),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Shape {
        sides: u8,
    }

    impl Object for Shape {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn equals_object(&self, other: &dyn Object) -> bool {
            admit(TypeCheck::SameTypeOrSubtype, self, other).is_some_and(|o| o.sides == self.sides)
        }
    }

    struct Square {
        shape: Shape,
        side: u32,
    }

    impl Object for Square {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn base_object(&self) -> Option<&dyn Object> {
            Some(&self.shape)
        }

        fn equals_object(&self, other: &dyn Object) -> bool {
            admit(TypeCheck::ExactlyOfType, self, other).is_some_and(|o| o.side == self.side)
        }
    }

    fn square(side: u32) -> Square {
        Square {
            shape: Shape { sides: 4 },
            side,
        }
    }

    #[test]
    fn subtype_chain_is_walked() {
        let sq = square(3);
        let found = downcast_subtype::<Shape>(&sq).expect("square embeds a shape");

        assert_eq!(found.sides, 4);
        assert!(downcast_subtype::<Square>(&Shape { sides: 4 }).is_none());
    }

    #[test]
    fn policies_differ_on_subtypes() {
        let shape = Shape { sides: 4 };
        let sq = square(3);

        assert!(admit(TypeCheck::SameTypeOrSubtype, &shape, &sq).is_some());
        assert!(admit(TypeCheck::ExactlyOfType, &shape, &sq).is_none());
        assert!(admit(TypeCheck::ExactlyTheSameTypeAsThis, &shape, &sq).is_none());
        assert!(admit(TypeCheck::ExactlyOfType, &shape, &Shape { sides: 5 }).is_some());
    }

    #[test]
    fn exact_policies_agree_under_composition() {
        let shape = Shape { sides: 4 };
        let sq = square(3);
        let others: [&dyn Object; 3] = [&Shape { sides: 4 }, &sq, &sq.shape];

        for other in others {
            assert_eq!(
                admit(TypeCheck::ExactlyOfType, &shape, other).is_some(),
                admit(TypeCheck::ExactlyTheSameTypeAsThis, &shape, other).is_some()
            );
            assert_eq!(
                admit(TypeCheck::ExactlyOfType, &sq, other).is_some(),
                admit(TypeCheck::ExactlyTheSameTypeAsThis, &sq, other).is_some()
            );
        }
    }

    #[test]
    fn base_sharing_an_address_is_not_the_same_instance() {
        let sq = square(3);

        assert!(same_instance(&sq, &sq));
        assert!(!same_instance(&sq.shape, &sq));
    }

    #[test]
    fn static_helper_delegates_to_equals_object() {
        assert!(equals(&square(2), &square(2)));
        assert!(!equals(&square(2), &square(5)));
    }
}
