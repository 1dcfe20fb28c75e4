use arkane::prelude::*;

#[arkane::weave]
mod geometry {
    #[derive(Clone, Debug)]
    #[structural_equality]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }

    impl PartialEq for Point {
        fn eq(&self, other: &Self) -> bool {
            arkane::operator()
        }

        fn ne(&self, other: &Self) -> bool {
            arkane::operator()
        }
    }

    #[derive(Clone, Copy, Debug)]
    #[structural_equality]
    pub struct Celsius(pub f64);

    impl PartialEq for Celsius {
        fn eq(&self, _: &Self) -> bool {
            arkane::operator()
        }
    }

    #[derive(Clone, Debug)]
    #[structural_equality(do_not_add_equality_operators)]
    pub struct Empty {}
}

use geometry::{Celsius, Empty, Point};

#[test]
fn equal_points() {
    let a = Point { x: 1, y: 2 };
    let b = Point { x: 1, y: 2 };

    assert!(a.equals(&b));
    assert!(a == b);
    assert_eq!(a.hash_code(), b.hash_code());
}

#[test]
fn different_points() {
    let a = Point { x: 1, y: 2 };
    let c = Point { x: 1, y: 3 };

    assert!(!a.equals(&c));
    assert!(a != c);
}

#[test]
fn point_hash_folds_fields() {
    let p = Point { x: 1, y: 2 };

    // x is the first term, y is folded with the multiplier
    assert_eq!(p.hash_code(), (1_i32.wrapping_mul(397)) ^ 2);
}

#[test]
fn equality_through_object() {
    let a = Point { x: 4, y: 5 };
    let b = a.clone();
    let as_object: &dyn arkane::core::Object = &b;

    assert!(a.equals_object(as_object));
    assert!(a.equals_object(&a));
    assert!(!a.equals_object(&Celsius(4.0)));
}

#[test]
fn value_types_compare_by_value() {
    let warm = Celsius(21.5);
    let copy = warm;

    assert!(warm == copy);
    assert!(warm != Celsius(-3.0));
    assert_eq!(warm.hash_code(), copy.hash_code());
}

#[test]
fn types_without_fields_hash_to_zero() {
    assert_eq!(Empty {}.hash_code(), 0);
    assert!(Empty {}.equals(&Empty {}));
}

#[test]
fn hash_is_stable() {
    let p = Point { x: -7, y: 99 };

    assert_eq!(p.hash_code(), p.hash_code());
    assert!(p.equals(&p));
}
