use arkane::prelude::*;

#[arkane::weave(crate = "::arkane::core")]
mod catalog {
    use arkane::core::{HashCode, StructuralEq};

    // hand-written equality, generated hash only
    #[derive(Clone, Debug)]
    #[structural_equality(do_not_add_equals, do_not_add_equality_operators)]
    pub struct Sku {
        pub code: String,
    }

    impl StructuralEq for Sku {
        fn equals(&self, other: &Self) -> bool {
            self.code == other.code
        }
    }

    impl PartialEq for Sku {
        fn eq(&self, other: &Self) -> bool {
            self.equals(other)
        }
    }

    #[derive(Clone, Copy, Debug)]
    #[structural_equality(do_not_add_get_hash_code, type_check = "ExactlyOfType")]
    pub struct Dimensions {
        pub width: u32,
        pub height: u32,
    }

    impl HashCode for Dimensions {
        fn hash_code(&self) -> i32 {
            self.width.hash_code() ^ self.height.hash_code()
        }
    }

    impl PartialEq for Dimensions {
        fn eq(&self, other: &Self) -> bool {
            arkane::operator()
        }
    }
}

fn main() {
    let sku = catalog::Sku {
        code: "A-1".to_string(),
    };
    assert!(sku == sku.clone());
    let _ = sku.hash_code();

    let d = catalog::Dimensions {
        width: 2,
        height: 3,
    };
    assert!(d == d);
    assert!(d.equals_object(&d));
}
