use arkane::prelude::*;

#[arkane::weave]
mod money {
    #[derive(Clone, Debug)]
    #[structural_equality]
    pub struct Money {
        pub cents: i64,
        #[ignore_during_equals]
        pub currency: String,
    }

    impl Money {
        #[additional_equality]
        fn same_currency(&self, other: &Self) -> bool {
            self.currency.eq_ignore_ascii_case(&other.currency)
        }

        #[additional_hash]
        fn currency_hash(&self) -> i32 {
            arkane::core::HashCode::hash_code(&self.currency.to_ascii_lowercase())
        }
    }

    impl PartialEq for Money {
        fn eq(&self, other: &Self) -> bool {
            arkane::operator()
        }

        fn ne(&self, other: &Self) -> bool {
            arkane::operator()
        }
    }
}

fn main() {
    let a = money::Money {
        cents: 100,
        currency: "EUR".to_string(),
    };
    let b = money::Money {
        cents: 100,
        currency: "eur".to_string(),
    };

    assert!(a == b);
    assert_eq!(a.hash_code(), b.hash_code());
}
