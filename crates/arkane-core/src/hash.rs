use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    hash::BuildHasher,
    rc::Rc,
    sync::Arc,
};

/// Multiplier applied to the running accumulator before each hash term after the first.
pub const HASH_MULTIPLIER: i32 = 397;

///
/// HashCode
///
/// Deterministic 32-bit hash used by structural equality.
/// Values that compare equal must produce the same hash code.
///

pub trait HashCode {
    fn hash_code(&self) -> i32;
}

/// Fold one hash term into an accumulator (`acc * 397 ^ term`, wrapping).
#[must_use]
pub const fn combine(acc: i32, term: i32) -> i32 {
    acc.wrapping_mul(HASH_MULTIPLIER) ^ term
}

/// Hash a sequence by folding each element's hash code in order.
///
/// An empty sequence hashes to `0`. Element order matters.
pub fn collection_hash<'a, T, I>(items: I) -> i32
where
    T: HashCode + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(0, |acc, item| combine(acc, item.hash_code()))
}

/// Hash an optional value; `None` contributes `0`.
pub fn nullable_hash<T: HashCode>(value: Option<&T>) -> i32 {
    value.map_or(0, HashCode::hash_code)
}

///
/// FNV-1a 32-bit hash over raw bytes.
///
/// Used for string hashing so results are stable across processes and platforms,
/// unlike the randomly seeded std hasher.
///
#[must_use]
#[allow(clippy::unreadable_literal)]
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = 0x811c9dc5u32;
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(0x01000193);
        i += 1;
    }

    hash
}

//
// Primitive impls
//

macro_rules! impl_hash_code_widen {
    ($($ty:ty),*) => {
        $(
            impl HashCode for $ty {
                fn hash_code(&self) -> i32 {
                    i32::from(*self)
                }
            }
        )*
    };
}

impl_hash_code_widen!(i8, i16, i32, u8, u16);

#[allow(clippy::cast_possible_wrap)]
impl HashCode for u32 {
    fn hash_code(&self) -> i32 {
        *self as i32
    }
}

#[allow(clippy::cast_possible_truncation)]
impl HashCode for i64 {
    fn hash_code(&self) -> i32 {
        (*self as i32) ^ ((*self >> 32) as i32)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
impl HashCode for u64 {
    fn hash_code(&self) -> i32 {
        (*self as i32) ^ ((*self >> 32) as i32)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl HashCode for i128 {
    fn hash_code(&self) -> i32 {
        (*self as i64).hash_code() ^ ((*self >> 64) as i64).hash_code()
    }
}

#[allow(clippy::cast_possible_truncation)]
impl HashCode for u128 {
    fn hash_code(&self) -> i32 {
        (*self as u64).hash_code() ^ ((*self >> 64) as u64).hash_code()
    }
}

impl HashCode for isize {
    fn hash_code(&self) -> i32 {
        (*self as i64).hash_code()
    }
}

impl HashCode for usize {
    fn hash_code(&self) -> i32 {
        (*self as u64).hash_code()
    }
}

impl HashCode for bool {
    fn hash_code(&self) -> i32 {
        i32::from(*self)
    }
}

#[allow(clippy::cast_possible_wrap)]
impl HashCode for char {
    fn hash_code(&self) -> i32 {
        let code = u32::from(*self);

        (code | (code << 16)) as i32
    }
}

#[allow(clippy::cast_possible_wrap)]
impl HashCode for f32 {
    fn hash_code(&self) -> i32 {
        // -0.0 == 0.0, so both must hash alike
        if *self == 0.0 {
            return 0;
        }

        self.to_bits() as i32
    }
}

impl HashCode for f64 {
    fn hash_code(&self) -> i32 {
        if *self == 0.0 {
            return 0;
        }

        self.to_bits().hash_code()
    }
}

impl HashCode for () {
    fn hash_code(&self) -> i32 {
        0
    }
}

#[allow(clippy::cast_possible_wrap)]
impl HashCode for str {
    fn hash_code(&self) -> i32 {
        fnv1a_32(self.as_bytes()) as i32
    }
}

impl HashCode for String {
    fn hash_code(&self) -> i32 {
        self.as_str().hash_code()
    }
}

//
// Wrapper impls
//

impl<T: HashCode> HashCode for Option<T> {
    fn hash_code(&self) -> i32 {
        nullable_hash(self.as_ref())
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Box<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Rc<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Arc<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

//
// Sequence impls
//

impl<T: HashCode> HashCode for [T] {
    fn hash_code(&self) -> i32 {
        collection_hash(self)
    }
}

impl<T: HashCode, const N: usize> HashCode for [T; N] {
    fn hash_code(&self) -> i32 {
        collection_hash(self)
    }
}

impl<T: HashCode> HashCode for Vec<T> {
    fn hash_code(&self) -> i32 {
        collection_hash(self)
    }
}

impl<T: HashCode> HashCode for VecDeque<T> {
    fn hash_code(&self) -> i32 {
        collection_hash(self)
    }
}

impl<T: HashCode> HashCode for LinkedList<T> {
    fn hash_code(&self) -> i32 {
        collection_hash(self)
    }
}

impl<T: HashCode> HashCode for BTreeSet<T> {
    fn hash_code(&self) -> i32 {
        collection_hash(self)
    }
}

//
// Tuple impls
//

macro_rules! impl_hash_code_tuple {
    ($($name:ident)+) => {
        impl<$($name: HashCode),+> HashCode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn hash_code(&self) -> i32 {
                let ($($name,)+) = self;
                let mut hash = 0;
                $(hash = combine(hash, $name.hash_code());)+
                hash
            }
        }
    };
}

impl_hash_code_tuple!(A);
impl_hash_code_tuple!(A B);
impl_hash_code_tuple!(A B C);
impl_hash_code_tuple!(A B C D);
impl_hash_code_tuple!(A B C D E);
impl_hash_code_tuple!(A B C D E F);
impl_hash_code_tuple!(A B C D E F G);
impl_hash_code_tuple!(A B C D E F G H);
impl_hash_code_tuple!(A B C D E F G H I);
impl_hash_code_tuple!(A B C D E F G H I J);
impl_hash_code_tuple!(A B C D E F G H I J K);
impl_hash_code_tuple!(A B C D E F G H I J K L);

//
// Map impls
//

// key and value folded like a two-field value
fn entry_hash<K: HashCode, V: HashCode>(key: &K, value: &V) -> i32 {
    combine(key.hash_code(), value.hash_code())
}

impl<K: HashCode, V: HashCode> HashCode for BTreeMap<K, V> {
    fn hash_code(&self) -> i32 {
        self.iter()
            .fold(0, |acc, (key, value)| combine(acc, entry_hash(key, value)))
    }
}

// Hash-based collections iterate in an arbitrary order, so their entries are
// summed instead of folded.
impl<K: HashCode, V: HashCode, S: BuildHasher> HashCode for HashMap<K, V, S> {
    fn hash_code(&self) -> i32 {
        self.iter()
            .fold(0, |acc: i32, (key, value)| acc.wrapping_add(entry_hash(key, value)))
    }
}

impl<T: HashCode, S: BuildHasher> HashCode for HashSet<T, S> {
    fn hash_code(&self) -> i32 {
        self.iter()
            .fold(0, |acc: i32, item| acc.wrapping_add(item.hash_code()))
    }
}

///
/// TESTS
///
