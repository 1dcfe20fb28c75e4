/// Marker body for `PartialEq` operator stubs.
///
/// The weaver replaces every call to this function with the synthesized
/// equality; reaching it at runtime means the enclosing impl was never woven.
///
/// ```ignore
/// impl PartialEq for Point {
///     fn eq(&self, other: &Self) -> bool {
///         arkane::operator()
///     }
/// }
/// ```
#[track_caller]
#[must_use]
pub fn operator() -> bool {
    panic!("equality operator stub was not woven; declare the type inside a #[weave] module")
}

#[cfg(test)]
mod tests {
    use super::operator;

    #[test]
    #[should_panic(expected = "was not woven")]
    fn unwoven_stub_panics() {
        let _ = operator();
    }
}
