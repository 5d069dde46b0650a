pub trait Apply {
    /// Transforms `self` via `f` if `value` is `Some(...)`, passing the
    /// contained value along, and returns `self` unchanged otherwise.
    ///
    /// Useful for optional steps in builder chains:
    ///
    /// ```rust
    /// # use portfolio_utils::Apply;
    /// fn greeting(name: Option<&str>) -> String {
    ///     String::from("Hello").apply_map(name, |s, n| format!("{s}, {n}"))
    /// }
    /// assert_eq!(greeting(None), "Hello");
    /// assert_eq!(greeting(Some("Max")), "Hello, Max");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}

/// Asserts that a value matches a pattern, with an optional `if` guard.
///
/// Unlike a bare `matches!` assertion, the panic message includes the value.
/// The guard arm matches on a reference, so bindings used in the predicate
/// are references into the value.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "{val:?} does not match {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables)]
            $pat => ::core::panic!(
                "{val:?} does not satisfy {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "{val:?} does not match {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_map() {
        assert_eq!(2i32.apply_map(None::<i32>, |a, b| a + b), 2);
        assert_eq!(2i32.apply_map(Some(3), |a, b| a + b), 5);
    }

    #[test]
    fn assert_matches() {
        assert_matches!(Some(7), Some(_));
        assert_matches!(Some(7), Some(x) if *x > 5);
    }

    #[test]
    #[should_panic = "does not match"]
    fn assert_matches_mismatch() {
        assert_matches!(None::<i32>, Some(_));
    }
}
