/// Version string reported by the CLI and logged at startup.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Passes `self` and the contained value to `f` if `value` is `Some`,
    /// otherwise returns `self` untouched.
    ///
    /// #### Example
    /// ```rust
    /// # use folio_utils::Apply;
    /// fn greet(name: Option<&str>) -> String {
    ///     "Hello".to_owned().apply_map(name, |s, name| format!("{s}, {name}"))
    /// }
    /// assert_eq!(greet(None), "Hello");
    /// assert_eq!(greet(Some("World")), "Hello, World");
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

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the predicate")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn assert_matches_accepts_matching_value() {
        assert_matches!(Some(3), Some(3));
        assert_matches!(Some(4), Some(x) if x % 2 == 0);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn assert_matches_rejects_other_value() {
        assert_matches!(None::<i32>, Some(_));
    }

    #[test]
    #[should_panic = "does not match predicate"]
    fn assert_matches_rejects_failed_predicate() {
        assert_matches!(Some(3), Some(x) if x % 2 == 0);
    }
}
