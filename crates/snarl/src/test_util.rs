// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities for the snarl crate.
//!
//! This module is only available when the `test-util` feature is enabled.

/// Assert that an error is reachable from a composite through [`Snarl::is`](crate::Snarl::is).
///
/// On failure the panic message shows the long form of the composite and the target.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use std::sync::Arc;
/// use snarl::{SharedError, assert_reaches};
///
/// let cause: SharedError = Arc::new(std::io::Error::other("disk full"));
/// let error = snarl::snarl!("write failed", Arc::clone(&cause)).unwrap();
/// assert_reaches!(error, cause.as_ref());
/// # }
/// ```
#[macro_export]
#[cfg_attr(coverage_nightly, coverage(off))] // coverage doesn't handle panics well
macro_rules! assert_reaches {
    ($error:expr, $target:expr $(,)?) => {{
        let error: &$crate::Snarl = &$error;
        let target: &(dyn ::std::error::Error + 'static) = $target;
        if !error.is(target) {
            panic!("composite does not reach target\ncomposite: {error:#}\ntarget   : {target}");
        }
    }};
}

/// Assert that the long form (`{:#}`) of a composite equals the expected text.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use snarl::assert_long_form;
///
/// let error = snarl::snarl!("base", "layer 1", "layer 2").unwrap();
/// assert_long_form!(error, "base: layer 1: layer 2");
/// # }
/// ```
#[macro_export]
#[cfg_attr(coverage_nightly, coverage(off))] // coverage doesn't handle panics well
macro_rules! assert_long_form {
    ($error:expr, $expected:expr $(,)?) => {{
        let error: &$crate::Snarl = &$error;
        let actual = error.long().to_string();
        let expected: &str = $expected;
        if actual != expected {
            panic!("left : {expected}\nright: {actual}");
        }
    }};
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use crate::{SharedError, Snarl};

    #[test]
    fn reaches_shared_extra() {
        let cause: SharedError = Arc::new(io::Error::other("cause"));
        let error = Snarl::compose("base", [Arc::clone(&cause)]).unwrap();
        assert_reaches!(error, cause.as_ref());
    }

    #[test]
    #[should_panic(expected = "composite does not reach target\ncomposite: base: cause\ntarget   : cause")]
    fn reaches_fails_for_lookalike() {
        let error = Snarl::compose("base", [io::Error::other("cause")]).unwrap();
        let lookalike = io::Error::other("cause");
        assert_reaches!(error, &lookalike);
    }

    #[test]
    fn long_form_matches() {
        let error = Snarl::compose("base", ["one", "two"]).unwrap();
        assert_long_form!(error, "base: one: two");
    }

    #[test]
    #[should_panic(expected = "left : base: one\nright: base: two")]
    fn long_form_mismatch() {
        let error = Snarl::compose("base", ["two"]).unwrap();
        assert_long_form!(error, "base: one");
    }
}
