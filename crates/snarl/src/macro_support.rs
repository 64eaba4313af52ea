// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Argument conversion used by [`snarl!`](crate::snarl!).
//!
//! A typed `Arc<E>` is itself an error, so the blanket `From` impls would store it behind a new
//! allocation. The macro wraps each argument in [`Arg`] and calls `into_main`/`into_extra` by
//! method syntax: [`SharedArg`] takes typed `Arc<E>` and `Box<E>` by value and keeps the error's
//! identity, while [`Convert`] on `&Arg<T>` is only reached through autoref for everything else.

use std::cell::Cell;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::{Extra, Main};

/// One macro argument awaiting conversion.
pub struct Arg<T>(Cell<Option<T>>);

impl<T> Arg<T> {
    /// Wraps a macro argument.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Cell::new(Some(value)))
    }
}

impl<T> fmt::Debug for Arg<T> {
    #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg").finish_non_exhaustive()
    }
}

/// Conversion of typed shared or boxed errors that keeps their identity.
pub trait SharedArg {
    /// Converts into a main input.
    fn into_main(self) -> Main;

    /// Converts into an extra.
    fn into_extra(self) -> Option<Extra>;
}

impl<E: StdError + Send + Sync + 'static> SharedArg for Arg<Arc<E>> {
    fn into_main(self) -> Main {
        self.0.into_inner().map_or(Main::Absent, Main::shared)
    }

    fn into_extra(self) -> Option<Extra> {
        self.0.into_inner().map(Extra::shared)
    }
}

impl<E: StdError + Send + Sync + 'static> SharedArg for Arg<Box<E>> {
    fn into_main(self) -> Main {
        self.0.into_inner().map_or(Main::Absent, |error| Main::shared::<E>(Arc::from(error)))
    }

    fn into_extra(self) -> Option<Extra> {
        self.0.into_inner().map(|error| Extra::shared::<E>(Arc::from(error)))
    }
}

/// Conversion through the `From` impls of [`Main`] and [`Extra`].
pub trait Convert {
    /// The wrapped argument type.
    type Value;

    /// Converts into a main input.
    fn into_main(self) -> Main
    where
        Self::Value: Into<Main>;

    /// Converts into an extra.
    fn into_extra(self) -> Option<Extra>
    where
        Self::Value: Into<Extra>;
}

impl<T> Convert for &Arg<T> {
    type Value = T;

    fn into_main(self) -> Main
    where
        T: Into<Main>,
    {
        self.0.take().map_or(Main::Absent, Into::into)
    }

    fn into_extra(self) -> Option<Extra>
    where
        T: Into<Extra>,
    {
        self.0.take().map(Into::into)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{SharedError, Snarl};

    #[test]
    fn typed_arc_keeps_identity() {
        let typed = Arc::new(io::Error::other("typed"));
        let Main::Error(main) = Arg::new(Arc::clone(&typed)).into_main() else {
            panic!("expected Main::Error");
        };
        let expected: SharedError = typed;
        assert!(Arc::ptr_eq(&main, &expected));
    }

    #[test]
    fn boxed_composite_becomes_nested() {
        let nested = Box::new(Snarl::new("inner").unwrap());
        assert!(matches!(Arg::new(nested).into_main(), Main::Nested(_)));
    }

    #[test]
    fn other_values_convert_through_from() {
        assert!(matches!(Arg::new("text").into_main(), Main::Text(_)));
        assert!(matches!(Arg::new("").into_main(), Main::Absent));
        assert!(matches!(Arg::new(io::Error::other("owned")).into_extra(), Some(Extra::Error(_))));

        let shared: SharedError = Arc::new(io::Error::other("shared"));
        let Some(Extra::Error(extra)) = Arg::new(Arc::clone(&shared)).into_extra() else {
            panic!("expected Extra::Error");
        };
        assert!(Arc::ptr_eq(&extra, &shared));
    }

    #[test]
    fn second_conversion_finds_nothing() {
        let arg = Arg::new("once");
        assert!(arg.into_extra().is_some());
        assert!(arg.into_extra().is_none());
    }
}
