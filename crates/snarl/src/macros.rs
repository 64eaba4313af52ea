// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Compose a [`Snarl`](crate::Snarl) in place from a main input and any number of extras.
///
/// Each extra may be of a different kind: text, an error value, a
/// [`SharedError`](crate::SharedError), another [`Snarl`](crate::Snarl) or a
/// [`ConfigOption`](crate::ConfigOption). Every argument goes through the `From` impls of
/// [`Main`](crate::Main) and [`Extra`](crate::Extra), except a typed `Arc<E>` or `Box<E>`, which
/// is taken as a shared error so that [`Snarl::is`](crate::Snarl::is) still matches it. The
/// result is that of [`Snarl::compose`](crate::Snarl::compose): `None` when the main input is
/// absent.
///
/// # Examples
///
/// ```rust
/// use snarl::snarl;
///
/// let error = snarl!("base", "layer 1", "layer 2").unwrap();
/// assert_eq!(format!("{error:#}"), "base: layer 1: layer 2");
/// ```
///
/// Mixing errors, text and options:
///
/// ```rust
/// use snarl::{snarl, with_field};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("lease expired")]
/// struct LeaseExpired;
///
/// let error = snarl!(
///     std::io::Error::other("write failed"),
///     LeaseExpired,
///     "partition 4",
///     with_field("attempt", 3),
/// )
/// .unwrap();
///
/// assert_eq!(format!("{error:#}"), "write failed: lease expired: partition 4");
/// assert!(error.find::<LeaseExpired>().is_some());
/// ```
///
/// A typed `Arc` keeps its identity:
///
/// ```rust
/// use std::sync::Arc;
///
/// use snarl::snarl;
///
/// let cause = Arc::new(std::fmt::Error);
/// let error = snarl!("render failed", Arc::clone(&cause)).unwrap();
/// assert!(error.is(cause.as_ref()));
/// ```
///
/// An absent main input yields `None`:
///
/// ```rust
/// assert!(snarl::snarl!("", "ignored").is_none());
/// ```
#[macro_export]
macro_rules! snarl {
    ($main:expr $(,)?) => {{
        #[allow(unused_imports, reason = "each argument resolves through only one of the traits")]
        use $crate::macro_support::{Convert as _, SharedArg as _};
        $crate::Snarl::new($crate::macro_support::Arg::new($main).into_main())
    }};
    ($main:expr, $($extra:expr),+ $(,)?) => {{
        #[allow(unused_imports, reason = "each argument resolves through only one of the traits")]
        use $crate::macro_support::{Convert as _, SharedArg as _};
        $crate::Snarl::compose(
            $crate::macro_support::Arg::new($main).into_main(),
            [$($crate::macro_support::Arg::new($extra).into_extra()),+].into_iter().flatten(),
        )
    }};
}
