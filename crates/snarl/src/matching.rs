// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::sync::Arc;

use crate::Snarl;

impl Snarl {
    /// Returns `true` if `target` is the main error, one of the wrapped errors, or any error in
    /// their source chains.
    ///
    /// Matching is by identity: the object behind `target` must be the very object stored in the
    /// composite. Pass errors in as [`SharedError`](crate::SharedError)s (or with
    /// [`Extra::shared`](crate::Extra::shared)) to keep a handle for this check. Composites found
    /// along the way are searched as well.
    ///
    /// A composite used as `target` matches when its main error is reachable.
    ///
    /// An error passed in as a typed `Arc<E>` through [`From`] is stored as a new allocation; use
    /// [`Extra::shared`](crate::Extra::shared), [`Main::shared`](crate::Main::shared) or the
    /// [`snarl!`](crate::snarl!) macro to keep its identity.
    ///
    /// The main error's chain is searched first, then each wrapped error in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use snarl::SharedError;
    ///
    /// let timeout: SharedError = Arc::new(std::io::Error::from(std::io::ErrorKind::TimedOut));
    /// let error = snarl::snarl!("sync failed", Arc::clone(&timeout)).unwrap();
    ///
    /// assert!(error.is(timeout.as_ref()));
    /// ```
    #[must_use]
    pub fn is(&self, target: &(dyn StdError + 'static)) -> bool {
        if let Some(composite) = target.downcast_ref::<Self>() {
            return self.is(composite.main_error());
        }

        self.errors().any(|error| chain_contains(error, target))
    }

    /// Finds the first error of type `T`.
    ///
    /// The main error's chain is searched first, then each wrapped error's chain in insertion
    /// order. Composites found along the way are searched as well. Errors stored inside an `Arc`
    /// or a `Box` are looked through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("rate limited for {0}s")]
    /// struct RateLimited(u32);
    ///
    /// let error = snarl::snarl!("publish failed", RateLimited(30), "topic: orders").unwrap();
    /// assert_eq!(error.find::<RateLimited>().unwrap().0, 30);
    /// ```
    #[must_use]
    pub fn find<T: StdError + 'static>(&self) -> Option<&T> {
        self.find_with(|_| true)
    }

    /// Finds the first error of type `T` that satisfies `search`.
    ///
    /// Uses the same traversal as [`find`](Self::find).
    pub fn find_with<T: StdError + 'static>(&self, search: impl Fn(&T) -> bool) -> Option<&T> {
        self.find_dyn(&search)
    }

    fn find_dyn<T: StdError + 'static>(&self, search: &dyn Fn(&T) -> bool) -> Option<&T> {
        for error in self.errors() {
            let mut current: Option<&(dyn StdError + 'static)> = Some(error);
            while let Some(err) = current {
                if let Some(target) = look_through::<T>(err)
                    && search(target)
                {
                    return Some(target);
                }
                if let Some(nested) = look_through::<Self>(err)
                    && let Some(found) = nested.find_dyn(search)
                {
                    return Some(found);
                }
                current = err.source();
            }
        }
        None
    }

    /// Iterates over the main error followed by the wrapped errors.
    pub fn errors(&self) -> impl Iterator<Item = &(dyn StdError + Send + Sync + 'static)> {
        std::iter::once(self.main_error()).chain(self.data.wrapped.iter().map(AsRef::as_ref))
    }
}

/// Downcasts `error` to `T`, also when it is an `Arc<T>` or a `Box<T>`.
///
/// The `Error` impls of `Arc` and `Box` forward to the inner value but do not expose it as a
/// source, so a plain `downcast_ref` stops at the wrapper.
fn look_through<'a, T: StdError + 'static>(error: &'a (dyn StdError + 'static)) -> Option<&'a T> {
    error
        .downcast_ref::<T>()
        .or_else(|| error.downcast_ref::<Arc<T>>().map(|wrapped| &**wrapped))
        .or_else(|| error.downcast_ref::<Box<T>>().map(|wrapped| &**wrapped))
}

fn chain_contains(error: &(dyn StdError + 'static), target: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if std::ptr::addr_eq(err, target) {
            return true;
        }
        if let Some(nested) = look_through::<Snarl>(err)
            && nested.is(target)
        {
            return true;
        }
        current = err.source();
    }
    false
}
