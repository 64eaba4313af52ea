// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::field::{FieldAccess, FieldValue, Fields};
use crate::{Main, Message, SnarlBuilder};

/// A shared, thread-safe error object.
///
/// Errors inside a [`Snarl`] are reference counted so that cloning a composite, or nesting it
/// inside another one, never copies the errors themselves. Passing a `SharedError` into a
/// composite also lets you match it later by identity with [`Snarl::is`].
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Whether the main error came from text or from an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// The main error is a [`Message`] built from text. It is transparent and has no source.
    Text,
    /// The main error is an error value. It is exposed as the composite's source.
    Error,
}

/// Internal error data that is boxed to keep `Snarl` lightweight.
#[derive(Debug, Clone)]
pub(crate) struct Inner {
    pub(crate) main: SharedError,
    pub(crate) origin: Origin,
    pub(crate) wrapped: Vec<SharedError>,
    pub(crate) fields: Fields,
}

/// Composite error made of a main error, wrapped errors and fields.
///
/// The main error is what the composite *is*: it provides the short message and is returned by
/// [`main_error`](Self::main_error). Wrapped errors are carried alongside for
/// [`is`](Self::is) and [`find`](Self::find) lookups and appear in the long message. Fields hold
/// structured metadata such as an HTTP status code.
///
/// The data is boxed, so a `Snarl` is the size of a pointer and `Result<T, Snarl>` stays small.
///
/// # Examples
///
/// ```rust
/// use snarl::{Snarl, with_http_code};
///
/// let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
/// let error = snarl::snarl!("cannot save profile", io, "profile.json", with_http_code(500)).unwrap();
///
/// assert_eq!(error.to_string(), "cannot save profile");
/// assert_eq!(format!("{error:#}"), "cannot save profile: access denied: profile.json");
/// assert_eq!(error.http_code(), 500);
/// assert!(error.find::<std::io::Error>().is_some());
/// ```
#[derive(Clone)]
pub struct Snarl {
    pub(crate) data: Box<Inner>,
}

impl Snarl {
    /// Creates a composite from a main input alone.
    ///
    /// Returns `None` when the input is absent, so possibly-missing errors can be wrapped
    /// unconditionally.
    ///
    /// ```rust
    /// use snarl::{Main, Snarl};
    ///
    /// assert_eq!(Snarl::new("timed out").unwrap().to_string(), "timed out");
    /// assert!(Snarl::new("").is_none());
    /// assert!(Snarl::new(Main::from_option(None::<std::io::Error>)).is_none());
    /// ```
    #[must_use]
    pub fn new(main: impl Into<Main>) -> Option<Self> {
        Self::builder(main).build()
    }

    /// Creates a composite from a main input and a sequence of extras.
    ///
    /// Extras are processed left to right: text and errors are appended to the wrapped list,
    /// options are applied immediately. Use the [`snarl!`](crate::snarl!) macro to pass extras of
    /// different kinds inline.
    #[must_use]
    pub fn compose<I>(main: impl Into<Main>, extras: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<crate::Extra>,
    {
        Self::builder(main).extras(extras).build()
    }

    /// Creates a [`SnarlBuilder`] for assembling a composite step by step.
    #[must_use]
    pub fn builder(main: impl Into<Main>) -> SnarlBuilder {
        SnarlBuilder::new(main.into())
    }

    pub(crate) fn from_parts(main: SharedError, origin: Origin) -> Self {
        Self {
            data: Box::new(Inner {
                main,
                origin,
                wrapped: Vec::new(),
                fields: Fields::default(),
            }),
        }
    }

    pub(crate) fn from_text(text: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        Self::from_parts(Arc::new(Message::new(text)), Origin::Text)
    }

    /// Returns the main error.
    #[must_use]
    pub fn main_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.data.main.as_ref()
    }

    /// Returns a shared handle to the main error.
    #[must_use]
    pub fn shared_main_error(&self) -> SharedError {
        Arc::clone(&self.data.main)
    }

    /// Returns the wrapped errors in insertion order.
    #[must_use]
    pub fn wrapped(&self) -> &[SharedError] {
        &self.data.wrapped
    }

    /// Returns the fields attached to this composite.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.data.fields
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get_field(&self, key: &str) -> Option<&FieldValue> {
        FieldAccess::get_field(self, key)
    }

    /// Returns the HTTP status code, or `0` if none is set.
    ///
    /// See [`FieldAccess::http_code`] for the exact rules.
    #[must_use]
    pub fn http_code(&self) -> u16 {
        FieldAccess::http_code(self)
    }
}

impl fmt::Debug for Snarl {
    #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snarl")
            .field("main", &self.data.main)
            .field("wrapped", &self.data.wrapped)
            .field("fields", &self.data.fields)
            .finish()
    }
}

impl fmt::Display for Snarl {
    /// `{}` renders the main error message, `{:#}` appends every wrapped message.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            fmt::Display::fmt(&self.long(), f)
        } else {
            fmt::Display::fmt(&self.data.main, f)
        }
    }
}

impl StdError for Snarl {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.data.origin {
            Origin::Text => None,
            Origin::Error => Some(self.data.main.as_ref()),
        }
    }
}
