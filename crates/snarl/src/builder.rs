// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::sync::Arc;

use crate::core::Origin;
use crate::field::FieldValue;
use crate::{ConfigOption, Extra, Main, Message, Snarl, with_field, with_http_code};

/// Builder for creating [`Snarl`] instances step by step.
///
/// The main input is resolved when the builder is created, and every extra is applied
/// immediately, in call order. If the main input is absent, all extras are discarded and
/// [`build`](Self::build) returns `None`.
///
/// # Examples
///
/// ```rust
/// use snarl::Snarl;
///
/// let error = Snarl::builder("upload failed")
///     .error(std::io::Error::other("connection reset"))
///     .text("chunk 7 of 12")
///     .field("bucket", "media")
///     .http_code(502)
///     .build()
///     .unwrap();
///
/// assert_eq!(format!("{error:#}"), "upload failed: connection reset: chunk 7 of 12");
/// assert_eq!(error.http_code(), 502);
/// ```
#[derive(Debug)]
#[must_use]
pub struct SnarlBuilder {
    target: Option<Snarl>,
}

impl SnarlBuilder {
    pub(crate) fn new(main: Main) -> Self {
        let target = match main {
            Main::Absent => None,
            Main::Text(text) => Some(Snarl::from_text(text)),
            Main::Error(error) => Some(Snarl::from_parts(error, Origin::Error)),
            Main::Nested(nested) => Some(nested),
        };
        Self { target }
    }

    /// Appends a text annotation as a [`Message`] error.
    pub fn text(self, text: impl Into<Cow<'static, str>>) -> Self {
        self.extra(Extra::Text(text.into()))
    }

    /// Appends an error. Text is turned into a [`Message`], like any other extra.
    pub fn error<E>(self, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        self.extra(Extra::from(error))
    }

    /// Appends a shared error, so it can later be matched by identity with [`Snarl::is`].
    pub fn shared<E: std::error::Error + Send + Sync + 'static>(self, error: Arc<E>) -> Self {
        self.extra(Extra::shared(error))
    }

    /// Applies a single extra.
    pub fn extra(mut self, extra: impl Into<Extra>) -> Self {
        if let Some(target) = self.target.as_mut() {
            match extra.into() {
                Extra::Text(text) => target.data.wrapped.push(Arc::new(Message::new(text))),
                Extra::Error(error) => target.data.wrapped.push(error),
                Extra::Config(option) => option.apply(target),
            }
        }
        self
    }

    /// Applies extras left to right.
    pub fn extras<I>(self, extras: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Extra>,
    {
        extras.into_iter().fold(self, Self::extra)
    }

    /// Applies a configuration option.
    pub fn option(self, option: ConfigOption) -> Self {
        self.extra(Extra::Config(option))
    }

    /// Applies configuration options left to right.
    pub fn options(self, options: impl IntoIterator<Item = ConfigOption>) -> Self {
        options.into_iter().fold(self, Self::option)
    }

    /// Stores `value` under `key`. Shorthand for [`with_field`].
    pub fn field(self, key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> Self {
        self.option(with_field(key, value))
    }

    /// Stores an HTTP status code. Shorthand for [`with_http_code`].
    pub fn http_code(self, code: u16) -> Self {
        self.option(with_http_code(code))
    }

    /// Finishes the composite, or returns `None` if the main input was absent.
    #[must_use]
    pub fn build(self) -> Option<Snarl> {
        self.target
    }
}
