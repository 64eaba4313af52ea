// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;

/// Leaf error created from a plain text message.
///
/// Text passed as the main input or as an extra of a [`Snarl`](crate::Snarl) is turned into a
/// `Message`. It has no source, and its [`Display`](fmt::Display) output is the text itself.
///
/// # Examples
///
/// ```rust
/// use snarl::Message;
///
/// let error = snarl::snarl!("request failed", "retry budget exhausted").unwrap();
/// let annotation = error.find_with::<Message>(|m| m.as_str().starts_with("retry"));
/// assert_eq!(annotation.unwrap().as_str(), "retry budget exhausted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(Cow<'static, str>);

impl Message {
    /// Creates a new message error.
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self(text.into())
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Message {}
