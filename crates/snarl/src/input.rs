// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::Arc;

use crate::{ConfigOption, SharedError, Snarl};

pub(crate) type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// The main input of a composite.
///
/// Usually created through [`From`]: text becomes [`Text`](Self::Text) (empty text becomes
/// [`Absent`](Self::Absent)), a [`Snarl`] becomes [`Nested`](Self::Nested), and any other error
/// becomes [`Error`](Self::Error). A [`SharedError`] keeps its identity.
///
/// A typed `Arc<E>` is itself an error, so `From` stores it behind a new allocation: it can still
/// be found with [`Snarl::find`], but [`Snarl::is`] no longer matches the original. Use
/// [`Main::shared`] (or the [`snarl!`](crate::snarl!) macro) to keep its identity.
///
/// # Examples
///
/// ```rust
/// use snarl::{Main, Snarl};
///
/// assert!(matches!(Main::from("disk full"), Main::Text(_)));
/// assert!(matches!(Main::from(""), Main::Absent));
/// assert!(matches!(Main::from(std::fmt::Error), Main::Error(_)));
/// assert!(matches!(Main::from(Snarl::new("inner").unwrap()), Main::Nested(_)));
/// ```
#[derive(Debug, Clone)]
pub enum Main {
    /// No error. Composing from an absent main yields no composite.
    Absent,
    /// Text that becomes a [`Message`](crate::Message) error.
    Text(Cow<'static, str>),
    /// An error used as the main error.
    Error(SharedError),
    /// An existing composite whose main error, wrapped list and fields are inherited.
    Nested(Snarl),
}

impl Main {
    /// Converts a possibly-missing value, mapping `None` to [`Absent`](Self::Absent).
    pub fn from_option<E: Into<Self>>(value: Option<E>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }

    /// Uses a shared error as the main error, so it can later be matched by identity.
    ///
    /// A shared [`Snarl`] becomes [`Nested`](Self::Nested).
    pub fn shared<E: StdError + Send + Sync + 'static>(error: Arc<E>) -> Self {
        let error: SharedError = error;
        match error.downcast_ref::<Snarl>() {
            Some(nested) => Self::Nested(nested.clone()),
            None => Self::Error(error),
        }
    }

    /// Returns `true` for [`Absent`](Self::Absent).
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<E> From<E> for Main
where
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    fn from(value: E) -> Self {
        let text = is_text(&value);
        let boxed: Box<dyn StdError + Send + Sync> = value.into();
        if text {
            let text = boxed.to_string();
            return if text.is_empty() { Self::Absent } else { Self::Text(text.into()) };
        }

        match into_nested(boxed) {
            Ok(nested) => Self::Nested(nested),
            Err(error) => Self::Error(into_shared(error)),
        }
    }
}

/// An additional input of a composite: text, an error or a [`ConfigOption`].
///
/// Text and errors are appended to the wrapped list, options are applied to the composite being
/// built. A [`Snarl`] passed as an extra is appended as a single error; it is not flattened.
///
/// As with [`Main`], a typed `Arc<E>` converted through `From` loses its identity. Use
/// [`Extra::shared`] (or the [`snarl!`](crate::snarl!) macro) to keep it.
#[derive(Debug, Clone)]
pub enum Extra {
    /// Text that becomes a [`Message`](crate::Message) error.
    Text(Cow<'static, str>),
    /// An error to append.
    Error(SharedError),
    /// An option to apply.
    Config(ConfigOption),
}

impl Extra {
    /// Appends a shared error, so it can later be matched by identity.
    pub fn shared<E: StdError + Send + Sync + 'static>(error: Arc<E>) -> Self {
        Self::Error(error)
    }
}

impl<E> From<E> for Extra
where
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    fn from(value: E) -> Self {
        let text = is_text(&value);
        let boxed: Box<dyn StdError + Send + Sync> = value.into();
        if text {
            Self::Text(boxed.to_string().into())
        } else {
            Self::Error(into_shared(boxed))
        }
    }
}

impl From<ConfigOption> for Extra {
    fn from(option: ConfigOption) -> Self {
        Self::Config(option)
    }
}

/// Extracts a composite, also when it arrives as an `Arc<Snarl>` or a `Box<Snarl>`.
fn into_nested(error: BoxedError) -> Result<Snarl, BoxedError> {
    let error = match error.downcast::<Snarl>() {
        Ok(nested) => return Ok(*nested),
        Err(error) => error,
    };
    let error = match error.downcast::<Arc<Snarl>>() {
        Ok(nested) => return Ok(Snarl::clone(&nested)),
        Err(error) => error,
    };
    error.downcast::<Box<Snarl>>().map(|nested| **nested)
}

/// Reuses the allocation of an already shared error instead of wrapping it a second time.
pub(crate) fn into_shared(error: BoxedError) -> SharedError {
    match error.downcast::<SharedError>() {
        Ok(shared) => *shared,
        Err(error) => Arc::from(error),
    }
}

const STR_TYPE_IDS: [typeid::ConstTypeId; 3] = [
    typeid::ConstTypeId::of::<&str>(),
    typeid::ConstTypeId::of::<String>(),
    typeid::ConstTypeId::of::<Cow<'_, str>>(),
];

fn is_text<T>(_: &T) -> bool {
    let typeid_of_t = typeid::of::<T>();
    STR_TYPE_IDS.iter().any(|&id| id == typeid_of_t)
}
