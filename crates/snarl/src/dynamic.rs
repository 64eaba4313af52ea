// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Conversions from values whose type is only known at run time.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::io;

use crate::input::BoxedError;
use crate::{ConfigOption, Extra, Main, SharedError, Snarl, UnsupportedTypeError};

/// Moves the value out of `slot` if it holds an `Option<U>`.
fn take<U: 'static>(slot: &mut dyn Any) -> Option<U> {
    slot.downcast_mut::<Option<U>>().and_then(Option::take)
}

macro_rules! take_into {
    ($slot:expr, $convert:path => $($ty:ty),+ $(,)?) => {
        $(
            if let Some(value) = take::<$ty>($slot) {
                return Some($convert(value));
            }
        )+
    };
}

/// Panic payloads carry their message as `&str` or `String`.
fn payload_text(slot: &mut dyn Any) -> Option<Cow<'static, str>> {
    let payload = take::<Box<dyn Any + Send>>(slot)?;
    match payload.downcast::<&'static str>() {
        Ok(text) => Some(Cow::Borrowed(*text)),
        Err(payload) => payload.downcast::<String>().ok().map(|text| Cow::Owned(*text)),
    }
}

fn main_from_slot(slot: &mut dyn Any) -> Option<Main> {
    take_into!(
        slot,
        Main::from => Main,
        Snarl,
        &'static str,
        String,
        Cow<'static, str>,
        SharedError,
        BoxedError,
        io::Error,
    );
    take_into!(
        slot,
        Main::from_option => Option<Main>,
        Option<Snarl>,
        Option<&'static str>,
        Option<String>,
        Option<Cow<'static, str>>,
        Option<SharedError>,
        Option<BoxedError>,
        Option<io::Error>,
    );
    payload_text(slot).map(Main::from)
}

/// A converted extra, or nothing for a supported `Option` holding `None`.
enum Taken {
    Extra(Extra),
    Nothing,
}

impl Taken {
    fn from_extra<E: Into<Extra>>(value: E) -> Self {
        Self::Extra(value.into())
    }

    fn from_option<E: Into<Extra>>(value: Option<E>) -> Self {
        value.map_or(Self::Nothing, Self::from_extra)
    }
}

fn extra_from_slot(slot: &mut dyn Any) -> Option<Taken> {
    take_into!(
        slot,
        Taken::from_extra => Extra,
        ConfigOption,
        Snarl,
        &'static str,
        String,
        Cow<'static, str>,
        SharedError,
        BoxedError,
        io::Error,
    );
    take_into!(
        slot,
        Taken::from_option => Option<Extra>,
        Option<ConfigOption>,
        Option<Snarl>,
        Option<&'static str>,
        Option<String>,
        Option<Cow<'static, str>>,
        Option<SharedError>,
        Option<BoxedError>,
        Option<io::Error>,
    );
    payload_text(slot).map(Taken::from_extra)
}

impl Main {
    /// Converts a value of any type into a main input.
    ///
    /// Supported types are [`Main`], [`Snarl`], `&'static str`, `String`, `Cow<'static, str>`,
    /// [`SharedError`], `Box<dyn Error + Send + Sync>`, [`std::io::Error`], `Option`s of those (where
    /// `None` is [`Absent`](Main::Absent)), and `Box<dyn Any + Send>` panic payloads holding text.
    /// These are the same forms [`Extra::from_any`] accepts, with [`Main`] in place of [`Extra`]
    /// and [`ConfigOption`].
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedTypeError`] naming `T` for any other type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snarl::Main;
    ///
    /// assert!(matches!(Main::from_any("text"), Ok(Main::Text(_))));
    /// assert!(matches!(Main::from_any(None::<String>), Ok(Main::Absent)));
    ///
    /// let error = Main::from_any(42_u8).unwrap_err();
    /// assert_eq!(error.type_name(), "u8");
    /// ```
    pub fn from_any<T: Any>(value: T) -> Result<Self, UnsupportedTypeError> {
        let mut slot = Some(value);
        main_from_slot(&mut slot).ok_or_else(UnsupportedTypeError::of::<T>)
    }
}

impl Extra {
    /// Converts a value of any type into an extra.
    ///
    /// Supported types are [`Extra`], [`ConfigOption`], [`Snarl`], `&'static str`, `String`,
    /// `Cow<'static, str>`, [`SharedError`], `Box<dyn Error + Send + Sync>`, [`std::io::Error`],
    /// `Option`s of those, and `Box<dyn Any + Send>` panic payloads holding text. A `None` of a
    /// supported `Option` type returns `None`.
    ///
    /// Any other value is dropped and `None` is returned. This keeps composing lenient about
    /// extras; a `snarl.extra.ignored` warning is logged (with the `logs` feature) so the drop
    /// does not go unnoticed.
    pub fn from_any<T: Any>(value: T) -> Option<Self> {
        let mut slot = Some(value);
        match extra_from_slot(&mut slot) {
            Some(Taken::Extra(extra)) => Some(extra),
            Some(Taken::Nothing) => None,
            None => {
                report_ignored(type_name::<T>());
                None
            }
        }
    }
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
fn report_ignored(rejected: &'static str) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "snarl.extra.ignored",
        tracing::Level::WARN,
        extra.type_name = rejected,
        "ignoring extra of unsupported type"
    );
}

impl Snarl {
    /// Composes from a main input of any type.
    ///
    /// This is [`compose`](Self::compose) for callers that only know the main input's type at run
    /// time. See [`Main::from_any`] for the supported types.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedTypeError`] if the main input is not of a supported type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snarl::Snarl;
    ///
    /// let payload = std::panic::catch_unwind(|| panic!("worker crashed")).unwrap_err();
    /// let error = Snarl::try_compose(payload, ["shard 3"]).unwrap().unwrap();
    /// assert_eq!(format!("{error:#}"), "worker crashed: shard 3");
    /// ```
    pub fn try_compose<M, I>(main: M, extras: I) -> Result<Option<Self>, UnsupportedTypeError>
    where
        M: Any,
        I: IntoIterator,
        I::Item: Into<Extra>,
    {
        Ok(Self::compose(Main::from_any(main)?, extras))
    }
}
