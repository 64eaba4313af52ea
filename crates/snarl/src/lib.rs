// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Composite errors with wrapped errors and typed fields.
//!
//! A [`Snarl`] combines a main error with any number of secondary errors, text annotations and
//! structured fields (such as an HTTP status code) into a single error value. Every error that
//! went in stays reachable: [`Snarl::is`] tests membership by identity and [`Snarl::find`]
//! looks an error up by type.
//!
//! # Key Features
//!
//! - [**`snarl!`**](snarl!): Compose an error inline from a main input and mixed extras
//! - [**`SnarlBuilder`**](SnarlBuilder): Assemble an error step by step
//! - [**`FieldAccess`**](FieldAccess): Read fields from a composite, an `Option` or a `Result`
//! - [**`Main::from_any`**](Main::from_any): Accept inputs whose type is only known at run time
//!
//! # Quick Start
//!
//! ```rust
//! use snarl::{Snarl, with_http_code};
//!
//! fn load_profile(path: &str) -> Result<String, Snarl> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| snarl::snarl!("cannot load profile", e, with_http_code(500)).expect("text main is present"))
//! }
//!
//! let error = load_profile("/definitely/not/here.json").unwrap_err();
//! assert_eq!(error.to_string(), "cannot load profile");
//! assert_eq!(error.http_code(), 500);
//! assert!(error.find::<std::io::Error>().is_some());
//! ```
//!
//! # Main Input
//!
//! The main input decides what the composite *is*. It is described by [`Main`]:
//!
//! - text becomes a [`Message`] error; empty text counts as absent
//! - an error value becomes the main error and is exposed through [`source`](std::error::Error::source)
//! - an existing [`Snarl`] is extended: its main error, wrapped errors and fields carry over
//! - [`Main::Absent`] (or `None` through [`Main::from_option`]) yields no composite at all
//!
//! Because an absent main yields `None`, a possibly-missing error can be wrapped unconditionally:
//!
//! ```rust
//! use snarl::{Main, Snarl};
//!
//! let maybe: Option<std::io::Error> = None;
//! assert!(Snarl::compose(Main::from_option(maybe), ["while syncing"]).is_none());
//! ```
//!
//! # Extras
//!
//! Extras are processed left to right. Text and errors are appended to the wrapped list, and
//! [`ConfigOption`]s are applied to the composite as they are met, so a later option overwrites
//! an earlier one with the same key.
//!
//! ```rust
//! use snarl::with_http_code;
//!
//! let error = snarl::snarl!("checkout failed", with_http_code(400), "cart 17", with_http_code(409)).unwrap();
//! assert_eq!(error.http_code(), 409);
//! assert_eq!(format!("{error:#}"), "checkout failed: cart 17");
//! ```
//!
//! # Rendering
//!
//! `{}` renders the main error only. `{:#}` renders the long form: the main error followed by
//! every wrapped error, joined with `": "`. [`Snarl::quoted`] renders the short form as an escaped,
//! double-quoted string.
//!
//! # Logging
//!
//! With the `logs` feature, an extra of an unsupported type passed to [`Extra::from_any`] is
//! reported as a `snarl.extra.ignored` warning through [`tracing`](https://docs.rs/tracing).

#![doc(html_logo_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/snarl/logo.png")]
#![doc(html_favicon_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/snarl/favicon.ico")]

mod builder;
mod core;
mod dynamic;
mod error;
mod field;
mod format;
mod input;
#[doc(hidden)]
pub mod macro_support;
mod macros;
mod matching;
mod message;
mod option;

#[cfg(any(feature = "test-util", test))]
pub mod test_util;

pub use builder::SnarlBuilder;
pub use error::UnsupportedTypeError;
pub use field::{FieldAccess, FieldValue, Fields, HTTP_CODE};
pub use format::{Long, Quoted, Verb};
pub use input::{Extra, Main};
pub use message::Message;
pub use option::{ConfigOption, with_field, with_http_code};

pub use crate::core::{SharedError, Snarl};

#[cfg(test)]
mod auto_traits {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Snarl: Send, Sync, Clone, std::error::Error);
    assert_impl_all!(Main: Send, Sync);
    assert_impl_all!(Extra: Send, Sync);
    assert_impl_all!(ConfigOption: Send, Sync);
    assert_impl_all!(FieldValue: Send, Sync);
    assert_impl_all!(Fields: Send, Sync);
    assert_impl_all!(Message: Send, Sync);
}
