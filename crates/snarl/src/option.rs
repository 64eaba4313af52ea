// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::field::{FieldValue, HTTP_CODE};
use crate::{SharedError, Snarl};

/// A mutation applied to a [`Snarl`] while it is being built.
///
/// Options are plain data rather than closures, so they can be inspected, cloned and compared
/// before they are applied. Use [`same_target`](Self::same_target) to compare only the key a
/// field option writes to. Create them with [`with_field`] and [`with_http_code`], or
/// build the variants directly.
#[derive(Clone)]
pub enum ConfigOption {
    /// Stores `value` under `key`, replacing any previous value.
    Field {
        /// The field key.
        key: Cow<'static, str>,
        /// The field value.
        value: FieldValue,
    },
    /// Appends an error to the wrapped list.
    Wrap(SharedError),
}

impl ConfigOption {
    /// Returns the field key this option writes to, if it is a [`Field`](Self::Field) option.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Field { key, .. } => Some(key),
            Self::Wrap(_) => None,
        }
    }

    /// Returns `true` when both options write to the same field key, or wrap the same error
    /// object.
    ///
    /// Unlike `==`, the values of field options are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snarl::{with_field, with_http_code};
    ///
    /// assert!(with_http_code(503).same_target(&with_field("http_code", 0)));
    /// assert_ne!(with_http_code(503), with_http_code(404));
    /// ```
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field { key: a, .. }, Self::Field { key: b, .. }) => a == b,
            (Self::Wrap(a), Self::Wrap(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn apply(self, target: &mut Snarl) {
        match self {
            Self::Field { key, value } => target.data.fields.insert(key, value),
            Self::Wrap(error) => target.data.wrapped.push(error),
        }
    }
}

impl fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { key, value } => f.debug_struct("Field").field("key", key).field("value", value).finish(),
            Self::Wrap(error) => f.debug_tuple("Wrap").field(&error.to_string()).finish(),
        }
    }
}

impl PartialEq for ConfigOption {
    /// Field options are equal when they write the same value to the same key; wrap options when
    /// they wrap the same error object.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field { key: a, value: x }, Self::Field { key: b, value: y }) => a == b && x == y,
            (Self::Wrap(a), Self::Wrap(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Creates an option that stores `value` under `key`.
///
/// # Examples
///
/// ```rust
/// use snarl::{FieldAccess, with_field};
///
/// let error = snarl::snarl!("quota exceeded", with_field("tenant", "contoso")).unwrap();
/// assert_eq!(error.get_field("tenant").and_then(|v| v.as_str()), Some("contoso"));
/// ```
pub fn with_field(key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> ConfigOption {
    ConfigOption::Field {
        key: key.into(),
        value: value.into(),
    }
}

/// Creates an option that stores an HTTP status code under [`HTTP_CODE`].
///
/// # Examples
///
/// ```rust
/// use snarl::with_http_code;
///
/// let error = snarl::snarl!("not found", with_http_code(404)).unwrap();
/// assert_eq!(error.http_code(), 404);
/// ```
#[must_use]
pub fn with_http_code(code: u16) -> ConfigOption {
    with_field(HTTP_CODE, code)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;

    #[test]
    fn http_code_option_targets_well_known_key() {
        let option = with_http_code(503);
        assert_eq!(option.key(), Some(HTTP_CODE));
        assert_eq!(option, with_field("http_code", 503));
        assert!(option.same_target(&with_field("http_code", 0)));
        assert!(!option.same_target(&with_field("attempt", 503)));
        assert_eq!(format!("{option:?}"), r#"Field { key: "http_code", value: Int(503) }"#);
    }

    #[test]
    fn field_options_compare_key_and_value() {
        assert_ne!(with_http_code(503), with_http_code(404));
        assert_ne!(with_field("k", 1), with_field("k", "1"));
        assert_ne!(with_field("a", true), with_field("b", true));
        assert_eq!(with_field("k", 1.5), with_field("k", 1.5_f32));

        let payload = FieldValue::any(vec![1_u8]);
        assert_eq!(with_field("k", payload.clone()), with_field("k", payload));
        assert_ne!(with_field("k", FieldValue::any(1_u8)), with_field("k", FieldValue::any(1_u8)));
    }

    #[test]
    fn wrap_options_compare_by_identity() {
        let shared: SharedError = Arc::new(Message::new("shared"));
        let a = ConfigOption::Wrap(Arc::clone(&shared));
        let b = ConfigOption::Wrap(shared);
        let c = ConfigOption::Wrap(Arc::new(Message::new("shared")));

        assert_eq!(a.key(), None);
        assert_eq!(a, b);
        assert!(a.same_target(&b));
        assert_ne!(a, c);
        assert!(!a.same_target(&c));
        assert_ne!(a, with_http_code(200));
        assert_eq!(format!("{a:?}"), r#"Wrap("shared")"#);
    }

    #[test]
    fn apply_mutates_in_progress_composite() {
        let mut target = Snarl::builder("base").build().unwrap();
        with_field("attempt", 3).apply(&mut target);
        ConfigOption::Wrap(Arc::new(Message::new("later"))).apply(&mut target);

        assert_eq!(target.fields().get("attempt").and_then(FieldValue::as_int), Some(3));
        assert_eq!(target.wrapped().len(), 1);
        assert_eq!(target.wrapped()[0].to_string(), "later");
    }
}
