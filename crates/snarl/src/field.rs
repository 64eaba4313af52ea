// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::Snarl;

/// Key of the well-known HTTP status code field.
pub const HTTP_CODE: &str = "http_code";

/// Value stored in a field of a [`Snarl`].
///
/// Common scalar types have dedicated variants so they can be read back without downcasting.
/// Anything else can be stored with [`FieldValue::any`] and read back with
/// [`FieldValue::downcast_ref`].
///
/// Cloning a `FieldValue` is shallow: an [`Any`](FieldValue::Any) payload is shared, not copied.
#[derive(Clone)]
pub enum FieldValue {
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean flag.
    Bool(bool),
    /// A text value.
    Text(Cow<'static, str>),
    /// Any other value.
    Any(Arc<dyn Any + Send + Sync>),
}

impl FieldValue {
    /// Stores an arbitrary value.
    pub fn any<T: Any + Send + Sync>(value: T) -> Self {
        Self::Any(Arc::new(value))
    }

    /// Returns the integer if this is an [`Int`](Self::Int) value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Float`](Self::Float) value.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the flag if this is a [`Bool`](Self::Bool) value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text if this is a [`Text`](Self::Text) value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a reference to the payload if this is an [`Any`](Self::Any) value of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Any(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue {
    #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Any(_) => f.write_str("Any(..)"),
        }
    }
}

impl PartialEq for FieldValue {
    /// Scalars and text compare by value; [`Any`](Self::Any) payloads by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Any(a), Self::Any(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&'static str> for FieldValue {
    fn from(value: &'static str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for FieldValue {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Text(value)
    }
}

/// Read-only view of the fields attached to a [`Snarl`].
///
/// Fields can only be set while a composite is being built, through
/// [`ConfigOption`](crate::ConfigOption)s.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: HashMap<Cow<'static, str>, FieldValue>,
}

impl Fields {
    pub(crate) fn insert(&mut self, key: Cow<'static, str>, value: FieldValue) {
        self.entries.insert(key, value);
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over all fields in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    /// Iterates over all keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| &**k)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Field lookups that also work when the composite may be absent.
///
/// Implemented for [`Snarl`] itself and for the shapes a possibly-absent composite usually
/// comes in: `Option<&Snarl>`, `Option<Snarl>` and `Result<T, Snarl>`. An absent composite (or an
/// `Ok` result) simply has no fields.
///
/// # Examples
///
/// ```rust
/// use snarl::{FieldAccess, Snarl, with_http_code};
///
/// let missing: Option<Snarl> = Snarl::new("");
/// assert_eq!(missing.http_code(), 0);
///
/// let result: Result<(), Snarl> = Err(snarl::snarl!("forbidden", with_http_code(403)).unwrap());
/// assert_eq!(result.http_code(), 403);
/// ```
pub trait FieldAccess {
    /// Returns the fields, or `None` if there is no composite.
    fn field_set(&self) -> Option<&Fields>;

    /// Returns the value stored under `key`.
    fn get_field(&self, key: &str) -> Option<&FieldValue> {
        self.field_set()?.get(key)
    }

    /// Returns the HTTP status code stored under [`HTTP_CODE`].
    ///
    /// Returns `0` when the field is missing, is not an integer, or does not fit in a `u16`. The
    /// stored value is not changed and stays readable through [`get_field`](Self::get_field).
    fn http_code(&self) -> u16 {
        self.get_field(HTTP_CODE)
            .and_then(FieldValue::as_int)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(0)
    }

    /// Returns the HTTP status code as an [`http::StatusCode`], if it is a valid one.
    #[cfg(feature = "http")]
    #[cfg_attr(docsrs, doc(cfg(feature = "http")))]
    fn status_code(&self) -> Option<http::StatusCode> {
        http::StatusCode::from_u16(self.http_code()).ok()
    }
}

impl FieldAccess for Snarl {
    fn field_set(&self) -> Option<&Fields> {
        Some(self.fields())
    }
}

impl FieldAccess for Option<&Snarl> {
    fn field_set(&self) -> Option<&Fields> {
        self.map(Snarl::fields)
    }
}

impl FieldAccess for Option<Snarl> {
    fn field_set(&self) -> Option<&Fields> {
        self.as_ref().map(Snarl::fields)
    }
}

impl<T> FieldAccess for Result<T, Snarl> {
    fn field_set(&self) -> Option<&Fields> {
        self.as_ref().err().map(Snarl::fields)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        assert_eq!(FieldValue::from(7_u16).as_int(), Some(7));
        assert_eq!(FieldValue::from(1.5).as_float(), Some(1.5));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from("eu-west").as_str(), Some("eu-west"));
        assert_eq!(FieldValue::from(String::from("x")).as_int(), None);
        assert_eq!(FieldValue::from(3).as_str(), None);
    }

    #[test]
    fn any_payload_downcasts() {
        #[derive(Debug, PartialEq)]
        struct Tenant(u32);

        let value = FieldValue::any(Tenant(9));
        assert_eq!(value.downcast_ref::<Tenant>(), Some(&Tenant(9)));
        assert!(value.downcast_ref::<u32>().is_none());
        assert!(FieldValue::from(9).downcast_ref::<i64>().is_none());
        assert_eq!(format!("{value:?}"), "Any(..)");
    }

    #[test]
    fn clone_shares_any_payload() {
        let value = FieldValue::any(vec![1, 2, 3]);
        let copy = value.clone();
        let (FieldValue::Any(a), FieldValue::Any(b)) = (&value, &copy) else {
            panic!("expected Any payloads");
        };
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn fields_last_write_wins() {
        let mut fields = Fields::default();
        assert!(fields.is_empty());
        fields.insert("retries".into(), FieldValue::from(1));
        fields.insert("retries".into(), FieldValue::from(2));
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("retries"));
        assert_eq!(fields.get("retries").and_then(FieldValue::as_int), Some(2));
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["retries"]);
        assert_eq!(fields.iter().count(), 1);
    }

    #[test]
    fn absent_receivers_report_not_found() {
        let none: Option<&Snarl> = None;
        assert!(none.get_field(HTTP_CODE).is_none());
        assert_eq!(none.http_code(), 0);

        let owned: Option<Snarl> = None;
        assert!(owned.field_set().is_none());

        let ok: Result<u8, Snarl> = Ok(1);
        assert_eq!(ok.http_code(), 0);
    }

    #[test]
    fn http_code_rejects_non_integers_and_out_of_range() {
        let mut fields = Fields::default();
        let snarl = |fields: &Fields| {
            Snarl::builder("boom")
                .options(fields.iter().map(|(k, v)| crate::with_field(k.to_owned(), v.clone())))
                .build()
        };

        fields.insert(HTTP_CODE.into(), FieldValue::from("404"));
        assert_eq!(snarl(&fields).http_code(), 0);

        fields.insert(HTTP_CODE.into(), FieldValue::from(70_000));
        assert_eq!(snarl(&fields).http_code(), 0);

        fields.insert(HTTP_CODE.into(), FieldValue::from(-1));
        assert_eq!(snarl(&fields).http_code(), 0);

        fields.insert(HTTP_CODE.into(), FieldValue::from(404));
        assert_eq!(snarl(&fields).http_code(), 404);
    }

    #[cfg(feature = "http")]
    #[test]
    fn status_code_requires_valid_code() {
        let error = Snarl::builder("nope").http_code(418).build();
        assert_eq!(error.status_code(), Some(http::StatusCode::IM_A_TEAPOT));

        let error = Snarl::builder("nope").http_code(42).build();
        assert_eq!(error.status_code(), None);
    }
}
