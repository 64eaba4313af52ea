// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Returned when a dynamically typed main input is not one of the supported forms.
///
/// See [`Main::from_any`](crate::Main::from_any) for the list of supported types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported main error type {type_name}")]
pub struct UnsupportedTypeError {
    type_name: &'static str,
}

impl UnsupportedTypeError {
    pub(crate) fn of<T: ?Sized>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the rejected type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_rejected_type() {
        let error = UnsupportedTypeError::of::<Vec<u8>>();
        assert_eq!(error.type_name(), "alloc::vec::Vec<u8>");
        assert_eq!(error.to_string(), "unsupported main error type alloc::vec::Vec<u8>");
    }
}
