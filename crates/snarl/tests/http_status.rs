// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "http")]
#![expect(missing_docs, reason = "Test code")]

use http::StatusCode;
use snarl::{FieldAccess, Snarl, snarl, with_field, with_http_code};

#[test]
fn status_code_from_http_code() {
    let error = snarl!("not found", with_http_code(404)).unwrap();
    assert_eq!(error.status_code(), Some(StatusCode::NOT_FOUND));
}

#[test]
fn status_code_missing_or_invalid() {
    let error = snarl!("no code", "detail").unwrap();
    assert_eq!(error.status_code(), None);

    let error = snarl!("too small", with_http_code(42)).unwrap();
    assert_eq!(error.status_code(), None);

    let error = snarl!("text code", with_field("http_code", "500")).unwrap();
    assert_eq!(error.status_code(), None);
}

#[test]
fn status_code_through_result() {
    let result: Result<u8, Snarl> = Err(snarl!("unavailable", with_http_code(503)).unwrap());
    assert_eq!(result.status_code(), Some(StatusCode::SERVICE_UNAVAILABLE));

    let ok: Result<u8, Snarl> = Ok(1);
    assert_eq!(ok.status_code(), None);
}
