// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

use std::mem;

use snarl::Snarl;

#[test]
fn test_snarl_size() {
    // Snarl is a pointer to boxed data
    let size = mem::size_of::<Snarl>();
    println!("Snarl size: {size} bytes");
    assert_eq!(size, mem::size_of::<usize>());
}

#[test]
fn test_option_snarl_uses_niche() {
    assert_eq!(mem::size_of::<Option<Snarl>>(), mem::size_of::<Snarl>());
}

#[test]
fn test_result_with_snarl_is_reasonable_size() {
    // This should not trigger clippy::result_large_err
    let size = mem::size_of::<Result<String, Snarl>>();
    println!("Result<String, Snarl> size: {size} bytes");
    assert!(size <= 32, "Result size should be reasonable: {size} bytes");
}
