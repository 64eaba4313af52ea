// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Composes errors from a main error, annotations, wrapped errors and fields.

use std::io;
use std::sync::Arc;

use snarl::{Main, SharedError, Snarl, snarl, with_field, with_http_code};

#[derive(Debug, thiserror::Error)]
#[error("quota of {limit} requests exceeded")]
struct QuotaExceeded {
    limit: u32,
}

fn read_config(path: &str) -> Result<String, Snarl> {
    std::fs::read_to_string(path).map_err(|e| {
        snarl!("cannot read config", e, path.to_owned(), with_http_code(500)).expect("text main is present")
    })
}

fn main() {
    // Main error with text annotations.
    let error = snarl!("base", "layer 1", "layer 2").expect("text main is present");
    println!("short: {error}");
    println!("long : {error:#}");
    println!("quoted: {}", error.quoted());

    // Wrapped errors stay reachable.
    let quota: SharedError = Arc::new(QuotaExceeded { limit: 100 });
    let error = snarl!("publish failed", Arc::clone(&quota), with_field("topic", "orders"))
        .expect("text main is present");
    println!("is quota error: {}", error.is(quota.as_ref()));
    if let Some(found) = error.find::<QuotaExceeded>() {
        println!("found quota error with limit {}", found.limit);
    }

    // Absent inputs produce no composite.
    let nothing: Option<io::Error> = None;
    println!("absent: {:?}", Snarl::compose(Main::from_option(nothing), ["ignored"]));

    // Errors returned from fallible functions.
    match read_config("/definitely/not/here.toml") {
        Ok(text) => println!("config: {text}"),
        Err(error) => println!("{error:#} (http {})", error.http_code()),
    }

    // Extending an existing composite keeps what it already carries.
    let error = snarl!(error, "retrying later").expect("nested main is present");
    println!("extended: {error:#}, fields: {:?}", error.fields());
}
