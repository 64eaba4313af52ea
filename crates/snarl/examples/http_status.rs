// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Maps composite errors to HTTP responses.

use http::StatusCode;
use snarl::{FieldAccess, Snarl, snarl, with_http_code};

fn lookup_user(id: u32) -> Result<&'static str, Snarl> {
    match id {
        1 => Ok("ann"),
        2 => Err(snarl!("user is suspended", format!("user {id}"), with_http_code(403))
            .expect("text main is present")),
        _ => Err(snarl!("user not found", format!("user {id}"), with_http_code(404))
            .expect("text main is present")),
    }
}

fn respond(id: u32) -> (StatusCode, String) {
    let result = lookup_user(id);
    let status = result.status_code().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match result {
        Ok(name) => (StatusCode::OK, name.to_owned()),
        Err(error) => (status, format!("{error:#}")),
    }
}

fn main() {
    for id in 1..=3 {
        let (status, body) = respond(id);
        println!("{id}: {status} {body}");
    }
}
